use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};
use rand_pcg::Pcg64;

use strategy_mc_shared::{McError, Result};

/// Source of independent standard-normal draws.
///
/// Draws are consumed in buffer order, so a seeded source fills the same buffer
/// with the same values every time.
pub trait NormalSource {
    fn fill_standard_normal(&mut self, out: &mut [f64]);
}

impl<S: NormalSource + ?Sized> NormalSource for &mut S {
    fn fill_standard_normal(&mut self, out: &mut [f64]) {
        (**self).fill_standard_normal(out)
    }
}

impl<S: NormalSource + ?Sized> NormalSource for Box<S> {
    fn fill_standard_normal(&mut self, out: &mut [f64]) {
        (**self).fill_standard_normal(out)
    }
}

/// PCG-64 generator sampling `StandardNormal`.
pub struct PcgNormalSource {
    rng: Pcg64,
}

impl PcgNormalSource {
    /// `None` seeds from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => Pcg64::seed_from_u64(s),
            None => Pcg64::from_entropy(),
        };
        Self { rng }
    }
}

impl NormalSource for PcgNormalSource {
    fn fill_standard_normal(&mut self, out: &mut [f64]) {
        for z in out.iter_mut() {
            *z = StandardNormal.sample(&mut self.rng);
        }
    }
}

/// Replays externally supplied draws, wrapping around when exhausted.
#[derive(Debug, Clone)]
pub struct ReplaySource {
    draws: Vec<f64>,
    cursor: usize,
}

impl ReplaySource {
    pub fn new(draws: Vec<f64>) -> Result<Self> {
        if draws.is_empty() {
            return Err(McError::invalid_input("replay source needs at least one draw"));
        }
        Ok(Self { draws, cursor: 0 })
    }
}

impl NormalSource for ReplaySource {
    fn fill_standard_normal(&mut self, out: &mut [f64]) {
        for z in out.iter_mut() {
            *z = self.draws[self.cursor];
            self.cursor = (self.cursor + 1) % self.draws.len();
        }
    }
}
