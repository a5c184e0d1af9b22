//! Geometric Brownian Motion path generation.
//!
//! Each cell of the (days x simulations) matrix is
//! `C0 * exp(sum_{s<=t} (mu - sigma^2 / 2) * dt + sigma * sqrt(dt) * z[s, n])`.
//! Shocks are drawn row-major from the injected source; the prefix sum runs
//! day by day so every path accumulates in increasing time order regardless of
//! how columns are split across threads.

use rayon::prelude::*;

use strategy_mc_shared::config::GBM_DT;
use strategy_mc_shared::result::PathMatrix;
use strategy_mc_shared::{McError, Result};

use crate::calibrator::CalibratedParams;
use crate::normal::NormalSource;

// Below this many cells per pass the rayon split costs more than it saves.
const PAR_MIN_LEN: usize = 4096;

#[derive(Debug, Clone, Copy)]
pub struct GbmPathGenerator {
    initial_capital: f64,
    /// Pre-computed drift term: (mu - 0.5 * sigma^2) * dt
    drift_term: f64,
    /// Pre-computed volatility term: sigma * sqrt(dt)
    vol_term: f64,
}

impl GbmPathGenerator {
    pub fn new(params: &CalibratedParams, initial_capital: f64) -> Self {
        let dt = GBM_DT;
        Self {
            initial_capital,
            drift_term: (params.mu - 0.5 * params.sigma * params.sigma) * dt,
            vol_term: params.sigma * dt.sqrt(),
        }
    }

    pub fn generate<S>(
        &self,
        n_days: usize,
        n_simulations: usize,
        source: &mut S,
    ) -> Result<PathMatrix>
    where
        S: NormalSource + ?Sized,
    {
        if n_days < 1 || n_simulations < 1 {
            return Err(McError::invalid_configuration(format!(
                "path matrix needs at least one day and one simulation, got {}x{}",
                n_days, n_simulations
            )));
        }

        let n_cells = n_days.checked_mul(n_simulations).ok_or_else(|| {
            McError::invalid_configuration(format!(
                "{} days x {} simulations does not fit in memory",
                n_days, n_simulations
            ))
        })?;

        let mut values = vec![0.0; n_cells];
        source.fill_standard_normal(&mut values);

        let drift = self.drift_term;
        let vol = self.vol_term;
        values
            .par_iter_mut()
            .with_min_len(PAR_MIN_LEN)
            .for_each(|z| *z = drift + vol * *z);

        for day in 1..n_days {
            let (done, rest) = values.split_at_mut(day * n_simulations);
            let prev = &done[(day - 1) * n_simulations..];
            rest[..n_simulations]
                .par_iter_mut()
                .with_min_len(PAR_MIN_LEN)
                .zip(prev.par_iter())
                .for_each(|(cum, prev)| *cum = *prev + *cum);
        }

        let capital = self.initial_capital;
        values
            .par_iter_mut()
            .with_min_len(PAR_MIN_LEN)
            .for_each(|v| *v = capital * v.exp());

        Ok(PathMatrix::from_row_major(n_days, n_simulations, values))
    }
}
