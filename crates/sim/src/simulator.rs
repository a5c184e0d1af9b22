use strategy_mc_shared::config::SimulationConfig;
use strategy_mc_shared::result::{PathMatrix, Summary};
use strategy_mc_shared::series::{HistoricalTable, ReturnSeries};
use strategy_mc_shared::{McError, Result};

use crate::calibrator::{self, CalibratedParams};
use crate::normal::{NormalSource, PcgNormalSource};
use crate::paths::GbmPathGenerator;
use crate::summary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Calibrated,
    Simulated,
}

enum State {
    Calibrated,
    /// Holds the most recent matrix only; each run replaces it.
    Simulated(PathMatrix),
}

/// Monte Carlo GBM simulator for one strategy's return history.
///
/// Calibration happens in the constructor, so a simulator starts out
/// [`Phase::Calibrated`]. `simulate` moves it to [`Phase::Simulated`]; paths and
/// the summary are only available from there.
pub struct MonteCarloSimulator<S: NormalSource = PcgNormalSource> {
    params: CalibratedParams,
    config: SimulationConfig,
    generator: GbmPathGenerator,
    source: S,
    state: State,
}

impl MonteCarloSimulator<PcgNormalSource> {
    /// Uses a PCG source seeded from `config.seed`.
    pub fn new(series: &ReturnSeries, config: SimulationConfig) -> Result<Self> {
        let source = PcgNormalSource::new(config.seed);
        Self::with_source(series, config, source)
    }

    pub fn from_table(table: &HistoricalTable, config: SimulationConfig) -> Result<Self> {
        let series = ReturnSeries::from_table(table)?;
        Self::new(&series, config)
    }
}

impl<S: NormalSource> MonteCarloSimulator<S> {
    pub fn with_source(series: &ReturnSeries, config: SimulationConfig, source: S) -> Result<Self> {
        config.validate()?;
        let params = calibrator::calibrate(series, config.volatility_multiplier)?;
        let generator = GbmPathGenerator::new(&params, config.initial_capital);

        Ok(Self {
            params,
            config,
            generator,
            source,
            state: State::Calibrated,
        })
    }

    pub fn params(&self) -> CalibratedParams {
        self.params
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        match self.state {
            State::Calibrated => Phase::Calibrated,
            State::Simulated(_) => Phase::Simulated,
        }
    }

    /// Draws a fresh (days x simulations) matrix, replacing any previous one.
    pub fn simulate(&mut self) -> Result<&PathMatrix> {
        let paths = self.generator.generate(
            self.config.n_days,
            self.config.n_simulations,
            &mut self.source,
        )?;
        self.state = State::Simulated(paths);
        self.paths()
    }

    pub fn paths(&self) -> Result<&PathMatrix> {
        match &self.state {
            State::Simulated(paths) => Ok(paths),
            State::Calibrated => Err(McError::NotSimulated),
        }
    }

    pub fn summary(&self) -> Result<Summary> {
        let paths = self.paths()?;
        Ok(summary::summarize(paths, self.config.initial_capital))
    }

    pub fn terminal_percentile(&self, p: f64) -> Result<f64> {
        Ok(summary::terminal_percentile(self.paths()?, p))
    }

    pub fn into_paths(self) -> Result<PathMatrix> {
        match self.state {
            State::Simulated(paths) => Ok(paths),
            State::Calibrated => Err(McError::NotSimulated),
        }
    }
}
