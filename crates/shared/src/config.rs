use serde::{Deserialize, Serialize};

use crate::error::{McError, Result};

// Baseline projection parameters
pub const INITIAL_CAPITAL: f64 = 25_000.0;
pub const TRADING_DAYS: usize = 252;
pub const N_SIMULATIONS: usize = 50;
pub const VOLATILITY_MULTIPLIER: f64 = 1.0;
pub const GBM_DT: f64 = 1.0;

// Percentiles reported for the terminal distribution
pub const LOWER_PERCENTILE: f64 = 5.0;
pub const UPPER_PERCENTILE: f64 = 80.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub initial_capital: f64,
    pub n_days: usize,
    pub n_simulations: usize,
    /// Stress factor applied to the calibrated volatility.
    pub volatility_multiplier: f64,
    /// Seed for the normal source. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_capital: INITIAL_CAPITAL,
            n_days: TRADING_DAYS,
            n_simulations: N_SIMULATIONS,
            volatility_multiplier: VOLATILITY_MULTIPLIER,
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.initial_capital.is_finite() && self.initial_capital > 0.0) {
            return Err(McError::invalid_configuration(format!(
                "initial capital must be a positive finite number, got {}",
                self.initial_capital
            )));
        }
        if self.n_days < 1 {
            return Err(McError::invalid_configuration("n_days must be at least 1"));
        }
        if self.n_simulations < 1 {
            return Err(McError::invalid_configuration(
                "n_simulations must be at least 1",
            ));
        }
        if self.n_days.checked_mul(self.n_simulations).is_none() {
            return Err(McError::invalid_configuration(format!(
                "{} days x {} simulations does not fit in memory",
                self.n_days, self.n_simulations
            )));
        }
        validate_multiplier(self.volatility_multiplier)
    }
}

pub fn validate_multiplier(multiplier: f64) -> Result<()> {
    if multiplier.is_finite() && multiplier >= 0.0 {
        Ok(())
    } else {
        Err(McError::invalid_configuration(format!(
            "volatility multiplier must be finite and non-negative, got {}",
            multiplier
        )))
    }
}

/// A set of volatility stress factors run against one base configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressScenarios {
    pub multipliers: Vec<f64>,
}

impl Default for StressScenarios {
    fn default() -> Self {
        Self {
            multipliers: vec![0.8, 1.0, 1.2, 1.5],
        }
    }
}

impl StressScenarios {
    /// Scenario `index` keeps the base config but swaps in its multiplier; a seeded
    /// base yields `seed + index` so each scenario draws an independent stream.
    pub fn apply(&self, base: &SimulationConfig, index: usize) -> SimulationConfig {
        SimulationConfig {
            volatility_multiplier: self.multipliers[index],
            seed: base.seed.map(|s| s.wrapping_add(index as u64)),
            ..base.clone()
        }
    }

    pub fn generate_configs(&self, base: &SimulationConfig) -> Vec<SimulationConfig> {
        (0..self.multipliers.len())
            .map(|i| self.apply(base, i))
            .collect()
    }
}
