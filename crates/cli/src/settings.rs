use std::path::Path;

use anyhow::Context;
use clap::Args;
use serde::Deserialize;

use strategy_mc_shared::config::SimulationConfig;

pub const DEFAULT_CURRENCY: &str = "₹";

/// Contents of the optional TOML settings file. Missing keys keep their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(flatten)]
    pub simulation: SimulationConfig,
    pub stress_multipliers: Option<Vec<f64>>,
    pub workers: Option<usize>,
    pub currency: Option<String>,
}

impl Settings {
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid settings file {}", path.display()))
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn currency(&self, flag: Option<&str>) -> String {
        flag.or(self.currency.as_deref())
            .unwrap_or(DEFAULT_CURRENCY)
            .to_string()
    }
}

/// Simulation flags shared by `run` and `stress`; each overrides the settings file.
#[derive(Args, Debug, Clone, Default)]
pub struct SimArgs {
    /// Starting capital
    #[arg(long)]
    pub capital: Option<f64>,
    /// Number of trading days to simulate
    #[arg(long)]
    pub days: Option<usize>,
    /// Number of simulated paths
    #[arg(long)]
    pub simulations: Option<usize>,
    /// Volatility stress factor applied to the calibrated sigma
    #[arg(long)]
    pub vol_multiplier: Option<f64>,
    /// Seed for reproducible draws (omit for a random run)
    #[arg(long)]
    pub seed: Option<u64>,
}

impl SimArgs {
    pub fn apply(&self, base: &SimulationConfig) -> SimulationConfig {
        SimulationConfig {
            initial_capital: self.capital.unwrap_or(base.initial_capital),
            n_days: self.days.unwrap_or(base.n_days),
            n_simulations: self.simulations.unwrap_or(base.n_simulations),
            volatility_multiplier: self.vol_multiplier.unwrap_or(base.volatility_multiplier),
            seed: self.seed.or(base.seed),
        }
    }
}
