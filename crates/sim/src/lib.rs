//! Monte Carlo projection of a trading strategy's portfolio value.
//!
//! History is calibrated into per-period GBM drift and volatility, many
//! independent paths are simulated forward, and the final-day values are
//! summarised into a distribution.

pub mod calibrator;
pub mod normal;
pub mod paths;
pub mod runner;
pub mod simulator;
pub mod summary;

pub use calibrator::{calibrate, calibrate_table, CalibratedParams};
pub use normal::{NormalSource, PcgNormalSource, ReplaySource};
pub use paths::GbmPathGenerator;
pub use simulator::{MonteCarloSimulator, Phase};
