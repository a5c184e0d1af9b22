use strategy_mc_shared::config::validate_multiplier;
use strategy_mc_shared::series::{HistoricalTable, ReturnSeries};
use strategy_mc_shared::Result;

/// Per-period GBM drift and volatility estimated from history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibratedParams {
    pub mu: f64,
    pub sigma: f64,
    pub n_observations: usize,
}

/// Sample mean and sample standard deviation (divisor n-1) of the series, with the
/// deviation scaled by `volatility_multiplier`. A single observation has sigma 0.
pub fn calibrate(series: &ReturnSeries, volatility_multiplier: f64) -> Result<CalibratedParams> {
    validate_multiplier(volatility_multiplier)?;

    let values = series.values();
    let mu = mean(values);
    let sigma = sample_std(values, mu) * volatility_multiplier;

    Ok(CalibratedParams {
        mu,
        sigma,
        n_observations: values.len(),
    })
}

pub fn calibrate_table(
    table: &HistoricalTable,
    volatility_multiplier: f64,
) -> Result<CalibratedParams> {
    let series = ReturnSeries::from_table(table)?;
    calibrate(&series, volatility_multiplier)
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn sample_std(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    (ss / (values.len() - 1) as f64).sqrt()
}
