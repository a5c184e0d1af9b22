use rayon::prelude::*;
use tracing::{debug, info};

use strategy_mc_shared::config::{SimulationConfig, StressScenarios};
use strategy_mc_shared::result::{ScenarioResult, StressBatchResult};
use strategy_mc_shared::series::ReturnSeries;

use crate::simulator::MonteCarloSimulator;

fn run_scenario(series: &ReturnSeries, config: &SimulationConfig) -> anyhow::Result<ScenarioResult> {
    let mut sim = MonteCarloSimulator::new(series, config.clone())?;
    sim.simulate()?;
    let summary = sim.summary()?;
    let params = sim.params();

    debug!(
        multiplier = config.volatility_multiplier,
        sigma = params.sigma,
        p5 = summary.p5,
        p80 = summary.p80,
        "scenario finished"
    );

    Ok(ScenarioResult {
        volatility_multiplier: config.volatility_multiplier,
        seed: config.seed,
        mu: params.mu,
        sigma: params.sigma,
        summary,
    })
}

/// Runs one full simulation per config on a bounded pool. Results keep input order.
pub fn run_batch(
    series: &ReturnSeries,
    configs: Vec<SimulationConfig>,
    n_workers: Option<usize>,
) -> anyhow::Result<StressBatchResult> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(n_workers.unwrap_or_else(|| rayon::current_num_threads().min(8)))
        .build()?;

    info!(
        scenarios = configs.len(),
        workers = pool.current_num_threads(),
        "running stress batch"
    );

    let results: anyhow::Result<Vec<ScenarioResult>> = pool.install(|| {
        configs
            .par_iter()
            .map(|config| run_scenario(series, config))
            .collect()
    });

    Ok(StressBatchResult::from_results(results?))
}

pub fn run_stress_batch(
    series: &ReturnSeries,
    base: &SimulationConfig,
    scenarios: &StressScenarios,
    n_workers: Option<usize>,
) -> anyhow::Result<StressBatchResult> {
    let configs = scenarios.generate_configs(base);
    run_batch(series, configs, n_workers)
}

pub fn run_default_stress_batch(
    series: &ReturnSeries,
    base: &SimulationConfig,
    n_workers: Option<usize>,
) -> anyhow::Result<StressBatchResult> {
    run_stress_batch(series, base, &StressScenarios::default(), n_workers)
}
