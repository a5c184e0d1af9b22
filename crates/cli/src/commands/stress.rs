use std::path::Path;

use strategy_mc_shared::config::{SimulationConfig, StressScenarios};
use strategy_mc_shared::series::ReturnSeries;
use strategy_mc_sim::runner;

use crate::history;
use crate::output;

pub fn run(
    input: &Path,
    base: SimulationConfig,
    multipliers: Option<Vec<f64>>,
    workers: usize,
    currency: &str,
) -> anyhow::Result<()> {
    if multipliers.as_ref().is_some_and(Vec::is_empty) {
        anyhow::bail!("At least one volatility multiplier is required");
    }
    let table = history::load_history(input)?;
    let series = ReturnSeries::from_table(&table)?;
    let n_workers = if workers == 0 { None } else { Some(workers) };

    let n_scenarios = multipliers
        .as_ref()
        .map_or(StressScenarios::default().multipliers.len(), Vec::len);
    println!(
        "Running {} stress scenarios ({} simulations x {} days each)...",
        n_scenarios, base.n_simulations, base.n_days,
    );

    let start = std::time::Instant::now();
    let result = match multipliers {
        Some(multipliers) => {
            let scenarios = StressScenarios { multipliers };
            runner::run_stress_batch(&series, &base, &scenarios, n_workers)?
        }
        None => runner::run_default_stress_batch(&series, &base, n_workers)?,
    };
    let elapsed = start.elapsed();

    output::print_stress(&result, currency, elapsed);
    Ok(())
}
