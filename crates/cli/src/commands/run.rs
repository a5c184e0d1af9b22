use std::path::Path;

use tracing::info;

use strategy_mc_shared::config::SimulationConfig;
use strategy_mc_sim::MonteCarloSimulator;

use crate::history;
use crate::output;

pub fn run(
    input: &Path,
    config: SimulationConfig,
    paths_out: Option<&Path>,
    currency: &str,
) -> anyhow::Result<()> {
    let table = history::load_history(input)?;
    let mut sim = MonteCarloSimulator::from_table(&table, config)?;

    let params = sim.params();
    info!(mu = params.mu, sigma = params.sigma, "calibrated");
    println!(
        "Running {} simulations ({} days each)...",
        sim.config().n_simulations,
        sim.config().n_days,
    );

    let start = std::time::Instant::now();
    let paths = sim.simulate()?;
    info!(elapsed_ms = start.elapsed().as_millis() as u64, "simulation finished");

    if let Some(out) = paths_out {
        output::write_paths_csv(paths, out)?;
        println!("Wrote simulated paths to {}", out.display());
    }

    output::print_summary(&sim.summary()?, currency);
    Ok(())
}
