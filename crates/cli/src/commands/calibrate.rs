use std::path::Path;

use strategy_mc_sim::calibrate_table;

use crate::history;
use crate::output;

pub fn run(input: &Path, volatility_multiplier: f64) -> anyhow::Result<()> {
    let table = history::load_history(input)?;
    let params = calibrate_table(&table, volatility_multiplier)?;
    output::print_calibration(&params, volatility_multiplier);
    Ok(())
}
