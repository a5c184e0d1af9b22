use std::path::Path;
use std::time::Duration;

use anyhow::Context;

use strategy_mc_shared::result::{PathMatrix, StressBatchResult, Summary};
use strategy_mc_sim::CalibratedParams;

pub fn print_summary(summary: &Summary, currency: &str) {
    println!("\n========== Simulation Summary ==========\n");
    println!("Initial Capital: {}", money(summary.initial_capital, currency));
    println!("Days:            {}", summary.n_days);
    println!("Simulations:     {}", summary.n_simulations);

    println!("\n========== Final Portfolio Value Distribution ==========");
    println!("Min             : {}", money(summary.min, currency));
    println!("Max             : {}", money(summary.max, currency));
    println!("Mean            : {}", money(summary.mean, currency));
    println!("Std Dev         : {}", money(summary.std_dev, currency));
    println!("5th Percentile  : {}", money(summary.p5, currency));
    println!("80th Percentile : {}", money(summary.p80, currency));
}

pub fn print_calibration(params: &CalibratedParams, multiplier: f64) {
    println!("\n========== Calibration ==========");
    println!("  Observations:    {}", params.n_observations);
    println!("  Drift (mu):      {:.6}", params.mu);
    println!("  Volatility:      {:.6} (x{})", params.sigma, multiplier);
}

pub fn print_stress(result: &StressBatchResult, currency: &str, elapsed: Duration) {
    println!("\n========================================");
    println!("  Scenarios: {}", result.n_scenarios());
    println!("  Time:      {:.2}s", elapsed.as_secs_f64());
    println!("========================================");
    println!(
        "{:>8}  {:>10}  {:>18}  {:>18}  {:>18}",
        "vol x", "sigma", "p5", "mean", "p80"
    );
    for scenario in &result.results {
        let s = &scenario.summary;
        println!(
            "{:>8.2}  {:>10.6}  {:>18}  {:>18}  {:>18}",
            scenario.volatility_multiplier,
            scenario.sigma,
            money(s.p5, currency),
            money(s.mean, currency),
            money(s.p80, currency),
        );
    }
    if let Some(worst) = result.worst_case() {
        println!(
            "\nWorst 5th percentile: {} at vol x{:.2}",
            money(worst.summary.p5, currency),
            worst.volatility_multiplier
        );
    }
}

/// Writes one row per day and one column per simulation for external plotting.
pub fn write_paths_csv(paths: &PathMatrix, path: &Path) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    let mut header = Vec::with_capacity(paths.n_simulations() + 1);
    header.push("day".to_string());
    header.extend((0..paths.n_simulations()).map(|n| format!("sim_{}", n)));
    writer.write_record(&header)?;

    for (day, row) in paths.rows().enumerate() {
        let mut record = Vec::with_capacity(row.len() + 1);
        record.push((day + 1).to_string());
        record.extend(row.iter().map(|v| v.to_string()));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

/// `1234567.891` -> `₹1,234,567.89`
pub fn money(value: f64, currency: &str) -> String {
    if !value.is_finite() {
        return format!("{}{}", currency, value);
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}{}{}.{}", sign, currency, grouped, frac_part)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_grouping() {
        assert_eq!(money(25_000.0, "₹"), "₹25,000.00");
        assert_eq!(money(1_234_567.891, "$"), "$1,234,567.89");
        assert_eq!(money(999.999, "$"), "$1,000.00");
        assert_eq!(money(12.5, ""), "12.50");
        assert_eq!(money(-1500.0, "$"), "-$1,500.00");
    }

    #[test]
    fn test_money_non_finite() {
        assert_eq!(money(f64::INFINITY, "$"), "$inf");
        assert_eq!(money(f64::NEG_INFINITY, "$"), "$-inf");
        assert_eq!(money(f64::NAN, "$"), "$NaN");
    }

    #[test]
    fn test_write_paths_csv() {
        let paths = PathMatrix::from_row_major(2, 2, vec![1.0, 2.0, 3.0, 4.5]);
        let file = std::env::temp_dir().join(format!("strategy-mc-paths-{}.csv", std::process::id()));
        write_paths_csv(&paths, &file).unwrap();

        let text = std::fs::read_to_string(&file).unwrap();
        assert_eq!(text, "day,sim_0,sim_1\n1,1,2\n2,3,4.5\n");
        std::fs::remove_file(&file).unwrap();
    }
}
