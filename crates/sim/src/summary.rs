use strategy_mc_shared::config::{LOWER_PERCENTILE, UPPER_PERCENTILE};
use strategy_mc_shared::result::{PathMatrix, Summary};

use crate::calibrator::mean;

/// Statistics of the matrix's final row.
pub fn summarize(paths: &PathMatrix, initial_capital: f64) -> Summary {
    let terminal = paths.terminal();
    let mut sorted = terminal.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mean = mean(terminal);

    Summary {
        initial_capital,
        n_days: paths.n_days(),
        n_simulations: paths.n_simulations(),
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        mean,
        std_dev: population_std(terminal, mean),
        p5: percentile(&sorted, LOWER_PERCENTILE),
        p80: percentile(&sorted, UPPER_PERCENTILE),
    }
}

/// Linear interpolation between the order statistics bracketing
/// rank `p / 100 * (n - 1)`. `sorted` must be ascending and non-empty.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }

    let rank = (p.clamp(0.0, 100.0) / 100.0) * (n as f64 - 1.0);
    let lower = rank.floor() as usize;
    let upper = (rank.ceil() as usize).min(n - 1);

    if lower == upper {
        sorted[lower]
    } else {
        let w = rank - lower as f64;
        sorted[lower] + (sorted[upper] - sorted[lower]) * w
    }
}

/// Any percentile of the final-day values, e.g. for a custom VaR level.
pub fn terminal_percentile(paths: &PathMatrix, p: f64) -> f64 {
    let mut sorted = paths.terminal().to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    percentile(&sorted, p)
}

fn population_std(values: &[f64], mean: f64) -> f64 {
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_percentile_interpolates() {
        let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(percentile(&sorted, 0.0), 1.0);
        assert_eq!(percentile(&sorted, 50.0), 3.0);
        assert_eq!(percentile(&sorted, 100.0), 5.0);
        // rank 0.2 -> 1.2, rank 3.2 -> 4.2
        assert_relative_eq!(percentile(&sorted, 5.0), 1.2, epsilon = 1e-12);
        assert_relative_eq!(percentile(&sorted, 80.0), 4.2, epsilon = 1e-12);
    }

    #[test]
    fn test_percentile_single_value() {
        assert_eq!(percentile(&[7.5], 80.0), 7.5);
    }

    #[test]
    fn test_summary_uses_last_row_only() {
        // 2 days x 4 simulations, first row must be ignored
        let paths = PathMatrix::from_row_major(
            2,
            4,
            vec![
                1e9, -1e9, 0.0, 0.0, //
                4.0, 1.0, 3.0, 2.0,
            ],
        );
        let summary = summarize(&paths, 1.0);

        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 4.0);
        assert_relative_eq!(summary.mean, 2.5, epsilon = 1e-15);
        // population variance of 1..=4 is 1.25
        assert_relative_eq!(summary.std_dev, 1.25_f64.sqrt(), epsilon = 1e-15);
        // rank 0.15 -> 1.15, rank 2.4 -> 3.4
        assert_relative_eq!(summary.p5, 1.15, epsilon = 1e-12);
        assert_relative_eq!(summary.p80, 3.4, epsilon = 1e-12);
        assert_eq!(summary.n_days, 2);
        assert_eq!(summary.n_simulations, 4);
    }

    #[test]
    fn test_terminal_percentile_matches_summary() {
        let paths = PathMatrix::from_row_major(1, 3, vec![30.0, 10.0, 20.0]);
        let summary = summarize(&paths, 1.0);
        assert_eq!(terminal_percentile(&paths, 5.0), summary.p5);
        assert_eq!(terminal_percentile(&paths, 50.0), 20.0);
    }
}
