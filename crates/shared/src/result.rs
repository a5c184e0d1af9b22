/// Simulated portfolio values, `n_days` rows by `n_simulations` columns, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct PathMatrix {
    n_days: usize,
    n_simulations: usize,
    values: Vec<f64>,
}

impl PathMatrix {
    pub fn from_row_major(n_days: usize, n_simulations: usize, values: Vec<f64>) -> Self {
        assert!(
            n_days >= 1 && n_simulations >= 1,
            "path matrix needs at least one day and one simulation"
        );
        assert_eq!(
            values.len(),
            n_days * n_simulations,
            "path matrix buffer does not match its shape"
        );
        Self {
            n_days,
            n_simulations,
            values,
        }
    }

    /// (rows, columns) = (days, simulations)
    pub fn shape(&self) -> (usize, usize) {
        (self.n_days, self.n_simulations)
    }

    pub fn n_days(&self) -> usize {
        self.n_days
    }

    pub fn n_simulations(&self) -> usize {
        self.n_simulations
    }

    #[inline]
    pub fn get(&self, day: usize, simulation: usize) -> f64 {
        self.values[day * self.n_simulations + simulation]
    }

    pub fn row(&self, day: usize) -> &[f64] {
        let start = day * self.n_simulations;
        &self.values[start..start + self.n_simulations]
    }

    pub fn rows(&self) -> std::slice::ChunksExact<'_, f64> {
        self.values.chunks_exact(self.n_simulations)
    }

    /// Values on the final simulated day, one per simulation.
    pub fn terminal(&self) -> &[f64] {
        self.row(self.n_days - 1)
    }

    /// One simulation's value over time.
    pub fn path(&self, simulation: usize) -> impl Iterator<Item = f64> + '_ {
        self.values
            .iter()
            .skip(simulation)
            .step_by(self.n_simulations)
            .copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

/// Distribution of final portfolio values across all simulations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub initial_capital: f64,
    pub n_days: usize,
    pub n_simulations: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Population standard deviation (divisor N).
    pub std_dev: f64,
    pub p5: f64,
    pub p80: f64,
}

#[derive(Debug, Clone)]
pub struct ScenarioResult {
    pub volatility_multiplier: f64,
    pub seed: Option<u64>,
    pub mu: f64,
    pub sigma: f64,
    pub summary: Summary,
}

#[derive(Debug, Clone)]
pub struct StressBatchResult {
    pub results: Vec<ScenarioResult>,
}

impl StressBatchResult {
    pub fn from_results(results: Vec<ScenarioResult>) -> Self {
        Self { results }
    }

    pub fn n_scenarios(&self) -> usize {
        self.results.len()
    }

    /// Scenario with the lowest 5th-percentile terminal value.
    pub fn worst_case(&self) -> Option<&ScenarioResult> {
        self.results
            .iter()
            .min_by(|a, b| a.summary.p5.total_cmp(&b.summary.p5))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PathMatrix {
        // 3 days x 2 simulations
        PathMatrix::from_row_major(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
    }

    #[test]
    fn test_shape_and_access() {
        let m = sample();
        assert_eq!(m.shape(), (3, 2));
        assert_eq!(m.get(1, 0), 3.0);
        assert_eq!(m.row(2), &[5.0, 6.0]);
        assert_eq!(m.terminal(), &[5.0, 6.0]);
        assert_eq!(m.rows().count(), 3);
    }

    #[test]
    fn test_path_walks_one_column() {
        let m = sample();
        let path: Vec<f64> = m.path(1).collect();
        assert_eq!(path, vec![2.0, 4.0, 6.0]);
    }

    #[test]
    #[should_panic]
    fn test_shape_mismatch_panics() {
        PathMatrix::from_row_major(2, 2, vec![1.0; 3]);
    }

    #[test]
    #[should_panic(expected = "at least one day")]
    fn test_zero_days_rejected() {
        PathMatrix::from_row_major(0, 5, vec![]);
    }

    #[test]
    #[should_panic(expected = "at least one day")]
    fn test_zero_simulations_rejected() {
        PathMatrix::from_row_major(3, 0, vec![]);
    }
}
