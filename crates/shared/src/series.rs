use std::collections::BTreeMap;

use crate::error::{McError, Result};

/// Column holding fractional per-period strategy returns.
pub const RETURN_COLUMN: &str = "pnl_pct";
/// Column holding closing prices, used when no return column exists.
pub const PRICE_COLUMN: &str = "close";

/// Named numeric columns of equal length. Missing cells are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoricalTable {
    columns: BTreeMap<String, Vec<Option<f64>>>,
    n_rows: usize,
}

impl HistoricalTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_column(mut self, name: &str, values: Vec<Option<f64>>) -> Result<Self> {
        self.insert_column(name, values)?;
        Ok(self)
    }

    pub fn insert_column(&mut self, name: &str, values: Vec<Option<f64>>) -> Result<()> {
        if !self.columns.is_empty() && values.len() != self.n_rows {
            return Err(McError::invalid_input(format!(
                "column '{}' has {} rows, table has {}",
                name,
                values.len(),
                self.n_rows
            )));
        }
        self.n_rows = values.len();
        self.columns.insert(name.to_string(), values);
        Ok(())
    }

    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    /// Appends the rows of `other` below this table. Columns present on only one
    /// side are padded with missing cells.
    pub fn concat(&mut self, other: HistoricalTable) {
        let own_rows = self.n_rows;
        let other_rows = other.n_rows;

        for (name, values) in &mut self.columns {
            match other.columns.get(name) {
                Some(extra) => values.extend_from_slice(extra),
                None => values.resize(own_rows + other_rows, None),
            }
        }
        for (name, extra) in other.columns {
            if self.columns.contains_key(&name) {
                continue;
            }
            let mut values = vec![None; own_rows];
            values.extend(extra);
            self.columns.insert(name, values);
        }
        self.n_rows = own_rows + other_rows;
    }
}

/// Cleaned per-period fractional returns; never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnSeries {
    values: Vec<f64>,
}

impl ReturnSeries {
    /// Builds a series from returns, dropping missing and non-finite entries.
    pub fn from_returns<I>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let values: Vec<f64> = values
            .into_iter()
            .flatten()
            .filter(|v| v.is_finite())
            .collect();
        if values.is_empty() {
            return Err(McError::invalid_input(
                "return series is empty after dropping missing values",
            ));
        }
        Ok(Self { values })
    }

    /// Derives returns by percentage change between consecutive prices. A change
    /// involving a missing price is itself missing and gets dropped.
    pub fn from_prices(prices: &[Option<f64>]) -> Result<Self> {
        let available = prices.iter().filter(|p| p.is_some()).count();
        if available < 2 {
            return Err(McError::invalid_input(format!(
                "price series needs at least 2 points to derive returns, got {}",
                available
            )));
        }
        Self::from_returns(prices.windows(2).map(|w| match (w[0], w[1]) {
            (Some(prev), Some(curr)) => Some(curr / prev - 1.0),
            _ => None,
        }))
    }

    /// Prefers the return column and falls back to the price column.
    pub fn from_table(table: &HistoricalTable) -> Result<Self> {
        if let Some(returns) = table.column(RETURN_COLUMN) {
            return Self::from_returns(returns.iter().copied());
        }
        if let Some(prices) = table.column(PRICE_COLUMN) {
            return Self::from_prices(prices);
        }
        let found: Vec<&str> = table.column_names().collect();
        Err(McError::invalid_input(format!(
            "input must contain either '{}' or '{}' column, found [{}]",
            RETURN_COLUMN,
            PRICE_COLUMN,
            found.join(", ")
        )))
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_prices_to_returns() {
        let series = ReturnSeries::from_prices(&[Some(100.0), Some(101.0), Some(99.0)]).unwrap();
        assert_eq!(series.len(), 2);
        assert_relative_eq!(series.values()[0], 0.01, epsilon = 1e-12);
        assert_relative_eq!(series.values()[1], -0.019_801_980_198_019_8, epsilon = 1e-12);
    }

    #[test]
    fn test_short_price_series_rejected() {
        let err = ReturnSeries::from_prices(&[Some(100.0)]).unwrap_err();
        assert!(matches!(err, McError::InvalidInput(_)));
        let err = ReturnSeries::from_prices(&[Some(100.0), None, None]).unwrap_err();
        assert!(matches!(err, McError::InvalidInput(_)));
    }

    #[test]
    fn test_missing_returns_dropped() {
        let series =
            ReturnSeries::from_returns([None, Some(0.01), Some(f64::NAN), Some(-0.02)]).unwrap();
        assert_eq!(series.values(), &[0.01, -0.02]);
    }

    #[test]
    fn test_all_missing_rejected() {
        let err = ReturnSeries::from_returns([None, Some(f64::NAN)]).unwrap_err();
        assert!(matches!(err, McError::InvalidInput(_)));
    }

    #[test]
    fn test_table_prefers_return_column() {
        let table = HistoricalTable::new()
            .with_column(RETURN_COLUMN, vec![Some(0.5), Some(0.25)])
            .unwrap()
            .with_column(PRICE_COLUMN, vec![Some(1.0), Some(2.0)])
            .unwrap();
        let series = ReturnSeries::from_table(&table).unwrap();
        assert_eq!(series.values(), &[0.5, 0.25]);
    }

    #[test]
    fn test_table_without_known_column() {
        let table = HistoricalTable::new()
            .with_column("volume", vec![Some(1.0)])
            .unwrap();
        let err = ReturnSeries::from_table(&table).unwrap_err();
        assert!(matches!(err, McError::InvalidInput(_)));
        assert!(err.to_string().contains("found [volume]"), "{}", err);
    }

    #[test]
    fn test_column_names_sorted() {
        let table = HistoricalTable::new()
            .with_column(PRICE_COLUMN, vec![Some(1.0)])
            .unwrap()
            .with_column("date", vec![None])
            .unwrap();
        let names: Vec<&str> = table.column_names().collect();
        assert_eq!(names, vec!["close", "date"]);
    }

    #[test]
    fn test_column_length_mismatch() {
        let err = HistoricalTable::new()
            .with_column(PRICE_COLUMN, vec![Some(1.0), Some(2.0)])
            .unwrap()
            .with_column("volume", vec![Some(1.0)])
            .unwrap_err();
        assert!(matches!(err, McError::InvalidInput(_)));
    }

    #[test]
    fn test_concat_pads_missing_columns() {
        let mut a = HistoricalTable::new()
            .with_column(PRICE_COLUMN, vec![Some(1.0), Some(2.0)])
            .unwrap();
        let b = HistoricalTable::new()
            .with_column(RETURN_COLUMN, vec![Some(0.1)])
            .unwrap();
        a.concat(b);

        assert_eq!(a.n_rows(), 3);
        assert_eq!(a.column(PRICE_COLUMN).unwrap(), &[Some(1.0), Some(2.0), None]);
        assert_eq!(a.column(RETURN_COLUMN).unwrap(), &[None, None, Some(0.1)]);
    }
}
