use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info, warn};

use strategy_mc_shared::series::HistoricalTable;

/// Loads one CSV file, or every `.csv` file below a directory concatenated in
/// path order (e.g. `history/<symbol>/<year>.csv`).
pub fn load_history(path: &Path) -> anyhow::Result<HistoricalTable> {
    let files = if path.is_dir() {
        let mut files = Vec::new();
        collect_csv_files(path, &mut files)?;
        files.sort();
        files
    } else {
        vec![path.to_path_buf()]
    };

    if files.is_empty() {
        anyhow::bail!("No .csv files found under {}", path.display());
    }

    let mut table = HistoricalTable::new();
    for file in &files {
        let part = read_csv_file(file)?;
        debug!(file = %file.display(), rows = part.n_rows(), "loaded history file");
        table.concat(part);
    }

    info!(files = files.len(), rows = table.n_rows(), "history loaded");
    Ok(table)
}

fn collect_csv_files(dir: &Path, out: &mut Vec<PathBuf>) -> anyhow::Result<()> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to list directory {}", dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        if path.is_dir() {
            collect_csv_files(&path, out)?;
        } else if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("csv")) {
            out.push(path);
        }
    }
    Ok(())
}

pub fn read_csv_file(path: &Path) -> anyhow::Result<HistoricalTable> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open history file {}", path.display()))?;
    read_csv(file).with_context(|| format!("Failed to parse history file {}", path.display()))
}

/// Every column is read as numeric; empty or non-numeric cells become missing.
pub fn read_csv<R: Read>(reader: R) -> anyhow::Result<HistoricalTable> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut columns: Vec<Vec<Option<f64>>> = vec![Vec::new(); headers.len()];

    for (line, record) in reader.records().enumerate() {
        let record = record?;
        if record.len() != headers.len() {
            warn!(line = line + 2, "skipping row with {} fields", record.len());
            continue;
        }
        for (column, field) in columns.iter_mut().zip(record.iter()) {
            column.push(field.parse::<f64>().ok());
        }
    }

    let mut table = HistoricalTable::new();
    for (name, values) in headers.iter().zip(columns) {
        table.insert_column(name, values)?;
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strategy_mc_shared::series::{PRICE_COLUMN, RETURN_COLUMN};

    #[test]
    fn test_read_csv_with_gaps() {
        let data = "date,close,pnl_pct\n2024-01-01,100.0,\n2024-01-02,101.0,0.01\n2024-01-03,,n/a\n";
        let table = read_csv(data.as_bytes()).unwrap();

        assert_eq!(table.n_rows(), 3);
        assert_eq!(
            table.column(PRICE_COLUMN).unwrap(),
            &[Some(100.0), Some(101.0), None]
        );
        assert_eq!(table.column(RETURN_COLUMN).unwrap(), &[None, Some(0.01), None]);
        assert!(table.column("date").unwrap().iter().all(Option::is_none));
    }

    #[test]
    fn test_load_directory_concatenates() {
        let root = std::env::temp_dir().join(format!("strategy-mc-history-{}", std::process::id()));
        let nested = root.join("AAPL");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join("2023.csv"), "close\n100\n101\n").unwrap();
        std::fs::write(nested.join("2024.csv"), "close\n102\n").unwrap();
        std::fs::write(nested.join("notes.txt"), "ignored").unwrap();

        let table = load_history(&root).unwrap();
        assert_eq!(
            table.column(PRICE_COLUMN).unwrap(),
            &[Some(100.0), Some(101.0), Some(102.0)]
        );

        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_empty_directory_is_an_error() {
        let root = std::env::temp_dir().join(format!("strategy-mc-empty-{}", std::process::id()));
        std::fs::create_dir_all(&root).unwrap();
        assert!(load_history(&root).is_err());
        std::fs::remove_dir_all(&root).unwrap();
    }
}
