mod commands;
mod history;
mod output;
mod settings;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use settings::{Settings, SimArgs};

#[derive(Parser)]
#[command(
    name = "strategy-mc",
    version,
    about = "Monte Carlo (GBM) projection of trading strategy performance"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// TOML settings file; command-line flags override its values
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate paths and print the final value distribution
    Run {
        /// CSV file, or directory of CSV files, with a `pnl_pct` or `close` column.
        /// Only CSV is read; convert Parquet history to CSV first
        input: PathBuf,
        #[command(flatten)]
        sim: SimArgs,
        /// Write the simulated path matrix to this CSV file
        #[arg(long)]
        paths_out: Option<PathBuf>,
        /// Currency symbol for the report
        #[arg(long)]
        currency: Option<String>,
    },
    /// Print the drift and volatility calibrated from history
    Calibrate {
        /// CSV file, or directory of CSV files, with a `pnl_pct` or `close` column.
        /// Only CSV is read; convert Parquet history to CSV first
        input: PathBuf,
        /// Volatility stress factor applied to the calibrated sigma
        #[arg(long)]
        vol_multiplier: Option<f64>,
    },
    /// Run the simulation under several volatility multipliers in parallel
    Stress {
        /// CSV file, or directory of CSV files, with a `pnl_pct` or `close` column.
        /// Only CSV is read; convert Parquet history to CSV first
        input: PathBuf,
        #[command(flatten)]
        sim: SimArgs,
        /// Comma-separated volatility multipliers, e.g. 0.8,1.0,1.2
        #[arg(long, value_delimiter = ',')]
        multipliers: Option<Vec<f64>>,
        /// Number of parallel workers (0 = auto)
        #[arg(long)]
        workers: Option<usize>,
        /// Currency symbol for the report
        #[arg(long)]
        currency: Option<String>,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Run {
            input,
            sim,
            paths_out,
            currency,
        } => commands::run::run(
            &input,
            sim.apply(&settings.simulation),
            paths_out.as_deref(),
            &settings.currency(currency.as_deref()),
        ),
        Commands::Calibrate {
            input,
            vol_multiplier,
        } => commands::calibrate::run(
            &input,
            vol_multiplier.unwrap_or(settings.simulation.volatility_multiplier),
        ),
        Commands::Stress {
            input,
            sim,
            multipliers,
            workers,
            currency,
        } => commands::stress::run(
            &input,
            sim.apply(&settings.simulation),
            multipliers.or_else(|| settings.stress_multipliers.clone()),
            workers.or(settings.workers).unwrap_or(0),
            &settings.currency(currency.as_deref()),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_input_help_names_csv_only() {
        let mut cli = Cli::command();
        for name in ["run", "calibrate", "stress"] {
            let help = cli
                .find_subcommand_mut(name)
                .unwrap()
                .render_help()
                .to_string();
            assert!(help.contains("Parquet"), "{}", help);
        }
    }

    #[test]
    fn test_stress_without_multipliers_parses_to_none() {
        let cli = Cli::try_parse_from(["strategy-mc", "stress", "history.csv"]).unwrap();
        match cli.command {
            Commands::Stress { multipliers, .. } => assert!(multipliers.is_none()),
            _ => panic!("expected stress subcommand"),
        }
    }
}
