//! # Classify the current regime from a snapshot file
//! market-regime analyze --data demos/snapshot.json
//!
//! # Same, with custom weights, as JSON
//! market-regime analyze --data demos/snapshot.json --config demos/regime.json --json
//!
//! # Print the default configuration
//! market-regime config

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use market_regime::{
    indicators::required_symbols, JsonFileSource, RegimeAnalyzer, RegimeConfig, SourceConfig,
};

#[derive(Parser)]
#[command(name = "market-regime")]
#[command(about = "Risk-on / risk-off market regime classifier")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score indicators and classify the regime
    Analyze {
        /// Path to price snapshot (JSON)
        #[arg(short, long)]
        data: PathBuf,

        /// Path to regime configuration (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Calendar days of history to keep per series
        #[arg(long, default_value_t = 180, value_parser = clap::value_parser!(i64).range(1..=36_500))]
        lookback_days: i64,

        /// Minimum observations for a series to be used
        #[arg(long, default_value_t = 21)]
        min_observations: usize,

        /// Print the result as JSON instead of the text report
        #[arg(long)]
        json: bool,
    },

    /// Print the default regime configuration
    Config,

    /// List the series the indicators read
    Symbols,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("market_regime=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            data,
            config,
            lookback_days,
            min_observations,
            json,
        } => {
            let config = match config {
                Some(path) => RegimeConfig::from_json_file(&path)
                    .with_context(|| format!("Invalid regime config {}", path.display()))?,
                None => RegimeConfig::default(),
            };

            let source = JsonFileSource::new(&data).with_config(SourceConfig {
                lookback_days,
                min_observations,
            });
            let result = RegimeAnalyzer::new(config)
                .run(&source)
                .with_context(|| format!("Failed to load snapshot {}", data.display()))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", result.summary());
            }
        }
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&RegimeConfig::default())?);
        }
        Commands::Symbols => {
            for symbol in required_symbols() {
                println!("{:10} {}", symbol.as_str(), symbol.ticker());
            }
        }
    }

    Ok(())
}
