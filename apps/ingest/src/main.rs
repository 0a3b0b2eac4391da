//! Market Pulse ingestion: the "run ingestion now" entry point invoked by the
//! external scheduler.
//!
//! Commands:
//! - `prices`: fetch daily bars for the universe and stage one CSV per ticker
//! - `fundamentals`: fetch descriptive data and stage one aggregate CSV

mod config;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use market_pulse_core::constants::DEFAULT_LOOKBACK_DAYS;
use market_pulse_core::ingestion::{IngestionService, IngestionServiceTrait};
use market_pulse_core::logging::init_tracing;
use market_pulse_core::staging::ObjectSink;
use market_pulse_core::universe::Universe;
use market_pulse_market_data::YahooProvider;
use market_pulse_staging::{LocalObjectSink, S3ObjectSink, S3SinkConfig};

use config::{Config, SinkTarget};

#[derive(Parser)]
#[command(
    name = "market-pulse-ingest",
    about = "Stage daily stock data for the Market Pulse warehouse"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch daily bars for every ticker and stage one CSV per ticker.
    Prices {
        /// Days to look back from today (exclusive of today).
        #[arg(long, default_value_t = DEFAULT_LOOKBACK_DAYS)]
        days_back: u32,
    },
    /// Fetch the fundamentals snapshot and stage it as one CSV.
    Fundamentals,
}

async fn build_sink(target: SinkTarget) -> Result<Arc<dyn ObjectSink>> {
    let sink: Arc<dyn ObjectSink> = match target {
        SinkTarget::S3 { bucket, region } => Arc::new(
            S3ObjectSink::connect(S3SinkConfig { bucket, region })
                .await
                .context("Failed to build S3 client")?,
        ),
        SinkTarget::Local(dir) => Arc::new(LocalObjectSink::new(dir)),
    };
    Ok(sink)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;
    init_tracing();

    let provider = Arc::new(YahooProvider::new().context("Failed to build market data client")?);
    let sink = build_sink(config.sink).await?;
    tracing::info!("Staging objects to {}", sink.describe());
    let service = IngestionService::new(provider, sink, Universe::standard(), config.ingestion);

    match cli.command {
        Commands::Prices { days_back } => {
            let summary = service.ingest_stock_prices(days_back).await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Commands::Fundamentals => {
            let summary = service.refresh_fundamentals().await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }
    Ok(())
}
