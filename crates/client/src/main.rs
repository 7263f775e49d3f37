//! Expedition client binary.
//!
//! Runs one roster from the content directory and narrates it to stderr.
//!
//! # Examples
//!
//! ```bash
//! # Bundled forest road roster, as fast as possible
//! cargo run -p expedition-client
//!
//! # Watch the goblin warren in real time, with a JSON event stream on stdout
//! EXPEDITION_ROSTER=goblin_warren EXPEDITION_REALTIME=1 EXPEDITION_EVENTS_JSON=1 \
//!     cargo run -p expedition-client
//! ```

use anyhow::Result;
use expedition_client::{ClientConfig, logging};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // 1. Load configuration from environment
    let config = ClientConfig::from_env();

    // 2. Setup logging
    let _guard = logging::setup_logging(&config)?;

    tracing::info!("Starting expedition client");
    tracing::info!("Real-time: {}", config.realtime);

    // 3. Run the expedition
    let report = expedition_client::run(&config).await?;

    match &report.summary {
        Some(summary) => tracing::info!(
            "Finished: {} ({} defeated, {} abandoned) in {} steps",
            summary.outcome,
            summary.defeated,
            summary.abandoned,
            report.steps
        ),
        None => tracing::warn!("Expedition unfinished after {} steps", report.steps),
    }

    Ok(())
}
