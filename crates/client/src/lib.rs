//! Expedition client: loads content, wires listeners, and drives the controller.
//!
//! # Architecture
//!
//! ```text
//! main (composition root)
//!   ├─→ ClientConfig      (environment)
//!   ├─→ logging           (tracing subscriber + file appender)
//!   ├─→ ContentFactory    (config.toml + rosters/*.ron)
//!   ├─→ ExpeditionController + listeners (Narrator, JsonLines)
//!   └─→ Driver            (fixed-step or real-time update loop)
//! ```

pub mod config;
pub mod dirs;
pub mod driver;
pub mod logging;
pub mod narrator;

pub use config::ClientConfig;
pub use driver::{DriveReport, Driver};
pub use narrator::{JsonLines, Narrator};

use anyhow::Result;
use game_content::ContentFactory;
use game_core::ExpeditionController;

/// Runs one expedition described by `config` to completion.
pub async fn run(config: &ClientConfig) -> Result<DriveReport> {
    let data_dir = config
        .data_dir
        .clone()
        .unwrap_or_else(dirs::bundled_data_dir);
    tracing::debug!("Loading content from {}", data_dir.display());

    let content = ContentFactory::new(data_dir);
    let expedition_config = content.load_config()?;
    let roster = content.load_roster(&config.roster, &expedition_config)?;

    let step_seconds = config.step_seconds.unwrap_or(expedition_config.step_seconds);
    let driver = Driver::new(step_seconds, config.max_steps)?;

    let mut controller = ExpeditionController::new();
    controller.subscribe(Narrator);
    if config.events_json {
        controller.subscribe(JsonLines::new(std::io::stdout()));
    }

    tracing::info!(
        "Roster '{}': {} against {} opponent(s), {}s per step",
        config.roster,
        roster.ally.name(),
        roster.opponents.len(),
        step_seconds
    );
    controller.start_expedition(roster.ally, roster.opponents)?;

    let report = if config.realtime {
        driver.run_realtime(&mut controller).await?
    } else {
        driver.run(&mut controller)?
    };

    if let Some(ally) = controller.take_returned_ally() {
        tracing::info!(
            "{} is home at {}/{} health",
            ally.name(),
            ally.current_health(),
            ally.max_health()
        );
    }
    Ok(report)
}
