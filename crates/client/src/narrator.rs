//! Listeners that present expedition events.

use std::io::Write;

use game_core::{ExpeditionEvent, ExpeditionListener, Topic};

/// Writes the combat log and expedition outcomes through `tracing`.
#[derive(Debug, Default)]
pub struct Narrator;

impl ExpeditionListener for Narrator {
    fn name(&self) -> &'static str {
        "narrator"
    }

    fn topics(&self) -> &[Topic] {
        &[Topic::Log, Topic::State, Topic::Progress]
    }

    fn on_event(&mut self, event: &ExpeditionEvent) {
        match event {
            ExpeditionEvent::LogUpdated { message } => {
                tracing::info!(target: "expedition", "{message}");
            }
            ExpeditionEvent::StateChanged { phase } => {
                tracing::debug!(%phase, "phase changed");
            }
            ExpeditionEvent::OpponentDefeated { opponent } => {
                tracing::debug!(opponent = opponent.name(), "opponent defeated");
            }
            ExpeditionEvent::ExpeditionCompleted { summary } => {
                tracing::info!(
                    target: "expedition",
                    outcome = %summary.outcome,
                    defeated = summary.defeated,
                    abandoned = summary.abandoned,
                    "Expedition over after {:.1}s of fighting",
                    summary.elapsed_seconds
                );
            }
            _ => {}
        }
    }
}

/// Streams every event as one JSON object per line.
pub struct JsonLines<W> {
    writer: W,
}

impl<W: Write> JsonLines<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_event(&mut self, event: &ExpeditionEvent) -> std::io::Result<()> {
        serde_json::to_writer(&mut self.writer, event)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}

impl<W: Write> ExpeditionListener for JsonLines<W> {
    fn name(&self) -> &'static str {
        "json-lines"
    }

    fn priority(&self) -> i32 {
        // after the narrator
        10
    }

    fn on_event(&mut self, event: &ExpeditionEvent) {
        if let Err(error) = self.write_event(event) {
            tracing::warn!(%error, "failed to write event");
        }
    }
}
