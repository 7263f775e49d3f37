//! Update driver: feeds time into an [`ExpeditionController`].
//!
//! Two modes share the same stepping rules:
//! - [`Driver::run`] steps as fast as possible, one fixed step per update.
//! - [`Driver::run_realtime`] paces updates with a tokio interval and feeds
//!   the measured wall-clock time, split into steps no longer than the
//!   configured one.
//!
//! Both stop when the controller is idle again or the step limit is hit.

use std::time::Duration;

use anyhow::{Result, bail};
use game_core::{ExpeditionController, ExpeditionEvent, ExpeditionPhase, ExpeditionSummary};
use tokio::time::{Instant, MissedTickBehavior};

/// What a driving run accomplished.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DriveReport {
    /// Number of `update` calls made.
    pub steps: u64,
    pub simulated_seconds: f64,
    /// Summary of the completed expedition, if it completed.
    pub summary: Option<ExpeditionSummary>,
    /// The controller returned to idle before the step limit.
    pub finished: bool,
}

impl DriveReport {
    fn observe(&mut self, controller: &mut ExpeditionController) {
        for event in controller.drain_events() {
            if let ExpeditionEvent::ExpeditionCompleted { summary } = event {
                self.summary = Some(summary);
            }
        }
        self.finished = controller.phase() == ExpeditionPhase::Idle;
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Driver {
    step_seconds: f64,
    max_steps: u64,
}

impl Driver {
    pub fn new(step_seconds: f64, max_steps: u64) -> Result<Self> {
        if !step_seconds.is_finite() || step_seconds <= 0.0 {
            bail!("step must be a positive number of seconds, got {step_seconds}");
        }
        Ok(Self {
            step_seconds,
            max_steps,
        })
    }

    pub fn step_seconds(&self) -> f64 {
        self.step_seconds
    }

    /// Steps the controller until it is idle again.
    pub fn run(&self, controller: &mut ExpeditionController) -> Result<DriveReport> {
        let mut report = DriveReport::default();
        report.observe(controller);

        while !report.finished && report.steps < self.max_steps {
            controller.update(self.step_seconds)?;
            report.steps += 1;
            report.simulated_seconds += self.step_seconds;
            report.observe(controller);
        }

        if !report.finished {
            tracing::warn!(
                steps = report.steps,
                phase = %controller.phase(),
                "step limit reached before the expedition finished"
            );
        }
        Ok(report)
    }

    /// Like [`run`](Self::run), but paced by wall-clock time.
    ///
    /// Ctrl-C calls the ally back: the fight is abandoned with a retreat and
    /// the driver keeps stepping until regeneration finishes.
    pub async fn run_realtime(&self, controller: &mut ExpeditionController) -> Result<DriveReport> {
        let mut report = DriveReport::default();
        report.observe(controller);

        let mut interval = tokio::time::interval(Duration::from_secs_f64(self.step_seconds));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        interval.tick().await;
        let mut last = Instant::now();
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);
        let mut interrupted = false;

        while !report.finished && report.steps < self.max_steps {
            tokio::select! {
                now = interval.tick() => {
                    let dt = now.duration_since(last).as_secs_f64();
                    last = now;
                    self.advance(controller, dt, &mut report)?;
                }
                result = &mut ctrl_c, if !interrupted => {
                    result?;
                    interrupted = true;
                    match controller.force_retreat() {
                        Ok(()) => tracing::info!("Recall requested, retreating"),
                        Err(error) => tracing::warn!(%error, "recall ignored"),
                    }
                    report.observe(controller);
                }
            }
        }
        Ok(report)
    }

    /// Applies `dt` seconds in chunks no longer than one step.
    fn advance(
        &self,
        controller: &mut ExpeditionController,
        dt: f64,
        report: &mut DriveReport,
    ) -> Result<()> {
        let mut remaining = dt;
        while remaining > 0.0 && !report.finished && report.steps < self.max_steps {
            let chunk = remaining.min(self.step_seconds);
            controller.update(chunk)?;
            remaining -= chunk;
            report.steps += 1;
            report.simulated_seconds += chunk;
            report.observe(controller);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{Combatant, ExpeditionOutcome};

    fn controller_with(opponents: Vec<Combatant>) -> ExpeditionController {
        let mut controller = ExpeditionController::new();
        controller
            .start_expedition(Combatant::new("Aria", 100, 10.0).unwrap(), opponents)
            .unwrap();
        controller
    }

    #[test]
    fn rejects_non_positive_step() {
        assert!(Driver::new(0.0, 10).is_err());
        assert!(Driver::new(f64::NAN, 10).is_err());
        assert!(Driver::new(0.5, 10).is_ok());
    }

    #[test]
    fn runs_until_idle() {
        let mut controller = controller_with(vec![Combatant::new("Rat", 30, 2.0).unwrap()]);
        let report = Driver::new(1.0, 100).unwrap().run(&mut controller).unwrap();

        assert!(report.finished);
        assert_eq!(controller.phase(), ExpeditionPhase::Idle);
        let summary = report.summary.unwrap();
        assert_eq!(summary.outcome, ExpeditionOutcome::Victory);
        assert_eq!(summary.defeated, 1);
        assert!(controller.take_returned_ally().is_some());
    }

    #[test]
    fn stops_at_step_limit() {
        let mut controller = controller_with(vec![Combatant::new("Wall", 10_000, 0.0).unwrap()]);
        let report = Driver::new(1.0, 5).unwrap().run(&mut controller).unwrap();

        assert!(!report.finished);
        assert_eq!(report.steps, 5);
        assert!(report.summary.is_none());
        assert_eq!(controller.phase(), ExpeditionPhase::Fighting);
    }

    #[test]
    fn advance_splits_long_intervals() {
        let mut controller = controller_with(vec![Combatant::new("Wall", 10_000, 0.0).unwrap()]);
        let driver = Driver::new(0.5, 100).unwrap();
        let mut report = DriveReport::default();

        driver.advance(&mut controller, 1.75, &mut report).unwrap();

        assert_eq!(report.steps, 4);
        assert!((report.simulated_seconds - 1.75).abs() < 1e-9);
        assert_eq!(
            controller.current_opponent().map(Combatant::current_health),
            Some(10_000 - 17)
        );
    }

    #[tokio::test]
    async fn realtime_mode_finishes() {
        let mut controller = controller_with(vec![Combatant::new("Rat", 1, 0.0).unwrap()]);
        let report = Driver::new(0.01, 10_000)
            .unwrap()
            .run_realtime(&mut controller)
            .await
            .unwrap();

        assert!(report.finished);
        assert_eq!(
            report.summary.map(|summary| summary.outcome),
            Some(ExpeditionOutcome::Victory)
        );
    }
}
