//! Expedition state machine and per-tick simulation.
//!
//! The [`ExpeditionController`] owns the ally for the duration of an
//! expedition, the queue of opponents, and the active engagement. An
//! external driver calls [`ExpeditionController::update`] once per time step.
//!
//! Every public operation follows the same shape:
//! 1. validate, returning an error before anything changes
//! 2. move the current state out of the controller into locals
//! 3. compute and commit the next state, queueing events along the way
//! 4. deliver the queued events to listeners
//!
//! Because the state is moved out before it is mutated and events are only
//! delivered after the commit, no notification can observe or alter a half
//! applied tick. A death during the ally's strike is seen in the returned
//! [`HealthChange`](crate::HealthChange), and the next encounter starts
//! within the same `update` call.

mod exchange;
mod state;

pub use state::ExpeditionPhase;

use std::collections::VecDeque;
use std::mem;

use crate::combatant::{Combatant, HealthChange};
use crate::encounter::{EncounterProgress, EncounterQueue};
use crate::error::{ExpeditionError, Operation, StartRejected};
use crate::events::{
    ExpeditionEvent, ExpeditionListener, ExpeditionOutcome, ExpeditionSummary, ListenerRegistry,
    Side,
};

use exchange::{ExchangeReport, resolve_exchange};
use state::{Engagement, ExpeditionState};

/// Drives one ally through an ordered queue of opponents.
///
/// Lifecycle: `Idle → Traveling → Fighting → (Retreating →) Regenerating → Idle`.
#[derive(Debug)]
pub struct ExpeditionController {
    state: ExpeditionState,
    queue: EncounterQueue,
    /// Events produced by the operation currently running.
    outbox: Vec<ExpeditionEvent>,
    /// Delivered events kept for [`drain_events`](Self::drain_events).
    backlog: VecDeque<ExpeditionEvent>,
    retain_events: bool,
    listeners: ListenerRegistry,
    /// Ally handed back when the last expedition finished regenerating.
    returned_ally: Option<Combatant>,
    defeated: usize,
    elapsed_seconds: f64,
}

impl ExpeditionController {
    pub fn new() -> Self {
        Self {
            state: ExpeditionState::Idle,
            queue: EncounterQueue::new(),
            outbox: Vec::new(),
            backlog: VecDeque::new(),
            retain_events: true,
            listeners: ListenerRegistry::new(),
            returned_ally: None,
            defeated: 0,
            elapsed_seconds: 0.0,
        }
    }

    // ===== observers =====

    pub fn phase(&self) -> ExpeditionPhase {
        self.state.phase()
    }

    /// The ally currently on an expedition. `None` while idle.
    pub fn current_ally(&self) -> Option<&Combatant> {
        self.state.ally()
    }

    /// The opponent being fought. `Some` exactly while fighting.
    pub fn current_opponent(&self) -> Option<&Combatant> {
        self.state.opponent()
    }

    pub fn is_in_combat(&self) -> bool {
        matches!(self.state, ExpeditionState::Fighting(_))
    }

    /// True while opponents are still waiting in the queue (not counting the current one).
    pub fn has_opponents_remaining(&self) -> bool {
        !self.queue.is_empty()
    }

    pub fn remaining_opponents(&self) -> impl Iterator<Item = &Combatant> + '_ {
        self.queue.iter()
    }

    pub fn progress(&self) -> EncounterProgress {
        EncounterProgress {
            defeated: self.defeated,
            remaining: self.queue.len(),
            total: self.queue.total(),
        }
    }

    /// Takes back the ally of the last expedition once it is idle again.
    ///
    /// Only the most recent ally is kept; collect it before the next
    /// expedition finishes or it is dropped with a warning.
    pub fn take_returned_ally(&mut self) -> Option<Combatant> {
        self.returned_ally.take()
    }

    // ===== event delivery =====

    /// Registers a listener for events produced from now on.
    pub fn subscribe(&mut self, listener: impl ExpeditionListener + 'static) {
        self.listeners.register(Box::new(listener));
    }

    /// Chooses whether delivered events are also kept for [`drain_events`](Self::drain_events).
    ///
    /// Retention is on by default. Hosts that rely only on listeners should
    /// turn it off so the backlog does not grow without bound.
    pub fn set_event_retention(&mut self, retain: bool) {
        self.retain_events = retain;
        if !retain {
            self.backlog.clear();
        }
    }

    /// Removes and returns all retained events, oldest first.
    pub fn drain_events(&mut self) -> Vec<ExpeditionEvent> {
        self.backlog.drain(..).collect()
    }

    // ===== operations =====

    /// Starts an expedition with `ally` against `opponents`, fought in order.
    ///
    /// Only allowed while idle, and only with a living ally. On rejection
    /// nothing changes and both arguments are returned inside the error.
    /// With an empty queue the expedition completes immediately.
    pub fn start_expedition(
        &mut self,
        ally: Combatant,
        opponents: impl IntoIterator<Item = Combatant>,
    ) -> Result<(), StartRejected> {
        let opponents: Vec<Combatant> = opponents.into_iter().collect();

        if !matches!(self.state, ExpeditionState::Idle) {
            let error = ExpeditionError::invalid_state(Operation::StartExpedition, self.phase());
            tracing::debug!(%error, "expedition start rejected");
            return Err(StartRejected::new(error, ally, opponents));
        }
        if !ally.is_alive() {
            let error = ExpeditionError::invalid_argument(
                "ally",
                format!("{} has no health left", ally.name()),
            );
            tracing::debug!(%error, "expedition start rejected");
            return Err(StartRejected::new(error, ally, opponents));
        }

        self.queue.load(opponents);
        self.defeated = 0;
        self.elapsed_seconds = 0.0;

        let message = format!(
            "{} sets out against {} opponent(s)",
            ally.name(),
            self.queue.len()
        );
        self.transition(ExpeditionState::Traveling { ally });
        self.log(message);

        if let ExpeditionState::Traveling { ally } = self.take_state() {
            self.advance(ally);
        }

        self.flush();
        Ok(())
    }

    /// Advances the simulation by `dt` seconds.
    ///
    /// `dt` must be finite and non-negative. Idle and traveling controllers
    /// ignore the call. A large `dt` is applied in one exchange.
    pub fn update(&mut self, dt: f64) -> Result<(), ExpeditionError> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(ExpeditionError::invalid_argument(
                "dt",
                format!("must be a finite, non-negative number of seconds, got {dt}"),
            ));
        }

        match self.take_state() {
            idle @ (ExpeditionState::Idle | ExpeditionState::Traveling { .. }) => {
                self.state = idle;
            }
            ExpeditionState::Fighting(engagement) => {
                self.elapsed_seconds += dt;
                self.fight(engagement, dt);
            }
            ExpeditionState::Retreating { ally, abandoned } => self.withdraw(ally, abandoned),
            ExpeditionState::Regenerating { ally } => self.regenerate(ally),
        }

        self.flush();
        Ok(())
    }

    /// Abandons the current fight and heads home.
    ///
    /// Allowed only while traveling or fighting; otherwise rejected with the
    /// state left unchanged.
    pub fn force_retreat(&mut self) -> Result<(), ExpeditionError> {
        match self.take_state() {
            ExpeditionState::Fighting(engagement) => {
                self.log(format!(
                    "{} is called back from the fight with {}",
                    engagement.ally.name(),
                    engagement.opponent.name()
                ));
                self.retreat(
                    engagement.ally,
                    Some(engagement.opponent),
                    ExpeditionOutcome::Retreated,
                );
            }
            ExpeditionState::Traveling { ally } => {
                self.log(format!("{} turns back before the first fight", ally.name()));
                self.retreat(ally, None, ExpeditionOutcome::Retreated);
            }
            other => {
                let phase = other.phase();
                self.state = other;
                return Err(ExpeditionError::invalid_state(Operation::ForceRetreat, phase));
            }
        }

        self.flush();
        Ok(())
    }

    /// Returns to idle from any phase without completing the expedition.
    ///
    /// Clears the queue and the opponent, and hands back the ally: the one on
    /// the expedition, or else one waiting in [`take_returned_ally`](Self::take_returned_ally).
    pub fn reset(&mut self) -> Option<Combatant> {
        let previous = self.take_state();
        let phase = previous.phase();
        let discarded = self.queue.reset();
        self.defeated = 0;
        self.elapsed_seconds = 0.0;

        if phase != ExpeditionPhase::Idle {
            tracing::debug!(from = %phase, discarded, "expedition reset");
            self.log(format!("Expedition reset during {phase}"));
            self.emit(ExpeditionEvent::StateChanged {
                phase: ExpeditionPhase::Idle,
            });
        }

        self.flush();
        previous.into_ally().or_else(|| self.returned_ally.take())
    }

    // ===== per-phase behavior =====

    /// Dequeues the next opponent, or ends the expedition victoriously.
    fn advance(&mut self, ally: Combatant) {
        match self.queue.dequeue() {
            Some(opponent) => {
                self.log(format!("{} encounters {}", ally.name(), opponent.name()));
                self.transition(ExpeditionState::Fighting(Engagement::new(ally, opponent)));
            }
            None => {
                self.log(format!("{} cleared every encounter", ally.name()));
                self.transition(ExpeditionState::Regenerating { ally });
                self.complete(ExpeditionOutcome::Victory, 0);
            }
        }
    }

    fn fight(&mut self, mut engagement: Engagement, dt: f64) {
        if !engagement.ally.is_alive() {
            self.log(format!("{} has fallen", engagement.ally.name()));
            self.retreat(engagement.ally, Some(engagement.opponent), ExpeditionOutcome::Fallen);
            return;
        }
        if engagement.ally.should_retreat() {
            self.log(format!(
                "{} is {} and retreats from {}",
                engagement.ally.name(),
                engagement.ally.health_band(),
                engagement.opponent.name()
            ));
            self.retreat(
                engagement.ally,
                Some(engagement.opponent),
                ExpeditionOutcome::Retreated,
            );
            return;
        }

        let report = resolve_exchange(&mut engagement, dt);
        self.record_exchange(&engagement, report);

        if !engagement.ally.is_alive() {
            self.log(format!(
                "{} has fallen to {}",
                engagement.ally.name(),
                engagement.opponent.name()
            ));
            self.retreat(engagement.ally, Some(engagement.opponent), ExpeditionOutcome::Fallen);
            return;
        }

        if !engagement.opponent.is_alive() {
            let Engagement { ally, opponent, .. } = engagement;
            self.defeated += 1;
            self.log(format!("{} defeated {}", ally.name(), opponent.name()));
            self.emit(ExpeditionEvent::OpponentDefeated { opponent });
            self.advance(ally);
            return;
        }

        self.state = ExpeditionState::Fighting(engagement);
    }

    /// Enters `Retreating` and reports the expedition as complete.
    fn retreat(
        &mut self,
        ally: Combatant,
        abandoned: Option<Combatant>,
        outcome: ExpeditionOutcome,
    ) {
        let left_behind = self.queue.len() + usize::from(abandoned.is_some());
        self.transition(ExpeditionState::Retreating { ally, abandoned });
        self.complete(outcome, left_behind);
    }

    /// Releases whatever the ally walked away from and starts recovering.
    fn withdraw(&mut self, ally: Combatant, abandoned: Option<Combatant>) {
        let released = self.queue.clear() + usize::from(abandoned.is_some());
        if released > 0 {
            self.log(format!("{released} opponent(s) left behind"));
        }
        self.transition(ExpeditionState::Regenerating { ally });
    }

    fn regenerate(&mut self, mut ally: Combatant) {
        if let Some(change) = ally.regenerate_health() {
            self.record_health(Side::Ally, ally.name(), change);
        }

        if ally.is_full_health() {
            self.log(format!("{} is fully rested", ally.name()));
            self.transition(ExpeditionState::Idle);
            if let Some(previous) = self.returned_ally.replace(ally) {
                tracing::warn!(
                    ally = previous.name(),
                    "dropping returned ally that was never taken"
                );
            }
        } else {
            self.state = ExpeditionState::Regenerating { ally };
        }
    }

    // ===== helpers =====

    /// Moves the state out, leaving `Idle` until the caller commits a new one.
    fn take_state(&mut self) -> ExpeditionState {
        mem::take(&mut self.state)
    }

    fn transition(&mut self, next: ExpeditionState) {
        let phase = next.phase();
        tracing::debug!(to = %phase, "expedition transition");
        self.state = next;
        self.emit(ExpeditionEvent::StateChanged { phase });
    }

    fn complete(&mut self, outcome: ExpeditionOutcome, abandoned: usize) {
        let summary = ExpeditionSummary {
            outcome,
            defeated: self.defeated,
            abandoned,
            elapsed_seconds: self.elapsed_seconds,
        };
        tracing::debug!(%outcome, defeated = summary.defeated, abandoned, "expedition completed");
        self.emit(ExpeditionEvent::ExpeditionCompleted { summary });
    }

    fn record_exchange(&mut self, engagement: &Engagement, report: ExchangeReport) {
        if let Some(change) = report.strike {
            self.log(format!(
                "{} hits {} for {} ({}/{})",
                engagement.ally.name(),
                engagement.opponent.name(),
                -change.delta(),
                change.new,
                change.max
            ));
            self.record_health(Side::Opponent, engagement.opponent.name(), change);
        }
        if let Some(change) = report.counter {
            self.log(format!(
                "{} hits {} for {} ({}/{})",
                engagement.opponent.name(),
                engagement.ally.name(),
                -change.delta(),
                change.new,
                change.max
            ));
            self.record_health(Side::Ally, engagement.ally.name(), change);
        }
    }

    fn record_health(&mut self, side: Side, name: &str, change: HealthChange) {
        tracing::trace!(%side, name, old = change.old, new = change.new, "health changed");
        self.emit(ExpeditionEvent::HealthChanged {
            side,
            name: name.to_owned(),
            change,
        });
        if change.died {
            self.emit(ExpeditionEvent::CombatantDied {
                side,
                name: name.to_owned(),
            });
        }
    }

    fn log(&mut self, message: String) {
        tracing::debug!(target: "expedition::log", "{message}");
        self.emit(ExpeditionEvent::LogUpdated { message });
    }

    fn emit(&mut self, event: ExpeditionEvent) {
        self.outbox.push(event);
    }

    /// Delivers the events of the finished operation.
    fn flush(&mut self) {
        for event in self.outbox.drain(..) {
            self.listeners.dispatch(&event);
            if self.retain_events {
                self.backlog.push_back(event);
            }
        }
    }
}

impl Default for ExpeditionController {
    fn default() -> Self {
        Self::new()
    }
}
