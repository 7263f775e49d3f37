//! Notifications produced by the expedition controller.
//!
//! Events are queued while an operation runs and only delivered after the
//! controller has committed its new state. A listener therefore always sees
//! a finished transition and never runs while a tick is half applied.
//!
//! Each event belongs to a [`Topic`] so consumers can subscribe to just the
//! part of the stream they render or reward:
//! - [`Topic::State`]: phase transitions
//! - [`Topic::Log`]: human-readable narration
//! - [`Topic::Combat`]: health changes and deaths
//! - [`Topic::Progress`]: defeated opponents and expedition completion

mod listener;

pub use listener::{ExpeditionListener, ListenerRegistry};

use crate::combatant::{Combatant, HealthChange};
use crate::engine::ExpeditionPhase;

/// Topics for event routing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Topic {
    State,
    Log,
    Combat,
    Progress,
}

impl Topic {
    pub const ALL: &'static [Topic] = &[Topic::State, Topic::Log, Topic::Combat, Topic::Progress];
}

/// Which side of an encounter a combatant fights on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Side {
    Ally,
    Opponent,
}

/// How an expedition ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ExpeditionOutcome {
    /// Every queued opponent was defeated.
    Victory,
    /// The ally withdrew, either below its retreat threshold or on request.
    Retreated,
    /// The ally was reduced to zero health.
    Fallen,
}

/// Summary attached to the expedition-completed notification.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExpeditionSummary {
    pub outcome: ExpeditionOutcome,
    /// Opponents defeated during the expedition.
    pub defeated: usize,
    /// Opponents left unfought, including one abandoned mid-fight.
    pub abandoned: usize,
    /// Simulated seconds spent fighting.
    pub elapsed_seconds: f64,
}

/// Events emitted by the controller.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ExpeditionEvent {
    /// The controller entered a new phase.
    StateChanged { phase: ExpeditionPhase },

    /// A narration line for the combat log.
    LogUpdated { message: String },

    /// A combatant's health changed.
    HealthChanged {
        side: Side,
        name: String,
        change: HealthChange,
    },

    /// A combatant's health reached zero. Emitted once per combatant.
    CombatantDied { side: Side, name: String },

    /// An opponent was defeated. Ownership of the opponent passes to the consumer.
    OpponentDefeated { opponent: Combatant },

    /// The expedition ended; the ally now regenerates or retreats home.
    ExpeditionCompleted { summary: ExpeditionSummary },
}

impl ExpeditionEvent {
    pub fn topic(&self) -> Topic {
        match self {
            Self::StateChanged { .. } => Topic::State,
            Self::LogUpdated { .. } => Topic::Log,
            Self::HealthChanged { .. } | Self::CombatantDied { .. } => Topic::Combat,
            Self::OpponentDefeated { .. } | Self::ExpeditionCompleted { .. } => Topic::Progress,
        }
    }
}
