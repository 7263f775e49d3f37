//! Deterministic auto-combat rules for unattended expeditions.
//!
//! `game-core` drives a single ally through an ordered queue of opponents in
//! discrete time steps. It owns no timers and performs no I/O: a host calls
//! [`ExpeditionController::update`] at whatever cadence it likes and consumes
//! the resulting [`ExpeditionEvent`]s.
//!
//! Modules are organized by responsibility:
//! - [`combatant`] holds health, damage, and regeneration for one entity
//! - [`combat`] converts damage-per-second into whole damage without drift
//! - [`encounter`] keeps the FIFO of opponents still to be fought
//! - [`engine`] hosts the expedition state machine
//! - [`events`] defines notifications and the listener registry
pub mod combat;
pub mod combatant;
pub mod config;
pub mod encounter;
pub mod engine;
pub mod error;
pub mod events;

pub use combat::DamageCarry;
pub use combatant::{Combatant, HealthBand, HealthChange, Regeneration};
pub use config::ExpeditionConfig;
pub use encounter::{EncounterProgress, EncounterQueue};
pub use engine::{ExpeditionController, ExpeditionPhase};
pub use error::{ErrorSeverity, ExpeditionError, GameError, Operation, StartRejected};
pub use events::{
    ExpeditionEvent, ExpeditionListener, ExpeditionOutcome, ExpeditionSummary, ListenerRegistry,
    Side, Topic,
};
