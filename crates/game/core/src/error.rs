//! Common error infrastructure for game-core.
//!
//! Every rejected operation is reported before any state is touched, so a
//! caller that receives an error can assume the controller and the
//! combatants involved are exactly as they were before the call.
//!
//! # Design Principles
//!
//! - **Type Safety**: one error enum for the controller, one wrapper for
//!   rejected expedition starts that hands the moved values back
//! - **Rich Context**: errors name the operation, phase, or field involved
//! - **Severity Classification**: errors are categorized for recovery strategies

use crate::combatant::Combatant;
use crate::engine::ExpeditionPhase;

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The same call may succeed later without changes.
    ///
    /// Examples: starting an expedition while another is still running
    Recoverable,

    /// Invalid input, should not retry without changes.
    ///
    /// Examples: negative time step, retreat threshold above 1
    Validation,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all game-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a stable snake_case identifier for this error variant.
    fn error_code(&self) -> &'static str;
}

/// Controller operations that can be rejected because of the current phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Operation {
    StartExpedition,
    ForceRetreat,
}

/// Errors surfaced by the expedition controller and combatant constructors.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ExpeditionError {
    #[error("cannot {operation} while {phase}")]
    InvalidState {
        operation: Operation,
        phase: ExpeditionPhase,
    },

    #[error("invalid {field}: {reason}")]
    InvalidArgument { field: &'static str, reason: String },
}

impl ExpeditionError {
    pub fn invalid_state(operation: Operation, phase: ExpeditionPhase) -> Self {
        Self::InvalidState { operation, phase }
    }

    pub fn invalid_argument(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field,
            reason: reason.into(),
        }
    }
}

impl GameError for ExpeditionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidState { .. } => ErrorSeverity::Recoverable,
            Self::InvalidArgument { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidState { .. } => "invalid_state",
            Self::InvalidArgument { .. } => "invalid_argument",
        }
    }
}

/// A refused `start_expedition` call.
///
/// The ally and opponents were moved into the call; they are handed back
/// here untouched so the caller never loses a long-lived combatant.
#[derive(Debug, thiserror::Error)]
#[error("expedition not started: {error}")]
pub struct StartRejected {
    error: ExpeditionError,
    ally: Box<Combatant>,
    opponents: Vec<Combatant>,
}

impl StartRejected {
    pub(crate) fn new(error: ExpeditionError, ally: Combatant, opponents: Vec<Combatant>) -> Self {
        Self {
            error,
            ally: Box::new(ally),
            opponents,
        }
    }

    /// The reason the expedition was refused.
    pub fn error(&self) -> &ExpeditionError {
        &self.error
    }

    /// The ally that was passed in.
    pub fn ally(&self) -> &Combatant {
        &self.ally
    }

    /// Splits the rejection into the error and the returned combatants.
    pub fn into_parts(self) -> (ExpeditionError, Combatant, Vec<Combatant>) {
        (self.error, *self.ally, self.opponents)
    }
}

impl GameError for StartRejected {
    fn severity(&self) -> ErrorSeverity {
        self.error.severity()
    }

    fn error_code(&self) -> &'static str {
        self.error.error_code()
    }
}
