//! Controller phases and the data each one carries.

use crate::combat::DamageCarry;
use crate::combatant::Combatant;

/// Externally observable lifecycle phase of an expedition.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExpeditionPhase {
    /// No expedition. Initial phase and the end of every cycle.
    #[default]
    Idle,
    /// The expedition has begun; no encounter has started yet.
    Traveling,
    /// Ally and opponent are engaged.
    Fighting,
    /// The ally is withdrawing; remaining opponents are about to be released.
    Retreating,
    /// The ally is recovering health before returning to idle.
    Regenerating,
}

/// A fight in progress: both combatants and their damage carries.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Engagement {
    pub ally: Combatant,
    pub opponent: Combatant,
    pub ally_carry: DamageCarry,
    pub opponent_carry: DamageCarry,
}

impl Engagement {
    /// Starts a fresh encounter with both carries at zero.
    pub fn new(ally: Combatant, opponent: Combatant) -> Self {
        Self {
            ally,
            opponent,
            ally_carry: DamageCarry::new(),
            opponent_carry: DamageCarry::new(),
        }
    }
}

/// Controller state. Combatants live inside the variant that uses them, so an
/// opponent exists exactly when the controller is fighting.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) enum ExpeditionState {
    #[default]
    Idle,
    Traveling {
        ally: Combatant,
    },
    Fighting(Engagement),
    Retreating {
        ally: Combatant,
        /// Opponent the ally turned away from, released on the next update.
        abandoned: Option<Combatant>,
    },
    Regenerating {
        ally: Combatant,
    },
}

impl ExpeditionState {
    pub fn phase(&self) -> ExpeditionPhase {
        match self {
            Self::Idle => ExpeditionPhase::Idle,
            Self::Traveling { .. } => ExpeditionPhase::Traveling,
            Self::Fighting(_) => ExpeditionPhase::Fighting,
            Self::Retreating { .. } => ExpeditionPhase::Retreating,
            Self::Regenerating { .. } => ExpeditionPhase::Regenerating,
        }
    }

    pub fn ally(&self) -> Option<&Combatant> {
        match self {
            Self::Idle => None,
            Self::Traveling { ally }
            | Self::Retreating { ally, .. }
            | Self::Regenerating { ally } => Some(ally),
            Self::Fighting(engagement) => Some(&engagement.ally),
        }
    }

    pub fn opponent(&self) -> Option<&Combatant> {
        match self {
            Self::Fighting(engagement) => Some(&engagement.opponent),
            _ => None,
        }
    }

    /// Consumes the state, keeping only the ally.
    pub fn into_ally(self) -> Option<Combatant> {
        match self {
            Self::Idle => None,
            Self::Traveling { ally }
            | Self::Retreating { ally, .. }
            | Self::Regenerating { ally } => Some(ally),
            Self::Fighting(engagement) => Some(engagement.ally),
        }
    }
}
