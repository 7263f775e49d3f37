//! Combatants: the passive health and damage holders that fight expeditions.
//!
//! A [`Combatant`] never calls back into anything. Every mutator returns a
//! [`HealthChange`] describing what happened, and the caller decides what to
//! announce. This keeps death handling out of the mutation itself: whoever
//! applies the damage sees `died` in the return value after the combatant
//! is already in its final state.

mod health;
mod regeneration;

pub use health::{HealthBand, HealthChange};
pub use regeneration::Regeneration;

use crate::config::ExpeditionConfig;
use crate::error::ExpeditionError;

/// An entity with health and damage-per-second participating in combat.
///
/// # Invariants
///
/// - `max_health > 0`
/// - `current_health <= max_health`
/// - `damage_per_second` is finite and non-negative
/// - `retreat_threshold` is finite and in `[0, 1]`
///
/// Fields are private so the invariants can only be established through the
/// validating constructors.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Combatant {
    name: String,
    max_health: u32,
    current_health: u32,
    damage_per_second: f64,
    retreat_threshold: f64,
    regeneration: Regeneration,
}

impl Combatant {
    /// Creates a combatant at full health with default retreat and regeneration settings.
    pub fn new(
        name: impl Into<String>,
        max_health: u32,
        damage_per_second: f64,
    ) -> Result<Self, ExpeditionError> {
        if max_health == 0 {
            return Err(ExpeditionError::invalid_argument(
                "max_health",
                "must be positive",
            ));
        }
        validate_damage_per_second(damage_per_second)?;

        Ok(Self {
            name: name.into(),
            max_health,
            current_health: max_health,
            damage_per_second,
            retreat_threshold: ExpeditionConfig::DEFAULT_RETREAT_THRESHOLD,
            regeneration: Regeneration::default(),
        })
    }

    /// Sets current health (builder pattern).
    pub fn with_current_health(mut self, current_health: u32) -> Result<Self, ExpeditionError> {
        if current_health > self.max_health {
            return Err(ExpeditionError::invalid_argument(
                "current_health",
                format!(
                    "{current_health} exceeds max health {}",
                    self.max_health
                ),
            ));
        }
        self.current_health = current_health;
        Ok(self)
    }

    /// Sets the retreat threshold fraction (builder pattern).
    pub fn with_retreat_threshold(mut self, threshold: f64) -> Result<Self, ExpeditionError> {
        validate_retreat_threshold(threshold)?;
        self.retreat_threshold = threshold;
        Ok(self)
    }

    /// Sets the regeneration policy (builder pattern).
    pub fn with_regeneration(mut self, regeneration: Regeneration) -> Result<Self, ExpeditionError> {
        regeneration.validate()?;
        self.regeneration = regeneration;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn max_health(&self) -> u32 {
        self.max_health
    }

    pub const fn current_health(&self) -> u32 {
        self.current_health
    }

    pub const fn damage_per_second(&self) -> f64 {
        self.damage_per_second
    }

    pub const fn retreat_threshold(&self) -> f64 {
        self.retreat_threshold
    }

    pub const fn regeneration(&self) -> Regeneration {
        self.regeneration
    }

    pub const fn is_alive(&self) -> bool {
        self.current_health > 0
    }

    pub const fn is_full_health(&self) -> bool {
        self.current_health == self.max_health
    }

    /// Current health as a fraction of maximum, in `[0, 1]`.
    pub fn health_fraction(&self) -> f64 {
        f64::from(self.current_health) / f64::from(self.max_health)
    }

    pub fn health_band(&self) -> HealthBand {
        HealthBand::from_health(self.current_health, self.max_health)
    }

    /// Living and below the retreat threshold.
    pub fn should_retreat(&self) -> bool {
        self.is_alive() && self.health_fraction() < self.retreat_threshold
    }

    /// Removes `amount` health, never going below zero.
    ///
    /// The returned change reports `died` exactly once: on the call that
    /// brings health from above zero to zero. Damaging a dead combatant
    /// returns an unchanged, non-dying record.
    pub fn take_damage(&mut self, amount: u32) -> HealthChange {
        let old = self.current_health;
        self.current_health = health::apply_damage(old, amount);
        HealthChange::new(old, self.current_health, self.max_health)
    }

    /// Applies one regeneration pulse.
    ///
    /// Returns `None` when health did not increase (already full).
    pub fn regenerate_health(&mut self) -> Option<HealthChange> {
        let amount = self.regeneration.amount_for(self.max_health);
        self.heal(amount)
    }

    /// Restores health to maximum.
    ///
    /// Returns `None` when the combatant was already at full health.
    pub fn restore_full(&mut self) -> Option<HealthChange> {
        self.heal(self.max_health)
    }

    fn heal(&mut self, amount: u32) -> Option<HealthChange> {
        let old = self.current_health;
        self.current_health = health::apply_healing(old, amount, self.max_health);
        let change = HealthChange::new(old, self.current_health, self.max_health);
        change.is_change().then_some(change)
    }
}

pub(crate) fn validate_damage_per_second(value: f64) -> Result<(), ExpeditionError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ExpeditionError::invalid_argument(
            "damage_per_second",
            format!("must be a finite, non-negative number, got {value}"),
        ))
    }
}

pub(crate) fn validate_retreat_threshold(value: f64) -> Result<(), ExpeditionError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ExpeditionError::invalid_argument(
            "retreat_threshold",
            format!("must be in [0, 1], got {value}"),
        ))
    }
}
