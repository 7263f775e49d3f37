use crate::combatant::Regeneration;
use crate::error::ExpeditionError;

/// Expedition constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExpeditionConfig {
    /// Seconds simulated by a single driver step.
    pub step_seconds: f64,

    /// Heal policy given to combatants that do not declare their own.
    pub default_regeneration: Regeneration,

    /// Retreat threshold given to combatants that do not declare their own.
    pub default_retreat_threshold: f64,
}

impl ExpeditionConfig {
    // ===== compile-time constants =====
    /// A carry within this distance of the next whole unit is rounded up to it.
    pub const CARRY_EPSILON: f64 = 1e-9;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_STEP_SECONDS: f64 = 1.0;
    pub const DEFAULT_RETREAT_THRESHOLD: f64 = 0.2;
    pub const DEFAULT_REGENERATION_FRACTION: f64 = 0.1;

    pub fn new() -> Self {
        Self {
            step_seconds: Self::DEFAULT_STEP_SECONDS,
            default_regeneration: Regeneration::Fraction(Self::DEFAULT_REGENERATION_FRACTION),
            default_retreat_threshold: Self::DEFAULT_RETREAT_THRESHOLD,
        }
    }

    pub fn with_step_seconds(step_seconds: f64) -> Self {
        Self {
            step_seconds,
            ..Self::new()
        }
    }

    /// Checks every field, reporting the first one out of range.
    pub fn validate(&self) -> Result<(), ExpeditionError> {
        if !self.step_seconds.is_finite() || self.step_seconds <= 0.0 {
            return Err(ExpeditionError::invalid_argument(
                "step_seconds",
                format!("must be a positive number of seconds, got {}", self.step_seconds),
            ));
        }
        crate::combatant::validate_retreat_threshold(self.default_retreat_threshold)?;
        self.default_regeneration.validate()
    }
}

impl Default for ExpeditionConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ExpeditionConfig::default();
        assert_eq!(config.step_seconds, 1.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_step() {
        for step in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = ExpeditionConfig::with_step_seconds(step);
            assert!(matches!(
                config.validate(),
                Err(ExpeditionError::InvalidArgument { field: "step_seconds", .. })
            ));
        }
    }

    #[test]
    fn rejects_threshold_outside_unit_range() {
        let config = ExpeditionConfig {
            default_retreat_threshold: 1.5,
            ..ExpeditionConfig::new()
        };
        assert!(config.validate().is_err());
    }
}
