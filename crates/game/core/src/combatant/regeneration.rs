use crate::config::ExpeditionConfig;
use crate::error::ExpeditionError;

/// Amount of health restored by one regeneration pulse.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Regeneration {
    /// Flat amount per pulse. Must be at least 1.
    Fixed(u32),
    /// Fraction of maximum health per pulse, in `(0, 1]`, never less than 1.
    Fraction(f64),
}

impl Regeneration {
    pub fn validate(&self) -> Result<(), ExpeditionError> {
        match *self {
            Self::Fixed(0) => Err(ExpeditionError::invalid_argument(
                "regeneration",
                "fixed regeneration must heal at least 1",
            )),
            Self::Fixed(_) => Ok(()),
            Self::Fraction(fraction) if fraction.is_finite() && fraction > 0.0 && fraction <= 1.0 => {
                Ok(())
            }
            Self::Fraction(fraction) => Err(ExpeditionError::invalid_argument(
                "regeneration",
                format!("fraction must be in (0, 1], got {fraction}"),
            )),
        }
    }

    /// Health restored per pulse for a combatant with the given maximum.
    pub fn amount_for(&self, max_health: u32) -> u32 {
        match *self {
            Self::Fixed(amount) => amount,
            Self::Fraction(fraction) => {
                let amount = (f64::from(max_health) * fraction).floor();
                // max_health * fraction <= max_health, so the cast cannot overflow
                (amount as u32).max(1)
            }
        }
    }
}

impl Default for Regeneration {
    fn default() -> Self {
        Self::Fraction(ExpeditionConfig::DEFAULT_REGENERATION_FRACTION)
    }
}
