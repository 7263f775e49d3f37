//! Health bookkeeping shared by damage and regeneration.

/// Result of a single health mutation.
///
/// Returned by the mutator at the moment the change happens; this is the
/// "health changed" and "died" notification of a combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealthChange {
    pub old: u32,
    pub new: u32,
    pub max: u32,
    /// True only for the mutation that took health from above zero to zero.
    pub died: bool,
}

impl HealthChange {
    pub(crate) const fn new(old: u32, new: u32, max: u32) -> Self {
        Self {
            old,
            new,
            max,
            died: old > 0 && new == 0,
        }
    }

    /// Signed difference between the new and old health.
    pub const fn delta(&self) -> i64 {
        self.new as i64 - self.old as i64
    }

    /// Returns true if the mutation changed health at all.
    pub const fn is_change(&self) -> bool {
        self.old != self.new
    }
}

/// Coarse health classification used in narration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum HealthBand {
    /// 100% health
    Full,
    /// 75-99% health
    Healthy,
    /// 25-74% health
    Wounded,
    /// 1-24% health
    Critical,
    /// 0% health
    Dead,
}

impl HealthBand {
    /// Classifies current health against the maximum.
    pub fn from_health(current: u32, max: u32) -> Self {
        if current == 0 {
            Self::Dead
        } else if max == 0 {
            Self::Full
        } else {
            let percent = (u64::from(current) * 100) / u64::from(max);
            match percent {
                100.. => Self::Full,
                75..=99 => Self::Healthy,
                25..=74 => Self::Wounded,
                _ => Self::Critical,
            }
        }
    }
}

/// Apply damage to current health, clamped to 0.
pub(crate) fn apply_damage(current: u32, damage: u32) -> u32 {
    current.saturating_sub(damage)
}

/// Apply healing to current health, clamped to `max`.
pub(crate) fn apply_healing(current: u32, amount: u32, max: u32) -> u32 {
    current.saturating_add(amount).min(max)
}
