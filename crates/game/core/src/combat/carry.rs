//! Fractional damage accumulator.

use crate::config::ExpeditionConfig;

/// Running remainder of damage not yet large enough to apply.
///
/// After every [`accumulate`](Self::accumulate) the pending amount is in
/// `[-CARRY_EPSILON, 1)`, so the total withdrawn after any number of ticks
/// stays within one unit below `rate * elapsed` and never exceeds it by more
/// than [`ExpeditionConfig::CARRY_EPSILON`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageCarry {
    pending: f64,
}

impl DamageCarry {
    pub const fn new() -> Self {
        Self { pending: 0.0 }
    }

    /// Fractional damage waiting for the next whole unit.
    ///
    /// Slightly negative right after a snap to the next unit.
    pub const fn pending(&self) -> f64 {
        self.pending
    }

    pub fn reset(&mut self) {
        self.pending = 0.0;
    }

    /// Adds `rate * dt` and withdraws the whole units now owed.
    ///
    /// Callers validate that `rate` and `dt` are finite and non-negative.
    /// A single call owing more than `u32::MAX` saturates and drops the excess.
    pub fn accumulate(&mut self, rate: f64, dt: f64) -> u32 {
        self.pending += rate * dt;

        let mut whole = self.pending.floor();
        if self.pending - whole >= 1.0 - ExpeditionConfig::CARRY_EPSILON {
            whole += 1.0;
        }
        if whole < 1.0 {
            return 0;
        }

        if whole >= f64::from(u32::MAX) {
            self.pending = 0.0;
            return u32::MAX;
        }

        // A snap leaves the overshoot as a negative remainder of at most epsilon.
        self.pending -= whole;
        whole as u32
    }
}
