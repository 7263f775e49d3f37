//! Resolution of one tick of fighting between the engaged pair.
//!
//! Ordering rules:
//! 1. The ally strikes first.
//! 2. The opponent counters only if it survived that strike and the ally is alive.
//!
//! A killing blow therefore prevents all counter-damage in the same tick.

use crate::combatant::HealthChange;

use super::state::Engagement;

/// What happened during one exchange.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct ExchangeReport {
    /// Damage applied to the opponent, if any whole unit was due.
    pub strike: Option<HealthChange>,
    /// Damage applied to the ally, if the opponent countered.
    pub counter: Option<HealthChange>,
}

/// Advances both damage carries by `dt` and applies whole units of damage.
pub(crate) fn resolve_exchange(engagement: &mut Engagement, dt: f64) -> ExchangeReport {
    let mut report = ExchangeReport::default();

    let dealt = engagement
        .ally_carry
        .accumulate(engagement.ally.damage_per_second(), dt);
    if dealt > 0 {
        report.strike = Some(engagement.opponent.take_damage(dealt));
    }

    if engagement.opponent.is_alive() && engagement.ally.is_alive() {
        let owed = engagement
            .opponent_carry
            .accumulate(engagement.opponent.damage_per_second(), dt);
        if owed > 0 {
            report.counter = Some(engagement.ally.take_damage(owed));
        }
    }

    report
}
