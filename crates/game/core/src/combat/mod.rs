//! Combat arithmetic.
//!
//! Damage-per-second is continuous while health is whole. The
//! [`DamageCarry`] accumulator bridges the two: each tick adds
//! `damage_per_second * dt` and withdraws only the whole units, so nothing
//! is lost to truncation and nothing is applied twice.

pub mod carry;

pub use carry::DamageCarry;
