//! Data-driven expedition content and loaders.
//!
//! This crate provides loaders for RON/TOML data files:
//! - Expedition configuration (data-driven via TOML)
//! - Rosters: an ally plus the ordered opponents it will face (data-driven via RON)
//!
//! Choosing and ordering opponents is a content decision. The controller in
//! game-core only executes the list it is handed.
//!
//! All loaders use game-core types directly with serde for RON/TOML deserialization.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{CombatantSpec, ConfigLoader, ContentFactory, Roster, RosterLoader, RosterSpec};
