//! Pending encounters for an expedition.

mod queue;

pub use queue::{EncounterProgress, EncounterQueue};
