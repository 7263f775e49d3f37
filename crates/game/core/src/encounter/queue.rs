use std::collections::VecDeque;

use crate::combatant::Combatant;

/// Strict FIFO of opponents waiting to be fought.
///
/// Insertion order is engagement order. No reordering and no duplicate
/// checks; the queue is loaded once per expedition and drained from the front.
#[derive(Clone, Debug, Default)]
pub struct EncounterQueue {
    pending: VecDeque<Combatant>,
    total: usize,
}

/// Snapshot of how far an expedition has progressed through its queue.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterProgress {
    /// Opponents defeated so far.
    pub defeated: usize,
    /// Opponents still waiting in the queue.
    pub remaining: usize,
    /// Opponents loaded at expedition start.
    pub total: usize,
}

impl EncounterQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the queue contents with `opponents`, preserving their order.
    pub fn load(&mut self, opponents: impl IntoIterator<Item = Combatant>) {
        self.pending.clear();
        self.pending.extend(opponents);
        self.total = self.pending.len();
    }

    /// Removes and returns the next opponent.
    pub fn dequeue(&mut self) -> Option<Combatant> {
        self.pending.pop_front()
    }

    pub fn peek(&self) -> Option<&Combatant> {
        self.pending.front()
    }

    /// Drops every pending opponent, returning how many were discarded.
    ///
    /// `total` still counts the opponents of the last [`load`](Self::load).
    pub fn clear(&mut self) -> usize {
        let discarded = self.pending.len();
        self.pending.clear();
        discarded
    }

    /// Clears the queue and forgets the loaded total.
    pub fn reset(&mut self) -> usize {
        self.total = 0;
        self.clear()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Number of opponents loaded by the last [`load`](Self::load).
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn iter(&self) -> impl Iterator<Item = &Combatant> + '_ {
        self.pending.iter()
    }
}

impl FromIterator<Combatant> for EncounterQueue {
    fn from_iter<I: IntoIterator<Item = Combatant>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.load(iter);
        queue
    }
}
