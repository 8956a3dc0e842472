use std::collections::VecDeque;

use crate::model::{NpcId, Tile};

/// Immutable capture of the simulation at one tick, used for rewind.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    /// Tick number at the moment of capture.
    pub tick: u64,
    pub player_position: Tile,
    /// Deep copy of the player's pending waypoints.
    pub player_path: Vec<Tile>,
    pub player_path_index: usize,
    /// NPC positions keyed by stable handle, in registry order.
    pub npc_positions: Vec<(NpcId, Tile)>,
}

/// Bounded LIFO stack of snapshots.
///
/// Pushed before every mutation; once the capacity is exceeded the oldest
/// entries are discarded, preserving the order of the rest.
#[derive(Debug, Default)]
pub(crate) struct History {
    entries: VecDeque<Snapshot>,
    capacity: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, snapshot: Snapshot) {
        self.entries.push_back(snapshot);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Removes and returns the most recent snapshot.
    pub fn pop(&mut self) -> Option<Snapshot> {
        self.entries.pop_back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
