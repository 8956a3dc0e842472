use std::fmt;

use super::Tile;

/// Stable handle for an NPC registered with the engine.
///
/// Handles are allocated sequentially and never reused, so they stay
/// valid as keys into snapshots and per-NPC trail history even while the
/// registry churns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NpcId(pub u32);

impl fmt::Display for NpcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The player-controlled actor.
///
/// The player always occupies a single tile. Its `path` holds only future
/// waypoints (never the current position) and is consumed from the front,
/// one step per tick or two while `running`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub position: Tile,
    pub attack_range: i32,
    pub running: bool,
    pub path: Vec<Tile>,
    pub path_index: usize,
}

impl Player {
    pub fn new(position: Tile) -> Self {
        Self {
            position,
            attack_range: 1,
            running: false,
            path: Vec::new(),
            path_index: 0,
        }
    }

    pub fn clear_path(&mut self) {
        self.path.clear();
        self.path_index = 0;
    }
}

/// An NPC actor with an N×N footprint anchored at its southwest tile.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Npc {
    pub id: NpcId,
    pub name: String,
    pub position: Tile,
    pub size: i32,
    pub attack_range: i32,
    /// Selects BFS routing toward the player; greedy priority stepping
    /// otherwise.
    pub can_pathfind: bool,
}

/// Blueprint for an NPC before the engine allocates its handle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NpcSpec {
    pub name: String,
    pub position: Tile,
    #[cfg_attr(feature = "serde", serde(default = "default_size"))]
    pub size: i32,
    #[cfg_attr(feature = "serde", serde(default = "default_size"))]
    pub attack_range: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub can_pathfind: bool,
}

#[cfg(feature = "serde")]
fn default_size() -> i32 {
    1
}

impl NpcSpec {
    pub fn new(name: impl Into<String>, position: Tile) -> Self {
        Self {
            name: name.into(),
            position,
            size: 1,
            attack_range: 1,
            can_pathfind: false,
        }
    }

    pub fn with_size(mut self, size: i32) -> Self {
        self.size = size;
        self
    }

    pub fn with_attack_range(mut self, attack_range: i32) -> Self {
        self.attack_range = attack_range;
        self
    }

    pub fn with_pathfinding(mut self, can_pathfind: bool) -> Self {
        self.can_pathfind = can_pathfind;
        self
    }

    pub(crate) fn into_npc(self, id: NpcId) -> Npc {
        Npc {
            id,
            name: self.name,
            position: self.position,
            size: self.size,
            attack_range: self.attack_range,
            can_pathfind: self.can_pathfind,
        }
    }
}
