//! Data model shared across the simulation: tiles, directions, actors.
pub mod actor;
pub mod common;

pub use actor::{Npc, NpcId, NpcSpec, Player};
pub use common::{Direction, Tile};
