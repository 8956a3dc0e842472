//! Deterministic tile-grid movement simulation.
//!
//! `sim-core` models a player and a set of NPC actors moving across a
//! bounded 2D collision grid in discrete ticks. It owns the canonical
//! rules (BFS pathfinding, line of sight, per-tick collision resolution,
//! bounded rewind history) and exposes pure, synchronous APIs; a host
//! drives the simulation by calling [`engine::SimulationEngine::tick`]
//! directly or through an external clock.
pub mod collision;
pub mod config;
pub mod engine;
pub mod grid;
pub mod model;
pub mod path;
pub mod sight;

pub use config::SimConfig;
pub use engine::{ObserverId, SimulationEngine, SimulationObserver, Snapshot};
pub use grid::{CollisionFlags, CollisionGrid, GridError};
pub use model::{Direction, Npc, NpcId, NpcSpec, Player, Tile};
pub use path::{GoalMode, PathRequest, find_path};
