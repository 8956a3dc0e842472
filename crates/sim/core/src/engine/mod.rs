//! Tick orchestration and the engine's public control surface.
//!
//! [`SimulationEngine`] owns all mutable simulation state: the collision
//! grid, the player, the NPC registry, recorded per-NPC trails, bounded
//! rewind history, and the observer registry. A host drives it by calling
//! [`SimulationEngine::tick`]: either manually for deterministic
//! stepping or from a periodic clock while the engine is running.

mod history;
mod observer;

use std::collections::HashMap;

pub use history::Snapshot;
pub use observer::{ObserverId, SimulationObserver};

use crate::collision::{is_overlapping, next_greedy_step};
use crate::config::SimConfig;
use crate::grid::CollisionGrid;
use crate::model::{Npc, NpcId, NpcSpec, Player, Tile};
use crate::path::{PathRequest, find_path};
use crate::sight;

use history::History;
use observer::ObserverHub;

/// Simulation engine for player and NPC movement over a collision grid.
pub struct SimulationEngine {
    config: SimConfig,
    grid: CollisionGrid,
    player: Player,
    npcs: Vec<Npc>,
    /// Recorded pre-move path points per NPC, for visualization and
    /// rewind trimming.
    npc_trails: HashMap<NpcId, Vec<Tile>>,
    target_position: Option<Tile>,
    history: History,
    observers: ObserverHub,
    running: bool,
    tick: u64,
    next_npc_id: u32,
}

impl SimulationEngine {
    pub fn new(grid: CollisionGrid, player_position: Tile) -> Self {
        Self::with_config(grid, player_position, SimConfig::default())
    }

    pub fn with_config(grid: CollisionGrid, player_position: Tile, config: SimConfig) -> Self {
        let history = History::new(config.max_history);
        Self {
            config,
            grid,
            player: Player::new(player_position),
            npcs: Vec::new(),
            npc_trails: HashMap::new(),
            target_position: None,
            history,
            observers: ObserverHub::default(),
            running: false,
            tick: 0,
            next_npc_id: 0,
        }
    }

    // ===== control surface =====

    /// Marks the simulation as running so an external clock may begin
    /// invoking [`tick`](Self::tick). Idempotent.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stops the simulation, resets the tick counter, and clears history.
    pub fn stop(&mut self) {
        self.running = false;
        self.tick = 0;
        self.history.clear();
    }

    /// Advances the simulation by one tick.
    ///
    /// Captures a rewind snapshot, moves every NPC toward the player,
    /// consumes the player's pending path, then notifies observers.
    /// Callable directly for deterministic stepping regardless of the
    /// running flag.
    pub fn tick(&mut self) {
        self.save_current_state();

        if self.tick > 0 {
            self.move_npcs();
            self.move_player();
        }

        self.observers.notify_all();
        self.tick += 1;
    }

    /// Rewinds the simulation by one tick.
    ///
    /// A no-op (logged) when no snapshot is available.
    pub fn prev_tick(&mut self) {
        let Some(previous) = self.history.pop() else {
            tracing::info!("cannot go back further - no previous state saved");
            return;
        };

        self.tick = previous.tick;
        self.player.position = previous.player_position;
        self.player.path = previous.player_path;
        self.player.path_index = previous.player_path_index;

        for (id, position) in previous.npc_positions {
            if let Some(npc) = self.npcs.iter_mut().find(|npc| npc.id == id) {
                npc.position = position;
            }
        }

        // Going backward: drop the most recent recorded path point.
        for npc in &self.npcs {
            if let Some(trail) = self.npc_trails.get_mut(&npc.id) {
                trail.pop();
            }
        }

        self.observers.notify_all();
    }

    /// Computes a BFS path from the player's position to `target` and
    /// stores it as the active path.
    pub fn set_player_target(&mut self, target: Tile) {
        let start = self.player.position;
        self.player.path = find_path(&self.grid, start, target, PathRequest::exact());
        self.player.path_index = 0;
        self.target_position = Some(target);
        tracing::info!(
            "calculated path of {} steps from {} to {}",
            self.player.path.len(),
            start,
            target
        );
    }

    /// Registers an NPC and returns its stable handle.
    pub fn add_npc(&mut self, spec: NpcSpec) -> NpcId {
        let id = NpcId(self.next_npc_id);
        self.next_npc_id += 1;
        self.npcs.push(spec.into_npc(id));
        self.npc_trails.insert(id, Vec::new());
        self.observers.notify_all();
        id
    }

    /// Removes an NPC and its recorded trail. Unknown handles are ignored.
    pub fn remove_npc(&mut self, id: NpcId) {
        self.npcs.retain(|npc| npc.id != id);
        self.npc_trails.remove(&id);
        self.observers.notify_all();
    }

    /// Registers an observer to be notified after any state change.
    pub fn add_observer(&mut self, observer: Box<dyn SimulationObserver>) -> ObserverId {
        self.observers.add(observer)
    }

    /// Unregisters an observer; returns false for unknown handles.
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        self.observers.remove(id)
    }

    /// Clears history, trails, and pending target/path state without
    /// removing actors.
    pub fn reset(&mut self) {
        self.npc_trails.clear();
        self.stop();
        self.target_position = None;
        self.player.clear_path();
    }

    /// Replaces the collision grid and player movement state wholesale.
    ///
    /// This is the boundary for external collision/actor sources; the
    /// grid is never mutated mid-session.
    pub fn refresh(
        &mut self,
        grid: CollisionGrid,
        player_position: Tile,
        tick: u64,
        path_index: usize,
        current_path: Vec<Tile>,
    ) {
        self.grid = grid;
        self.player.position = player_position;
        self.tick = tick;
        self.player.path_index = path_index;
        self.player.path = current_path;
    }

    // ===== accessors =====

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn grid(&self) -> &CollisionGrid {
        &self.grid
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn set_player_running(&mut self, running: bool) {
        self.player.running = running;
    }

    pub fn set_player_position(&mut self, position: Tile) {
        self.player.position = position;
    }

    pub fn target_position(&self) -> Option<Tile> {
        self.target_position
    }

    pub fn npcs(&self) -> &[Npc] {
        &self.npcs
    }

    pub fn npc(&self, id: NpcId) -> Option<&Npc> {
        self.npcs.iter().find(|npc| npc.id == id)
    }

    /// Recorded pre-move path points for one NPC.
    pub fn npc_trail(&self, id: NpcId) -> Option<&[Tile]> {
        self.npc_trails.get(&id).map(Vec::as_slice)
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Tiles visible from the player's position within its attack range.
    pub fn player_visible_tiles(&self) -> Vec<Tile> {
        sight::visible_tiles(&self.grid, self.player.position, 1, self.player.attack_range)
    }

    /// Tiles visible from an NPC's footprint within its attack range.
    pub fn npc_visible_tiles(&self, id: NpcId) -> Option<Vec<Tile>> {
        let npc = self.npc(id)?;
        Some(sight::visible_tiles(
            &self.grid,
            npc.position,
            npc.size,
            npc.attack_range,
        ))
    }

    /// Whether an NPC currently has line of sight to the player.
    pub fn npc_sees_player(&self, id: NpcId) -> bool {
        self.npc(id).is_some_and(|npc| {
            sight::line_of_sight(
                &self.grid,
                npc.position,
                npc.size,
                self.player.position,
                npc.attack_range,
            )
        })
    }

    // ===== internals =====

    /// Captures the current state onto the rewind stack.
    fn save_current_state(&mut self) {
        let snapshot = Snapshot {
            tick: self.tick,
            player_position: self.player.position,
            player_path: self.player.path.clone(),
            player_path_index: self.player.path_index,
            npc_positions: self
                .npcs
                .iter()
                .map(|npc| (npc.id, npc.position))
                .collect(),
        };
        self.history.push(snapshot);
    }

    /// Footprints of every actor except the NPC identified by `moving`.
    fn occupied_footprints(&self, moving: NpcId) -> Vec<(Tile, i32)> {
        let mut occupied: Vec<(Tile, i32)> = self
            .npcs
            .iter()
            .filter(|npc| npc.id != moving)
            .map(|npc| (npc.position, npc.size))
            .collect();
        occupied.push((self.player.position, 1));
        occupied
    }

    fn move_npcs(&mut self) {
        let player_position = self.player.position;

        for i in 0..self.npcs.len() {
            let Npc {
                id,
                position,
                size,
                can_pathfind,
                ..
            } = self.npcs[i];
            let occupied = self.occupied_footprints(id);

            let next = if can_pathfind {
                let route = find_path(
                    &self.grid,
                    position,
                    player_position,
                    PathRequest::adjacent(size),
                );
                match route.first() {
                    Some(&step) => {
                        let blocked = occupied
                            .iter()
                            .any(|&(pos, other)| is_overlapping(step, size, pos, other));
                        if blocked {
                            tracing::debug!("npc {} path blocked at {}", self.npcs[i].name, step);
                            None
                        } else {
                            Some(step)
                        }
                    }
                    None => {
                        tracing::debug!(
                            "npc {} found no path from {} to {}",
                            self.npcs[i].name,
                            position,
                            player_position
                        );
                        None
                    }
                }
            } else {
                next_greedy_step(&self.grid, position, player_position, size, &occupied)
            };

            if let Some(step) = next {
                self.npc_trails.entry(id).or_default().push(position);
                self.npcs[i].position = step;
                tracing::debug!("npc {} moved from {} to {}", self.npcs[i].name, position, step);
            }
        }
    }

    fn move_player(&mut self) {
        if self.player.path.is_empty() {
            return;
        }

        // Running consumes two waypoints per tick when available.
        let steps = if self.player.running && self.player.path.len() > 1 {
            2
        } else {
            1
        };
        let mut last = self.player.position;
        for _ in 0..steps {
            last = self.player.path.remove(0);
        }
        self.player.position = last;

        if self.player.path.is_empty() {
            self.player.path_index = 0;
        }
    }
}
