//! Scenario sources: where collision data and actor lists come from.
//!
//! The engine consumes grid and actor data through `refresh()`; a
//! [`ScenarioSource`] is anything that can produce that data. The
//! canonical implementation is [`FileSource`], reading the JSON snapshot
//! format a live client dumps (`collision_data.json` lineage): sparse
//! per-tile flags plus the player spawn and NPC list.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sim_core::{CollisionFlags, CollisionGrid, NpcSpec, SimulationEngine, Tile};

use crate::error::{Result, RuntimeError};

/// Grid and actor data pulled from an external collaborator.
#[derive(Debug)]
pub struct Scenario {
    pub grid: CollisionGrid,
    pub player_position: Tile,
    pub npcs: Vec<NpcSpec>,
}

/// Provider of collision grid and actor data.
pub trait ScenarioSource {
    fn load(&self) -> Result<Scenario>;
}

/// Re-pulls grid and actor data from `source` into the engine,
/// defaulting tick and path state to empty.
///
/// Existing NPCs are replaced by the scenario's list.
pub fn refresh_from_source(
    engine: &mut SimulationEngine,
    source: &dyn ScenarioSource,
) -> Result<()> {
    let scenario = source.load()?;
    engine.refresh(scenario.grid, scenario.player_position, 0, 0, Vec::new());

    let existing: Vec<_> = engine.npcs().iter().map(|npc| npc.id).collect();
    for id in existing {
        engine.remove_npc(id);
    }
    for spec in scenario.npcs {
        engine.add_npc(spec);
    }
    Ok(())
}

/// On-disk scenario layout. Tiles are sparse: anything not listed has no
/// blocking flags.
#[derive(Debug, Serialize, Deserialize)]
struct ScenarioFile {
    width: i32,
    height: i32,
    #[serde(default = "default_planes")]
    planes: u8,
    player: Tile,
    #[serde(default)]
    npcs: Vec<NpcSpec>,
    #[serde(default)]
    tiles: Vec<TileFlags>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TileFlags {
    tile: Tile,
    flags: u32,
}

fn default_planes() -> u8 {
    1
}

/// JSON-file-backed scenario source.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the engine's current grid and actors back to disk in the
    /// same format `load` reads.
    pub fn save(&self, engine: &SimulationEngine) -> Result<()> {
        let grid = engine.grid();
        let mut tiles = Vec::new();
        for plane in 0..grid.planes() {
            for y in 0..grid.height() {
                for x in 0..grid.width() {
                    let tile = Tile::new(x, y, plane);
                    let flags = grid.flags(tile);
                    if !flags.is_empty() {
                        tiles.push(TileFlags {
                            tile,
                            flags: flags.bits(),
                        });
                    }
                }
            }
        }

        let file = ScenarioFile {
            width: grid.width(),
            height: grid.height(),
            planes: grid.planes(),
            player: engine.player().position,
            npcs: engine
                .npcs()
                .iter()
                .map(|npc| {
                    NpcSpec::new(npc.name.clone(), npc.position)
                        .with_size(npc.size)
                        .with_attack_range(npc.attack_range)
                        .with_pathfinding(npc.can_pathfind)
                })
                .collect(),
            tiles,
        };

        let json = serde_json::to_string_pretty(&file)?;
        fs::write(&self.path, json)?;
        tracing::info!("saved collision snapshot to {}", self.path.display());
        Ok(())
    }
}

impl ScenarioSource for FileSource {
    fn load(&self) -> Result<Scenario> {
        let raw = fs::read_to_string(&self.path)?;
        let file: ScenarioFile = serde_json::from_str(&raw)?;

        if file.width <= 0 || file.height <= 0 || file.planes == 0 {
            return Err(RuntimeError::InvalidScenario(format!(
                "grid dimensions must be positive (got {}x{}x{})",
                file.width, file.height, file.planes
            )));
        }

        let mut grid = CollisionGrid::new(file.width, file.height, file.planes);
        for entry in &file.tiles {
            if !grid.contains(entry.tile) {
                return Err(RuntimeError::InvalidScenario(format!(
                    "tile {} outside {}x{} grid",
                    entry.tile, file.width, file.height
                )));
            }
            grid.set_flags(entry.tile, CollisionFlags::from_bits_truncate(entry.flags));
        }

        if !grid.contains(file.player) {
            return Err(RuntimeError::InvalidScenario(format!(
                "player spawn {} outside grid",
                file.player
            )));
        }
        for npc in &file.npcs {
            if !grid.contains(npc.position) {
                return Err(RuntimeError::InvalidScenario(format!(
                    "npc '{}' spawn {} outside grid",
                    npc.name, npc.position
                )));
            }
        }

        tracing::info!(
            "loaded scenario from {}: {}x{} grid, {} npcs",
            self.path.display(),
            file.width,
            file.height,
            file.npcs.len()
        );

        Ok(Scenario {
            grid,
            player_position: file.player,
            npcs: file.npcs,
        })
    }
}
