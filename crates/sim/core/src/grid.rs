//! Per-tile directional collision data.
//!
//! A [`CollisionGrid`] is a read-only dense store of [`CollisionFlags`]
//! covering a bounded area on one or more planes. It is supplied wholesale
//! by an external source (a live client dump or a scenario file) and is
//! never mutated mid-session; the engine replaces it via `refresh()`.

use crate::model::Tile;

bitflags::bitflags! {
    /// Directional and impassability blocking flags for a single tile.
    ///
    /// Bit values match the client's collision map encoding, so dumps can
    /// be consumed without translation.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct CollisionFlags: u32 {
        const BLOCK_NORTH_WEST = 0x1;
        const BLOCK_NORTH = 0x2;
        const BLOCK_NORTH_EAST = 0x4;
        const BLOCK_EAST = 0x8;
        const BLOCK_SOUTH_EAST = 0x10;
        const BLOCK_SOUTH = 0x20;
        const BLOCK_SOUTH_WEST = 0x40;
        const BLOCK_WEST = 0x80;

        const BLOCK_OBJECT = 0x100;
        const BLOCK_FULL = 0x20000;
        const BLOCK_FLOOR_DECORATION = 0x40000;
        const BLOCK_FLOOR = 0x200000;

        /// Obstacles that make a tile unenterable from any direction.
        const IMPASSABLE = 0x100 | 0x20000 | 0x40000 | 0x200000;
    }
}

impl CollisionFlags {
    /// True if the tile cannot be entered or seen through at all.
    #[inline]
    pub fn is_impassable(self) -> bool {
        self.intersects(Self::IMPASSABLE)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("grid dimensions must be positive (got {width}x{height})")]
    EmptyDimensions { width: i32, height: i32 },

    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Dense per-plane collision flag store.
///
/// Coordinates grow east (+x) and north (+y). Lookups outside the bounds
/// fail closed: they report every flag set, so out-of-bounds tiles are
/// blocked for movement and opaque for sight.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollisionGrid {
    width: i32,
    height: i32,
    planes: u8,
    cells: Vec<CollisionFlags>,
}

impl CollisionGrid {
    /// Creates an open grid (no blocking flags anywhere).
    pub fn new(width: i32, height: i32, planes: u8) -> Self {
        assert!(
            width > 0 && height > 0 && planes > 0,
            "collision grid dimensions must be positive"
        );
        let cells = vec![CollisionFlags::empty(); width as usize * height as usize * planes as usize];
        Self {
            width,
            height,
            planes,
            cells,
        }
    }

    /// Single-plane open grid.
    pub fn open(width: i32, height: i32) -> Self {
        Self::new(width, height, 1)
    }

    /// Builds a single-plane grid from row-major raw flag data (`rows[y][x]`).
    pub fn from_rows(rows: &[Vec<u32>]) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(GridError::EmptyDimensions {
                width: width as i32,
                height: height as i32,
            });
        }
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(GridError::RaggedRows {
                    row: y,
                    expected: width,
                    found: row.len(),
                });
            }
        }

        let mut grid = Self::new(width as i32, height as i32, 1);
        for (y, row) in rows.iter().enumerate() {
            for (x, &raw) in row.iter().enumerate() {
                let tile = Tile::new(x as i32, y as i32, 0);
                grid.set_flags(tile, CollisionFlags::from_bits_truncate(raw));
            }
        }
        Ok(grid)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn planes(&self) -> u8 {
        self.planes
    }

    pub fn contains(&self, tile: Tile) -> bool {
        tile.x >= 0
            && tile.y >= 0
            && tile.x < self.width
            && tile.y < self.height
            && tile.plane < self.planes
    }

    /// Flags at `tile`; out-of-bounds tiles report all flags set.
    pub fn flags(&self, tile: Tile) -> CollisionFlags {
        match self.index(tile) {
            Some(i) => self.cells[i],
            None => CollisionFlags::all(),
        }
    }

    pub fn set_flags(&mut self, tile: Tile, flags: CollisionFlags) {
        if let Some(i) = self.index(tile) {
            self.cells[i] = flags;
        }
    }

    /// Ors `flags` into the existing flags at `tile`.
    pub fn add_flags(&mut self, tile: Tile, flags: CollisionFlags) {
        if let Some(i) = self.index(tile) {
            self.cells[i] |= flags;
        }
    }

    fn index(&self, tile: Tile) -> Option<usize> {
        if !self.contains(tile) {
            return None;
        }
        let plane_stride = self.width as usize * self.height as usize;
        Some(
            tile.plane as usize * plane_stride
                + tile.y as usize * self.width as usize
                + tile.x as usize,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_reads_fail_closed() {
        let grid = CollisionGrid::open(4, 4);
        assert_eq!(grid.flags(Tile::new(-1, 0, 0)), CollisionFlags::all());
        assert_eq!(grid.flags(Tile::new(0, 4, 0)), CollisionFlags::all());
        assert_eq!(grid.flags(Tile::new(0, 0, 1)), CollisionFlags::all());
        assert_eq!(grid.flags(Tile::new(3, 3, 0)), CollisionFlags::empty());
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        let rows = vec![vec![0, 0, 0], vec![0, 0]];
        assert_eq!(
            CollisionGrid::from_rows(&rows),
            Err(GridError::RaggedRows {
                row: 1,
                expected: 3,
                found: 2,
            })
        );
    }

    #[test]
    fn from_rows_is_row_major() {
        let rows = vec![
            vec![0, 0, 0],
            vec![0, CollisionFlags::BLOCK_FULL.bits(), 0],
        ];
        let grid = CollisionGrid::from_rows(&rows).unwrap();
        assert!(grid.flags(Tile::new(1, 1, 0)).is_impassable());
        assert!(!grid.flags(Tile::new(1, 0, 0)).is_impassable());
    }

    #[test]
    fn planes_are_independent() {
        let mut grid = CollisionGrid::new(3, 3, 2);
        grid.add_flags(Tile::new(1, 1, 0), CollisionFlags::BLOCK_FULL);
        assert!(grid.flags(Tile::new(1, 1, 0)).is_impassable());
        assert!(!grid.flags(Tile::new(1, 1, 1)).is_impassable());
    }
}
