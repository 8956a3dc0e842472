use std::fmt;

use crate::grid::CollisionFlags;

/// Discrete grid cell identified by tile coordinates and a plane.
///
/// +x grows east, +y grows north.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub x: i32,
    pub y: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub plane: u8,
}

impl Tile {
    pub const fn new(x: i32, y: i32, plane: u8) -> Self {
        Self { x, y, plane }
    }

    /// The tile offset by `(dx, dy)` on the same plane.
    pub fn step(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.plane)
    }

    /// Chebyshev distance; the number of 8-directional steps between tiles.
    pub fn distance_to(self, other: Tile) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.plane)
    }
}

/// One of the eight movement directions.
///
/// `ALL` lists directions in the frontier expansion order used by BFS.
/// That order doubles as the tie-break among equally short paths, so it
/// must stay stable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    East,
    West,
    North,
    South,
    NorthEast,
    SouthEast,
    NorthWest,
    SouthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::East,
        Direction::West,
        Direction::North,
        Direction::South,
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::NorthWest,
        Direction::SouthWest,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::NorthEast => (1, 1),
            Direction::SouthEast => (1, -1),
            Direction::NorthWest => (-1, 1),
            Direction::SouthWest => (-1, -1),
        }
    }

    pub fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        match (dx, dy) {
            (1, 0) => Some(Direction::East),
            (-1, 0) => Some(Direction::West),
            (0, 1) => Some(Direction::North),
            (0, -1) => Some(Direction::South),
            (1, 1) => Some(Direction::NorthEast),
            (1, -1) => Some(Direction::SouthEast),
            (-1, 1) => Some(Direction::NorthWest),
            (-1, -1) => Some(Direction::SouthWest),
            _ => None,
        }
    }

    pub fn is_diagonal(self) -> bool {
        let (dx, dy) = self.delta();
        dx != 0 && dy != 0
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::NorthEast => Direction::SouthWest,
            Direction::SouthEast => Direction::NorthWest,
            Direction::NorthWest => Direction::SouthEast,
            Direction::SouthWest => Direction::NorthEast,
        }
    }

    /// Flags on a tile that block leaving it in this direction.
    ///
    /// Diagonal exits are also blocked when either cardinal component is,
    /// matching how the client encodes wall corners.
    pub fn blocking_flags(self) -> CollisionFlags {
        match self {
            Direction::East => CollisionFlags::BLOCK_EAST,
            Direction::West => CollisionFlags::BLOCK_WEST,
            Direction::North => CollisionFlags::BLOCK_NORTH,
            Direction::South => CollisionFlags::BLOCK_SOUTH,
            Direction::NorthEast => CollisionFlags::BLOCK_NORTH_EAST
                .union(CollisionFlags::BLOCK_NORTH)
                .union(CollisionFlags::BLOCK_EAST),
            Direction::SouthEast => CollisionFlags::BLOCK_SOUTH_EAST
                .union(CollisionFlags::BLOCK_SOUTH)
                .union(CollisionFlags::BLOCK_EAST),
            Direction::NorthWest => CollisionFlags::BLOCK_NORTH_WEST
                .union(CollisionFlags::BLOCK_NORTH)
                .union(CollisionFlags::BLOCK_WEST),
            Direction::SouthWest => CollisionFlags::BLOCK_SOUTH_WEST
                .union(CollisionFlags::BLOCK_SOUTH)
                .union(CollisionFlags::BLOCK_WEST),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_round_trips() {
        for dir in Direction::ALL {
            let (dx, dy) = dir.delta();
            assert_eq!(Direction::from_delta(dx, dy), Some(dir));
        }
        assert_eq!(Direction::from_delta(0, 0), None);
        assert_eq!(Direction::from_delta(2, 0), None);
    }

    #[test]
    fn opposite_is_involutive() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
        }
    }

    #[test]
    fn chebyshev_distance() {
        let a = Tile::new(0, 0, 0);
        assert_eq!(a.distance_to(Tile::new(3, -4, 0)), 4);
        assert_eq!(a.distance_to(Tile::new(2, 2, 0)), 2);
    }
}
