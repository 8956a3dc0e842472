//! Single-step move validation and footprint occupancy tests.
//!
//! Movement between adjacent tiles is blocked when the source tile's
//! outgoing-direction flag or the destination tile's incoming-direction
//! flag is set, or when the destination is impassable. Multi-tile actors
//! require every cell pair of their footprint to pass the same check.

use crate::grid::{CollisionFlags, CollisionGrid};
use crate::model::{Direction, Tile};

/// Validates a single-tile step between two adjacent tiles.
///
/// Out-of-bounds destinations and non-adjacent tile pairs are invalid.
pub fn is_valid_move(grid: &CollisionGrid, from: Tile, to: Tile) -> bool {
    if from.plane != to.plane || !grid.contains(to) {
        return false;
    }

    let to_flags = grid.flags(to);
    if to_flags.is_impassable() {
        return false;
    }

    let Some(direction) = Direction::from_delta(to.x - from.x, to.y - from.y) else {
        return false;
    };

    // Leaving the source and entering the destination are checked
    // symmetrically: the destination blocks the move from its side with
    // the opposite direction's flags.
    let from_flags = grid.flags(from);
    if from_flags.intersects(direction.blocking_flags()) {
        return false;
    }
    !to_flags.intersects(direction.opposite().blocking_flags())
}

/// Validates a step for an N×N footprint anchored at the southwest tile.
///
/// Every cell the actor occupies must be able to make the corresponding
/// single-tile move.
pub fn is_valid_move_for_footprint(grid: &CollisionGrid, from: Tile, to: Tile, size: i32) -> bool {
    for dx in 0..size {
        for dy in 0..size {
            let src = Tile::new(from.x + dx, from.y - dy, from.plane);
            let dst = Tile::new(to.x + dx, to.y - dy, to.plane);
            if !is_valid_move(grid, src, dst) {
                return false;
            }
        }
    }
    true
}

/// Axis-aligned bounding-box overlap between two footprints.
pub fn is_overlapping(a: Tile, size_a: i32, b: Tile, size_b: i32) -> bool {
    if a.plane != b.plane {
        return false;
    }
    let (a_right, a_top) = (a.x + size_a - 1, a.y + size_a - 1);
    let (b_right, b_top) = (b.x + size_b - 1, b.y + size_b - 1);
    !(a_right < b.x || b_right < a.x || a_top < b.y || b_top < a.y)
}

/// True when the two footprints share an edge without overlapping.
pub fn is_touching(a: Tile, size_a: i32, b: Tile, size_b: i32) -> bool {
    if a.plane != b.plane || is_overlapping(a, size_a, b, size_b) {
        return false;
    }
    let (a_right, a_top) = (a.x + size_a - 1, a.y + size_a - 1);
    let (b_right, b_top) = (b.x + size_b - 1, b.y + size_b - 1);

    let horizontally_adjacent =
        (a_right + 1 == b.x || b_right + 1 == a.x) && !(a_top < b.y || b_top < a.y);
    let vertically_adjacent =
        (a_top + 1 == b.y || b_top + 1 == a.y) && !(a_right < b.x || b_right < a.x);
    horizontally_adjacent || vertically_adjacent
}

/// Greedy single step from `from` toward `to` for an N×N footprint.
///
/// Candidates are tried in priority order: diagonal, then horizontal,
/// then vertical. A candidate is accepted only if the footprint move is
/// valid and it overlaps none of the `occupied` footprints. Returns
/// `None` when every candidate fails.
pub fn next_greedy_step(
    grid: &CollisionGrid,
    from: Tile,
    to: Tile,
    size: i32,
    occupied: &[(Tile, i32)],
) -> Option<Tile> {
    let dx = (to.x - from.x).signum();
    let dy = (to.y - from.y).signum();

    let free = |candidate: Tile| {
        !occupied
            .iter()
            .any(|&(pos, other_size)| is_overlapping(candidate, size, pos, other_size))
    };

    if dx != 0 && dy != 0 {
        let diagonal = from.step(dx, dy);
        if is_valid_move_for_footprint(grid, from, diagonal, size) && free(diagonal) {
            return Some(diagonal);
        }
    }
    if dx != 0 {
        let horizontal = from.step(dx, 0);
        if is_valid_move_for_footprint(grid, from, horizontal, size) && free(horizontal) {
            return Some(horizontal);
        }
    }
    if dy != 0 {
        let vertical = from.step(0, dy);
        if is_valid_move_for_footprint(grid, from, vertical, size) && free(vertical) {
            return Some(vertical);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(x: i32, y: i32) -> Tile {
        Tile::new(x, y, 0)
    }

    #[test]
    fn impassable_destination_blocks() {
        let mut grid = CollisionGrid::open(5, 5);
        grid.add_flags(tile(1, 0), CollisionFlags::BLOCK_FULL);
        assert!(!is_valid_move(&grid, tile(0, 0), tile(1, 0)));
        assert!(is_valid_move(&grid, tile(0, 0), tile(0, 1)));
    }

    #[test]
    fn directional_flags_are_symmetric() {
        // A wall on the east edge of (1,1) blocks both crossings.
        let mut grid = CollisionGrid::open(5, 5);
        grid.add_flags(tile(1, 1), CollisionFlags::BLOCK_EAST);
        assert!(!is_valid_move(&grid, tile(1, 1), tile(2, 1)));

        let mut grid = CollisionGrid::open(5, 5);
        grid.add_flags(tile(2, 1), CollisionFlags::BLOCK_WEST);
        assert!(!is_valid_move(&grid, tile(1, 1), tile(2, 1)));
        assert!(!is_valid_move(&grid, tile(2, 1), tile(1, 1)));
    }

    #[test]
    fn diagonal_move_respects_cardinal_components() {
        let mut grid = CollisionGrid::open(5, 5);
        grid.add_flags(tile(1, 1), CollisionFlags::BLOCK_NORTH);
        assert!(!is_valid_move(&grid, tile(1, 1), tile(2, 2)));
    }

    #[test]
    fn out_of_bounds_is_invalid() {
        let grid = CollisionGrid::open(3, 3);
        assert!(!is_valid_move(&grid, tile(0, 0), tile(-1, 0)));
        assert!(!is_valid_move(&grid, tile(2, 2), tile(3, 2)));
    }

    #[test]
    fn footprint_checks_every_cell() {
        // Block a tile under the southern row of a 2x2 footprint.
        let mut grid = CollisionGrid::open(6, 6);
        grid.add_flags(tile(4, 3), CollisionFlags::BLOCK_FULL);
        assert!(is_valid_move_for_footprint(&grid, tile(1, 4), tile(2, 4), 2));
        assert!(!is_valid_move_for_footprint(&grid, tile(2, 4), tile(3, 4), 2));
    }

    #[test]
    fn overlap_is_aabb() {
        assert!(is_overlapping(tile(0, 0), 2, tile(1, 1), 2));
        assert!(!is_overlapping(tile(0, 0), 2, tile(2, 0), 1));
        assert!(is_overlapping(tile(0, 0), 1, tile(0, 0), 1));
        // Different planes never overlap.
        assert!(!is_overlapping(tile(0, 0), 2, Tile::new(1, 1, 1), 2));
    }

    #[test]
    fn touching_excludes_overlap_and_diagonal_contact() {
        assert!(is_touching(tile(0, 0), 1, tile(1, 0), 1));
        assert!(is_touching(tile(0, 0), 2, tile(2, 1), 1));
        assert!(!is_touching(tile(0, 0), 1, tile(0, 0), 1));
        // Corner-to-corner contact only is not an edge.
        assert!(!is_touching(tile(0, 0), 1, tile(1, 1), 1));
    }

    #[test]
    fn greedy_step_prefers_diagonal() {
        let grid = CollisionGrid::open(10, 10);
        let step = next_greedy_step(&grid, tile(0, 0), tile(5, 5), 1, &[]);
        assert_eq!(step, Some(tile(1, 1)));
    }

    #[test]
    fn greedy_step_falls_back_when_occupied() {
        let grid = CollisionGrid::open(10, 10);
        // Diagonal candidate occupied; horizontal is next in priority.
        let occupied = [(tile(1, 1), 1)];
        let step = next_greedy_step(&grid, tile(0, 0), tile(5, 5), 1, &occupied);
        assert_eq!(step, Some(tile(1, 0)));
    }

    #[test]
    fn greedy_step_none_when_surrounded() {
        let mut grid = CollisionGrid::open(10, 10);
        for (x, y) in [(1, 1), (1, 0), (0, 1)] {
            grid.add_flags(tile(x, y), CollisionFlags::BLOCK_FULL);
        }
        assert_eq!(next_greedy_step(&grid, tile(0, 0), tile(5, 5), 1, &[]), None);
    }
}
