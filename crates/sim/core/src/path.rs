//! Collision-aware breadth-first pathfinding.
//!
//! Paths are tile-by-tile routes excluding the start tile. The search is
//! 8-directional; diagonal expansion is refused when either flanking
//! cardinal step is invalid for the full footprint, so routes never cut
//! a blocked corner.

use std::collections::VecDeque;

use crate::collision::{is_touching, is_valid_move_for_footprint};
use crate::grid::CollisionGrid;
use crate::model::{Direction, Tile};

/// How the search decides it has arrived.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GoalMode {
    /// The path must end exactly on the goal tile (player movement).
    Exact,
    /// The footprint must touch, but not overlap, the goal tile
    /// (NPC melee reach).
    Adjacent,
}

/// Footprint size and goal condition for one search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathRequest {
    pub size: i32,
    pub goal_mode: GoalMode,
}

impl PathRequest {
    pub fn exact() -> Self {
        Self {
            size: 1,
            goal_mode: GoalMode::Exact,
        }
    }

    pub fn adjacent(size: i32) -> Self {
        Self {
            size,
            goal_mode: GoalMode::Adjacent,
        }
    }
}

/// Computes the shortest route from `start` to `goal`.
///
/// Returns the ordered future waypoints, excluding `start`. An empty vec
/// means either `start == goal`, the goal condition already holds, or no
/// route exists; unreachable goals are not an error.
pub fn find_path(
    grid: &CollisionGrid,
    start: Tile,
    goal: Tile,
    request: PathRequest,
) -> Vec<Tile> {
    if start == goal || start.plane != goal.plane || !grid.contains(start) {
        return Vec::new();
    }

    let width = grid.width() as usize;
    let height = grid.height() as usize;
    let index = |t: Tile| t.y as usize * width + t.x as usize;

    let mut visited = vec![false; width * height];
    let mut parent: Vec<Option<Tile>> = vec![None; width * height];
    let mut frontier = VecDeque::new();

    visited[index(start)] = true;
    frontier.push_back(start);

    while let Some(current) = frontier.pop_front() {
        let reached = match request.goal_mode {
            GoalMode::Exact => current == goal,
            GoalMode::Adjacent => is_adjacent_goal(current, goal, request.size),
        };
        if reached {
            return reconstruct(&parent, index, start, current);
        }

        // Expansion order doubles as the tie-break among equal-length
        // routes; Direction::ALL keeps it stable.
        for direction in Direction::ALL {
            let (dx, dy) = direction.delta();
            let next = current.step(dx, dy);
            if !grid.contains(next) || visited[index(next)] {
                continue;
            }

            if direction.is_diagonal() {
                let horizontal = current.step(dx, 0);
                let vertical = current.step(0, dy);
                if !is_valid_move_for_footprint(grid, current, horizontal, request.size)
                    || !is_valid_move_for_footprint(grid, current, vertical, request.size)
                {
                    continue;
                }
            }

            if is_valid_move_for_footprint(grid, current, next, request.size) {
                visited[index(next)] = true;
                parent[index(next)] = Some(current);
                frontier.push_back(next);
            }
        }
    }

    Vec::new()
}

/// Whether `current` is an acceptable melee-reach cell for `goal`:
/// one of the eight cells surrounding the goal whose footprint placement
/// touches the goal's 1×1 footprint without overlapping it.
fn is_adjacent_goal(current: Tile, goal: Tile, size: i32) -> bool {
    for dx in -1..=1 {
        for dy in -1..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            let candidate = goal.step(dx, dy);
            if current == candidate && is_touching(candidate, size, goal, 1) {
                return true;
            }
        }
    }
    false
}

fn reconstruct(
    parent: &[Option<Tile>],
    index: impl Fn(Tile) -> usize,
    start: Tile,
    end: Tile,
) -> Vec<Tile> {
    let mut path = Vec::new();
    let mut at = Some(end);
    while let Some(tile) = at {
        if tile == start {
            break;
        }
        path.push(tile);
        at = parent[index(tile)];
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::CollisionFlags;

    fn tile(x: i32, y: i32) -> Tile {
        Tile::new(x, y, 0)
    }

    #[test]
    fn start_equals_goal_yields_empty_path() {
        let grid = CollisionGrid::open(8, 8);
        assert!(find_path(&grid, tile(3, 3), tile(3, 3), PathRequest::exact()).is_empty());
    }

    #[test]
    fn open_grid_path_length_is_chebyshev_distance() {
        let grid = CollisionGrid::open(8, 8);
        let path = find_path(&grid, tile(0, 0), tile(4, 4), PathRequest::exact());
        assert_eq!(path.len(), 4);
        assert_eq!(path.last(), Some(&tile(4, 4)));
        // Pure diagonal: every step advances both axes.
        for (i, step) in path.iter().enumerate() {
            assert_eq!(*step, tile(i as i32 + 1, i as i32 + 1));
        }
    }

    #[test]
    fn path_never_starts_with_current_position() {
        let grid = CollisionGrid::open(8, 8);
        let path = find_path(&grid, tile(2, 2), tile(5, 2), PathRequest::exact());
        assert!(!path.is_empty());
        assert_ne!(path[0], tile(2, 2));
    }

    #[test]
    fn blocked_corner_is_not_cut() {
        // Wall both orthogonal neighbours of the diagonal from (1,1) to (2,2).
        let mut grid = CollisionGrid::open(8, 8);
        grid.add_flags(tile(2, 1), CollisionFlags::BLOCK_FULL);
        grid.add_flags(tile(1, 2), CollisionFlags::BLOCK_FULL);
        let path = find_path(&grid, tile(1, 1), tile(2, 2), PathRequest::exact());
        for pair in path.windows(2) {
            let (dx, dy) = (pair[1].x - pair[0].x, pair[1].y - pair[0].y);
            if dx != 0 && dy != 0 {
                let horizontal = pair[0].step(dx, 0);
                let vertical = pair[0].step(0, dy);
                assert!(
                    !grid.flags(horizontal).is_impassable()
                        || !grid.flags(vertical).is_impassable()
                );
            }
        }
        // The route must leave the walled pocket before approaching.
        assert!(path.len() > 1);
        assert_eq!(path.last(), Some(&tile(2, 2)));
    }

    #[test]
    fn unreachable_goal_yields_empty_path() {
        let mut grid = CollisionGrid::open(8, 8);
        // Wall off column x == 4 entirely.
        for y in 0..8 {
            grid.add_flags(tile(4, y), CollisionFlags::BLOCK_FULL);
        }
        assert!(find_path(&grid, tile(0, 0), tile(6, 0), PathRequest::exact()).is_empty());
    }

    #[test]
    fn adjacent_goal_stops_beside_target() {
        let grid = CollisionGrid::open(10, 10);
        let path = find_path(&grid, tile(0, 5), tile(5, 5), PathRequest::adjacent(1));
        let end = *path.last().unwrap();
        assert!(is_touching(end, 1, tile(5, 5), 1));
        assert_ne!(end, tile(5, 5));
    }

    #[test]
    fn adjacent_goal_already_satisfied_yields_empty_path() {
        let grid = CollisionGrid::open(10, 10);
        let path = find_path(&grid, tile(4, 5), tile(5, 5), PathRequest::adjacent(1));
        assert!(path.is_empty());
    }

    #[test]
    fn large_footprint_keeps_clear_of_narrow_gaps() {
        // A 1-wide corridor admits a 1x1 actor but not 2x2.
        let mut grid = CollisionGrid::open(10, 10);
        for x in 0..10 {
            grid.add_flags(tile(x, 3), CollisionFlags::BLOCK_FULL);
            grid.add_flags(tile(x, 5), CollisionFlags::BLOCK_FULL);
        }
        let narrow = find_path(&grid, tile(0, 4), tile(9, 4), PathRequest::exact());
        assert!(!narrow.is_empty());

        let wide = find_path(
            &grid,
            tile(0, 4),
            tile(9, 4),
            PathRequest {
                size: 2,
                goal_mode: GoalMode::Exact,
            },
        );
        assert!(wide.is_empty());
    }
}
