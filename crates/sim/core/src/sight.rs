//! Line-of-sight computation.
//!
//! Sight is an unobstructed straight ray between a source footprint and a
//! candidate tile within range. The ray is marched with integer
//! fixed-point arithmetic: one tile per step along the dominant axis,
//! with a 16-bit fractional accumulator tracking when the minor axis
//! crosses into a new tile. Any impassable tile along the ray breaks
//! visibility.

use crate::collision::is_touching;
use crate::grid::CollisionGrid;
use crate::model::Tile;

/// Half-tile offset in 16.16 fixed point, used to start the minor-axis
/// accumulator at the centre of the source tile.
const HALF_TILE: i32 = 0x8000;

/// Whether `target` is visible from an N×N footprint anchored at `source`.
///
/// The ray is cast from the footprint cell nearest the target. Both
/// endpoints must be unblocked, the target must be within `range` tiles
/// of the footprint on both axes, and every tile the ray passes through
/// must be passable. A `range` of 1 reduces to the adjacency test.
pub fn line_of_sight(
    grid: &CollisionGrid,
    source: Tile,
    source_size: i32,
    target: Tile,
    range: i32,
) -> bool {
    if source.plane != target.plane || !grid.contains(target) {
        return false;
    }

    // Nearest footprint cell to the target.
    let origin = Tile::new(
        target.x.clamp(source.x, source.x + source_size - 1),
        target.y.clamp(source.y, source.y + source_size - 1),
        source.plane,
    );
    let dx = target.x - origin.x;
    let dy = target.y - origin.y;
    if dx.abs() > range || dy.abs() > range {
        return false;
    }

    if grid.flags(origin).is_impassable() || grid.flags(target).is_impassable() {
        return false;
    }

    if range == 1 {
        return is_touching(source, source_size, target, 1);
    }

    if dx == 0 && dy == 0 {
        // Target inside the footprint.
        return true;
    }

    if dx.abs() > dy.abs() {
        march(grid, origin.x, origin.y, dx, dy, target.plane, Axis::X)
    } else {
        march(grid, origin.y, origin.x, dy, dx, target.plane, Axis::Y)
    }
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

/// Steps one tile at a time along the major axis, carrying the minor
/// coordinate in 16.16 fixed point. Checks the tile at every major step
/// and again whenever the accumulator crosses a tile boundary.
fn march(
    grid: &CollisionGrid,
    major_start: i32,
    minor_start: i32,
    major_delta: i32,
    minor_delta: i32,
    plane: u8,
    axis: Axis,
) -> bool {
    let blocked = |major: i32, minor: i32| {
        let tile = match axis {
            Axis::X => Tile::new(major, minor, plane),
            Axis::Y => Tile::new(minor, major, plane),
        };
        grid.flags(tile).is_impassable()
    };

    let step = major_delta.signum();
    let slope = (minor_delta << 16) / major_delta.abs();
    let mut minor_scaled = (minor_start << 16) + HALF_TILE;
    if minor_delta < 0 {
        // Rounding bias so descending rays cross boundaries symmetrically.
        minor_scaled -= 1;
    }

    let major_end = major_start + major_delta;
    let mut major = major_start;
    while major != major_end {
        major += step;
        let minor = minor_scaled >> 16;
        if blocked(major, minor) {
            return false;
        }
        minor_scaled += slope;
        let crossed = minor_scaled >> 16;
        if crossed != minor && blocked(major, crossed) {
            return false;
        }
    }
    true
}

/// Every tile within the actor's square attack range that has line of
/// sight from its footprint. The actor's own footprint tiles are skipped.
pub fn visible_tiles(
    grid: &CollisionGrid,
    position: Tile,
    size: i32,
    range: i32,
) -> Vec<Tile> {
    let mut out = Vec::new();
    for x in (position.x - range)..=(position.x + size - 1 + range) {
        for y in (position.y - range)..=(position.y + size - 1 + range) {
            let candidate = Tile::new(x, y, position.plane);
            if !grid.contains(candidate) {
                continue;
            }
            let inside_footprint = x >= position.x
                && x < position.x + size
                && y >= position.y
                && y < position.y + size;
            if inside_footprint {
                continue;
            }
            if line_of_sight(grid, position, size, candidate, range) {
                out.push(candidate);
            }
        }
    }
    out
}
