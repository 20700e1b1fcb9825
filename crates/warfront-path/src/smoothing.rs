//! String pulling over a tile route.

use crate::grid::PassabilityGrid;
use warfront_core::TileCoord;

/// Whether a unit can walk straight from tile `a` to tile `b`.
///
/// Steps through the tiles of the Bresenham line from `a` to `b`. Every tile
/// stepped onto must be passable, and a diagonal step also needs both
/// orthogonal tiles it squeezes between to be passable. The origin tile is
/// not tested: the unit is already standing there.
pub fn line_of_sight(grid: &PassabilityGrid, a: TileCoord, b: TileCoord) -> bool {
    let dx = (i64::from(b.x) - i64::from(a.x)).abs();
    let dy = -(i64::from(b.y) - i64::from(a.y)).abs();
    let sx: i32 = if a.x < b.x { 1 } else { -1 };
    let sy: i32 = if a.y < b.y { 1 } else { -1 };
    let mut err = dx + dy;
    let mut current = a;

    while current != b {
        let e2 = 2 * err;
        let mut step_x = 0;
        let mut step_y = 0;
        if e2 >= dy {
            err += dy;
            step_x = sx;
        }
        if e2 <= dx {
            err += dx;
            step_y = sy;
        }
        if step_x != 0
            && step_y != 0
            && (!grid.is_passable(current.offset(step_x, 0))
                || !grid.is_passable(current.offset(0, step_y)))
        {
            return false;
        }
        current = current.offset(step_x, step_y);
        if !grid.is_passable(current) {
            return false;
        }
    }
    true
}

/// Drop every tile that the route can skip with a straight walk.
///
/// From each anchor, jumps to the farthest later tile still in line of
/// sight. The first and last tiles are always kept.
pub fn smooth(grid: &PassabilityGrid, tiles: &[TileCoord]) -> Vec<TileCoord> {
    if tiles.len() <= 2 {
        return tiles.to_vec();
    }
    let mut out = Vec::with_capacity(tiles.len());
    let mut anchor = 0;
    out.push(tiles[0]);
    while anchor < tiles.len() - 1 {
        let mut next = anchor + 1;
        for candidate in (anchor + 2..tiles.len()).rev() {
            if line_of_sight(grid, tiles[anchor], tiles[candidate]) {
                next = candidate;
                break;
            }
        }
        out.push(tiles[next]);
        anchor = next;
    }
    out
}
