//! 8-connected A* over a [`PassabilityGrid`].
//!
//! Cardinal steps cost 1, diagonal steps cost √2. A diagonal step is only
//! allowed when both orthogonal tiles it brushes past are passable, so paths
//! never clip the corner of a blocked tile. The heuristic is octile
//! distance, which is exact on an open grid, so the first time the goal is
//! popped its g is optimal.

use crate::grid::PassabilityGrid;
use crate::open_set::OpenSet;
use smallvec::SmallVec;
use std::f64::consts::SQRT_2;
use std::fmt;
use warfront_core::TileCoord;

/// Neighbour offsets as `(dx, dy)`: cardinals first, then diagonals.
const OFFSETS_8: [(i32, i32); 8] = [
    (0, -1),
    (0, 1),
    (-1, 0),
    (1, 0),
    (-1, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
];

/// Octile distance between two tiles:
/// `max(|dx|, |dy|) + (√2 − 1) · min(|dx|, |dy|)`.
pub fn octile(a: TileCoord, b: TileCoord) -> f64 {
    let dx = f64::from(a.x.abs_diff(b.x));
    let dy = f64::from(a.y.abs_diff(b.y));
    dx.max(dy) + (SQRT_2 - 1.0) * dx.min(dy)
}

/// Passable neighbours of `tile` with their step costs.
pub fn walkable_neighbours(
    grid: &PassabilityGrid,
    tile: TileCoord,
) -> SmallVec<[(TileCoord, f64); 8]> {
    let mut out = SmallVec::new();
    for (dx, dy) in OFFSETS_8 {
        let next = tile.offset(dx, dy);
        if !grid.is_passable(next) {
            continue;
        }
        if dx != 0 && dy != 0 {
            if !grid.is_passable(tile.offset(dx, 0)) || !grid.is_passable(tile.offset(0, dy)) {
                continue;
            }
            out.push((next, SQRT_2));
        } else {
            out.push((next, 1.0));
        }
    }
    out
}

/// How a search ended.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchOutcome {
    /// A route was found.
    Found {
        /// Tiles from start to goal inclusive.
        tiles: Vec<TileCoord>,
        /// Summed step cost.
        cost: f64,
    },
    /// The frontier emptied without reaching the goal.
    Unreachable,
    /// The expansion cap was hit first.
    Aborted,
}

impl SearchOutcome {
    /// Whether a route was found.
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }
}

impl fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found { tiles, cost } => {
                write!(f, "found ({} tiles, cost {cost:.3})", tiles.len())
            }
            Self::Unreachable => write!(f, "unreachable"),
            Self::Aborted => write!(f, "aborted"),
        }
    }
}

/// Work done by one search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Tiles popped and expanded.
    pub expansions: u32,
    /// Entries pushed onto the open heap.
    pub pushes: u64,
    /// Superseded or already-closed entries discarded on pop.
    pub stale_pops: u64,
}

/// Outcome plus statistics.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult {
    /// How the search ended.
    pub outcome: SearchOutcome,
    /// Work done.
    pub stats: SearchStats,
}

/// Run A* from `start` to `goal`.
///
/// `start` need not be passable (a unit standing on a freshly placed
/// building can still walk off it), but `goal` must be for a route to
/// exist. Gives up with [`SearchOutcome::Aborted`] once `max_iterations`
/// tiles have been expanded without reaching the goal.
pub fn search(
    grid: &PassabilityGrid,
    start: TileCoord,
    goal: TileCoord,
    max_iterations: u32,
) -> SearchResult {
    let mut open = OpenSet::new();
    let mut expansions: u32 = 0;
    open.relax(start, 0.0, octile(start, goal), None);

    let outcome = loop {
        let Some(current) = open.pop() else {
            break SearchOutcome::Unreachable;
        };
        if current.tile == goal {
            break SearchOutcome::Found {
                tiles: open.trace_back(goal),
                cost: current.g,
            };
        }
        if expansions >= max_iterations {
            break SearchOutcome::Aborted;
        }
        expansions += 1;

        for (next, step) in walkable_neighbours(grid, current.tile) {
            if open.is_closed(next) {
                continue;
            }
            let g = current.g + step;
            open.relax(next, g, octile(next, goal), Some(current.tile));
        }
    };

    SearchResult {
        outcome,
        stats: SearchStats {
            expansions,
            pushes: open.pushes(),
            stale_pops: open.stale_pops(),
        },
    }
}
