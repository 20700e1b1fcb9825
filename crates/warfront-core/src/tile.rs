//! Tile coordinates and continuous waypoints.

use std::fmt;

/// Integer address of a map tile: `x` is the column, `y` the row.
///
/// Tile coordinates are signed so that flooring a continuous position that
/// lies off the map still yields a well-defined (out-of-bounds) tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileCoord {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl TileCoord {
    /// Create a tile coordinate.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Tile containing the continuous position `(x, y)`.
    ///
    /// Returns `None` for non-finite input. Positions beyond the `i32`
    /// range saturate.
    pub fn containing(x: f32, y: f32) -> Option<Self> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        Some(Self::new(x.floor() as i32, y.floor() as i32))
    }

    /// Continuous center of this tile.
    pub fn center(self) -> Waypoint {
        Waypoint::new(self.x as f32 + 0.5, self.y as f32 + 0.5)
    }

    /// Manhattan (L1) distance to `other`.
    pub fn manhattan(self, other: TileCoord) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Offset this coordinate by `(dx, dy)`.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A point on a route, in continuous tile space.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Waypoint {
    /// Horizontal position in tiles.
    pub x: f32,
    /// Vertical position in tiles.
    pub y: f32,
}

impl Waypoint {
    /// Create a waypoint.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another waypoint.
    pub fn distance(self, other: Waypoint) -> f32 {
        self.distance_to(other.x, other.y)
    }

    /// Euclidean distance to the point `(x, y)`.
    pub fn distance_to(self, x: f32, y: f32) -> f32 {
        let dx = self.x - x;
        let dy = self.y - y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Tile containing this waypoint, if its coordinates are finite.
    pub fn tile(self) -> Option<TileCoord> {
        TileCoord::containing(self.x, self.y)
    }
}
