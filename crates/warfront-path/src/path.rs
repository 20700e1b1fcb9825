//! Waypoint list with a follow cursor.

use warfront_core::Waypoint;

/// An ordered list of tile-center waypoints plus the index of the one the
/// unit is currently heading for.
///
/// An empty path means there is nothing to follow: no route exists, the
/// unit is already on the destination tile, or the search gave up.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    waypoints: Vec<Waypoint>,
    cursor: usize,
}

impl Path {
    /// Wrap `waypoints` with the cursor on the first one.
    pub fn new(waypoints: Vec<Waypoint>) -> Self {
        Self {
            waypoints,
            cursor: 0,
        }
    }

    /// A path with no waypoints.
    pub fn empty() -> Self {
        Self::default()
    }

    /// All waypoints, including ones already passed.
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Total number of waypoints.
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Whether there are no waypoints at all.
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Index of the waypoint being headed for.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Waypoint being headed for, or `None` once finished.
    pub fn current(&self) -> Option<Waypoint> {
        self.waypoints.get(self.cursor).copied()
    }

    /// Final waypoint.
    pub fn last(&self) -> Option<Waypoint> {
        self.waypoints.last().copied()
    }

    /// Move the cursor to the next waypoint. Returns the new current
    /// waypoint, if any.
    pub fn advance(&mut self) -> Option<Waypoint> {
        if self.cursor < self.waypoints.len() {
            self.cursor += 1;
        }
        self.current()
    }

    /// Advance if `(x, y)` is within `radius` of the current waypoint.
    /// Returns whether the cursor moved.
    pub fn advance_if_reached(&mut self, x: f32, y: f32, radius: f32) -> bool {
        match self.current() {
            Some(wp) if wp.distance_to(x, y) <= radius => {
                self.advance();
                true
            }
            _ => false,
        }
    }

    /// Whether every waypoint has been passed.
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.waypoints.len()
    }

    /// Waypoints not yet passed, current one first.
    pub fn remaining(&self) -> &[Waypoint] {
        &self.waypoints[self.cursor.min(self.waypoints.len())..]
    }

    /// Summed straight-line length of all segments.
    pub fn length(&self) -> f32 {
        self.waypoints
            .windows(2)
            .map(|pair| pair[0].distance(pair[1]))
            .sum()
    }

    /// Unwrap into the raw waypoint list.
    pub fn into_waypoints(self) -> Vec<Waypoint> {
        self.waypoints
    }
}

impl From<Vec<Waypoint>> for Path {
    fn from(waypoints: Vec<Waypoint>) -> Self {
        Self::new(waypoints)
    }
}
