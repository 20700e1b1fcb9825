//! The path planner: retargeting, search, smoothing and memoization.

use crate::astar::{search, SearchOutcome, SearchResult};
use crate::cache::{CacheStats, PathCache};
use crate::config::PlannerConfig;
use crate::grid::PassabilityGrid;
use crate::path::Path;
use crate::smoothing::smooth;
use warfront_core::{ConfigError, GridError, TileCoord, Waypoint};

/// Cardinal offsets as `(dx, dy)` in N, S, W, E order. Row 0 is north.
const OFFSETS_4: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// Plans routes across one [`PassabilityGrid`].
///
/// Owns the grid so that every passability change goes through
/// [`set_passable`](Self::set_passable) and bumps the grid version that
/// cached routes are checked against.
///
/// ```
/// use warfront_path::{PassabilityGrid, PathPlanner, PlannerConfig};
///
/// let grid = PassabilityGrid::open(10, 10).unwrap();
/// let mut planner = PathPlanner::new(grid, PlannerConfig::default()).unwrap();
/// let path = planner.find_path(0.0, 0.0, 9.0, 9.0, true);
/// assert_eq!(path.len(), 2);
/// ```
#[derive(Debug)]
pub struct PathPlanner {
    grid: PassabilityGrid,
    config: PlannerConfig,
    cache: PathCache,
    last_search: Option<SearchResult>,
}

impl PathPlanner {
    /// Create a planner over `grid`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` fails validation.
    pub fn new(grid: PassabilityGrid, config: PlannerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let cache = PathCache::new(config.cache_capacity);
        Ok(Self {
            grid,
            config,
            cache,
            last_search: None,
        })
    }

    /// Plan a route from `(start_x, start_y)` to `(end_x, end_y)`.
    ///
    /// Both positions are floored to tiles. The returned path starts at the
    /// start tile's center and ends at the center of the destination tile,
    /// or of its nearest passable neighbour when the destination is blocked.
    ///
    /// Returns an empty path when:
    /// - either position is non-finite,
    /// - the start tile is off the map,
    /// - start and end share a tile,
    /// - the destination and all its neighbours are blocked,
    /// - no route exists, or the search hit the iteration cap.
    ///
    /// With `use_cache`, a route memoized on the current grid version is
    /// returned as an independent copy, and a fresh result is stored.
    pub fn find_path(
        &mut self,
        start_x: f32,
        start_y: f32,
        end_x: f32,
        end_y: f32,
        use_cache: bool,
    ) -> Path {
        let (Some(start), Some(end)) = (
            TileCoord::containing(start_x, start_y),
            TileCoord::containing(end_x, end_y),
        ) else {
            tracing::warn!(
                start_x,
                start_y,
                end_x,
                end_y,
                "find_path with non-finite input ignored"
            );
            return Path::empty();
        };
        if !self.grid.in_bounds(start) {
            tracing::debug!(%start, "start tile off the map");
            return Path::empty();
        }
        if start == end {
            return Path::empty();
        }

        let version = self.grid.version();
        if use_cache {
            if let Some(waypoints) = self.cache.get(start, end, version) {
                tracing::trace!(%start, %end, "route cache hit");
                return Path::new(waypoints.to_vec());
            }
        }

        let goal = if self.grid.is_passable(end) {
            end
        } else {
            match self.nearest_passable_neighbour(end, start) {
                Some(goal) => {
                    tracing::debug!(%end, %goal, "destination blocked, retargeted");
                    goal
                }
                None => {
                    tracing::debug!(%end, "destination and its neighbours are blocked");
                    return Path::empty();
                }
            }
        };
        if goal == start {
            return Path::empty();
        }

        let result = search(&self.grid, start, goal, self.config.max_iterations);
        let waypoints = match &result.outcome {
            SearchOutcome::Found { tiles, .. } => Some(self.to_waypoints(tiles)),
            SearchOutcome::Unreachable => {
                tracing::debug!(%start, %goal, expansions = result.stats.expansions, "no route");
                None
            }
            SearchOutcome::Aborted => {
                tracing::debug!(
                    %start,
                    %goal,
                    max_iterations = self.config.max_iterations,
                    "search aborted at iteration cap"
                );
                None
            }
        };
        self.last_search = Some(result);

        let Some(waypoints) = waypoints else {
            return Path::empty();
        };
        if use_cache {
            self.cache.insert(start, end, version, waypoints.clone());
        }
        Path::new(waypoints)
    }

    fn to_waypoints(&self, tiles: &[TileCoord]) -> Vec<Waypoint> {
        if self.config.smooth {
            smooth(&self.grid, tiles).into_iter().map(TileCoord::center).collect()
        } else {
            tiles.iter().map(|t| t.center()).collect()
        }
    }

    /// The passable 4-neighbour of `target` closest (Manhattan) to `from`.
    ///
    /// Ties go to the first in N, S, W, E order. `None` if all four are
    /// blocked or off the map.
    pub fn nearest_passable_neighbour(
        &self,
        target: TileCoord,
        from: TileCoord,
    ) -> Option<TileCoord> {
        OFFSETS_4
            .iter()
            .map(|&(dx, dy)| target.offset(dx, dy))
            .filter(|&tile| self.grid.is_passable(tile))
            .min_by_key(|&tile| tile.manhattan(from))
    }

    /// Whether the tile under `(x, y)` is passable.
    pub fn is_walkable(&self, x: f32, y: f32) -> bool {
        TileCoord::containing(x, y).is_some_and(|tile| self.grid.is_passable(tile))
    }

    /// Change one tile's passability. Cached routes planned before an
    /// effective change will miss.
    ///
    /// # Errors
    ///
    /// [`GridError::OutOfBounds`] for off-map tiles.
    pub fn set_passable(&mut self, tile: TileCoord, passable: bool) -> Result<bool, GridError> {
        self.grid.set_passable(tile, passable)
    }

    /// Swap in a new map. The cache is emptied.
    pub fn replace_grid(&mut self, grid: PassabilityGrid) -> PassabilityGrid {
        tracing::debug!(
            width = grid.width(),
            height = grid.height(),
            version = %grid.version(),
            dropped = self.cache.len(),
            "grid replaced"
        );
        self.cache.clear();
        self.last_search = None;
        std::mem::replace(&mut self.grid, grid)
    }

    /// Drop every memoized route.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Number of memoized routes.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Cache traffic counters.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// The route memo.
    pub fn cache(&self) -> &PathCache {
        &self.cache
    }

    /// The grid being planned over.
    pub fn grid(&self) -> &PassabilityGrid {
        &self.grid
    }

    /// Active configuration.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Outcome and statistics of the most recent A* run. Cache hits and
    /// early returns do not run a search and leave this untouched.
    pub fn last_search(&self) -> Option<&SearchResult> {
        self.last_search.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::SQRT_2;
    use warfront_test_utils::maps;

    fn t(x: i32, y: i32) -> TileCoord {
        TileCoord::new(x, y)
    }

    fn planner(rows: &[&str]) -> PathPlanner {
        planner_with(rows, PlannerConfig::default())
    }

    fn planner_with(rows: &[&str], config: PlannerConfig) -> PathPlanner {
        PathPlanner::new(PassabilityGrid::from_ascii(rows).unwrap(), config).unwrap()
    }

    fn tiles_of(path: &Path) -> Vec<TileCoord> {
        path.waypoints().iter().map(|w| w.tile().unwrap()).collect()
    }

    // ── Construction ───────────────────────────────────────────

    #[test]
    fn rejects_invalid_config() {
        let grid = PassabilityGrid::open(2, 2).unwrap();
        let cfg = PlannerConfig {
            max_iterations: 0,
            ..PlannerConfig::default()
        };
        assert_eq!(
            PathPlanner::new(grid, cfg).unwrap_err(),
            ConfigError::ZeroIterationCap
        );
    }

    // ── Route shape ────────────────────────────────────────────

    #[test]
    fn open_grid_diagonal() {
        let mut p = planner(maps::OPEN_10);
        let path = p.find_path(0.0, 0.0, 9.0, 9.0, true);
        assert!(path.len() <= 2);
        assert_eq!(path.waypoints()[0], Waypoint::new(0.5, 0.5));
        assert_eq!(path.last(), Some(Waypoint::new(9.5, 9.5)));
        assert!((path.length() - 9.0 * SQRT_2).abs() < 1e-4);
    }

    #[test]
    fn unsmoothed_route_lists_every_tile() {
        let cfg = PlannerConfig {
            smooth: false,
            ..PlannerConfig::default()
        };
        let mut p = planner_with(maps::OPEN_10, cfg);
        let path = p.find_path(0.2, 0.7, 9.9, 9.1, false);
        assert_eq!(path.len(), 10);
        assert!((path.length() - 9.0 * SQRT_2).abs() < 1e-4);
    }

    #[test]
    fn same_tile_is_empty() {
        let mut p = planner(maps::OPEN_10);
        assert!(p.find_path(3.1, 3.1, 3.9, 3.8, true).is_empty());
        assert!(p.last_search().is_none());
    }

    #[test]
    fn start_off_map_is_empty() {
        let mut p = planner(maps::OPEN_10);
        assert!(p.find_path(-1.0, 0.0, 5.0, 5.0, true).is_empty());
        assert!(p.find_path(0.0, 10.0, 5.0, 5.0, true).is_empty());
    }

    #[test]
    fn non_finite_input_is_empty() {
        let mut p = planner(maps::OPEN_10);
        assert!(p.find_path(f32::NAN, 0.0, 5.0, 5.0, true).is_empty());
        assert!(p.find_path(0.0, 0.0, f32::INFINITY, 5.0, true).is_empty());
        assert_eq!(p.cache_len(), 0);
    }

    #[test]
    fn blocked_destination_retargets_to_neighbour() {
        let mut p = planner(maps::ISOLATED_ROCK);
        let path = p.find_path(0.5, 3.5, 3.5, 3.5, true);
        assert!(!path.is_empty());
        let last = path.last().unwrap().tile().unwrap();
        assert_ne!(last, t(3, 3));
        // West neighbour is nearest to a start due west.
        assert_eq!(last, t(2, 3));
        assert!(tiles_of(&path).iter().all(|&tile| p.grid().is_passable(tile)));
    }

    #[test]
    fn retarget_ties_follow_nswe_order() {
        let p = planner(maps::ISOLATED_ROCK);
        // From directly south-east, S and E are equally near; S wins by order.
        assert_eq!(p.nearest_passable_neighbour(t(3, 3), t(5, 5)), Some(t(3, 4)));
        // Equidistant from all four: N wins.
        assert_eq!(p.nearest_passable_neighbour(t(3, 3), t(3, 3)), Some(t(3, 2)));
    }

    #[test]
    fn sealed_destination_is_empty() {
        let mut p = planner(maps::SEALED_GOAL);
        assert!(p.find_path(0.5, 0.5, 5.5, 2.5, true).is_empty());
    }

    #[test]
    fn wall_is_empty() {
        let mut p = planner(maps::SPLIT_BY_WALL);
        assert!(p.find_path(0.5, 0.5, 9.5, 5.5, true).is_empty());
        assert!(matches!(
            p.last_search().map(|r| &r.outcome),
            Some(SearchOutcome::Unreachable)
        ));
        assert_eq!(p.cache_len(), 0);
    }

    #[test]
    fn corner_route_keeps_the_turn() {
        let mut p = planner(maps::CORNER);
        let path = p.find_path(0.5, 0.5, 1.5, 1.5, false);
        assert_eq!(tiles_of(&path), vec![t(0, 0), t(0, 1), t(1, 1)]);
    }

    #[test]
    fn iteration_cap_aborts() {
        let rows = maps::long_barrier(60, 60);
        let grid = PassabilityGrid::from_ascii(&rows).unwrap();
        let cfg = PlannerConfig {
            max_iterations: 25,
            ..PlannerConfig::default()
        };
        let mut p = PathPlanner::new(grid, cfg).unwrap();
        assert!(p.find_path(0.5, 0.5, 59.5, 0.5, true).is_empty());
        assert!(matches!(
            p.last_search().map(|r| &r.outcome),
            Some(SearchOutcome::Aborted)
        ));
    }

    // ── Cache ──────────────────────────────────────────────────

    #[test]
    fn cached_copies_are_independent() {
        let mut p = planner(maps::SERPENTINE);
        let a = p.find_path(0.5, 0.5, 0.5, 4.5, true);
        let b = p.find_path(0.5, 0.5, 0.5, 4.5, true);
        assert!(!a.is_empty());
        assert_eq!(a, b);
        assert_eq!(p.cache_stats().hits, 1);

        // Tamper with the copy served from the cache, then hit it again.
        let mut served = b.into_waypoints();
        served.clear();
        served.push(Waypoint::new(99.5, 99.5));
        let c = p.find_path(0.5, 0.5, 0.5, 4.5, true);
        assert_eq!(p.cache_stats().hits, 2);
        assert_eq!(a, c);
    }

    #[test]
    fn cache_key_uses_floored_tiles() {
        let mut p = planner(maps::OPEN_10);
        p.find_path(0.1, 0.1, 7.2, 2.2, true);
        p.find_path(0.9, 0.4, 7.8, 2.6, true);
        assert_eq!(p.cache_stats().hits, 1);
        assert_eq!(p.cache_len(), 1);
    }

    #[test]
    fn bypass_does_not_read_or_write() {
        let mut p = planner(maps::OPEN_10);
        p.find_path(0.5, 0.5, 5.5, 2.5, false);
        assert_eq!(p.cache_len(), 0);
        p.find_path(0.5, 0.5, 5.5, 2.5, true);
        p.find_path(0.5, 0.5, 5.5, 2.5, false);
        let s = p.cache_stats();
        assert_eq!((s.hits, s.misses), (0, 1));
    }

    #[test]
    fn capacity_bounds_cache() {
        let cfg = PlannerConfig {
            cache_capacity: 3,
            ..PlannerConfig::default()
        };
        let mut p = planner_with(maps::OPEN_10, cfg);
        for x in 1..=6 {
            p.find_path(0.5, 0.5, x as f32 + 0.5, 9.5, true);
            assert!(p.cache_len() <= 3);
        }
        assert!(!p.cache().contains(t(0, 0), t(1, 9)));
        assert!(p.cache().contains(t(0, 0), t(6, 9)));
        assert_eq!(p.cache_stats().evictions, 3);
    }

    #[test]
    fn passability_change_invalidates_cached_route() {
        let mut p = planner(maps::OPEN_10);
        let before = p.find_path(0.5, 5.5, 9.5, 5.5, true);
        assert_eq!(before.len(), 2);

        assert_eq!(p.set_passable(t(5, 5), false), Ok(true));
        let after = p.find_path(0.5, 5.5, 9.5, 5.5, true);
        assert_eq!(p.cache_stats().stale, 1);
        assert!(after.len() > 2);
        assert!(!tiles_of(&after).contains(&t(5, 5)));
    }

    #[test]
    fn no_op_passability_write_keeps_cache_warm() {
        let mut p = planner(maps::OPEN_10);
        p.find_path(0.5, 5.5, 9.5, 5.5, true);
        assert_eq!(p.set_passable(t(5, 5), true), Ok(false));
        p.find_path(0.5, 5.5, 9.5, 5.5, true);
        assert_eq!(p.cache_stats().hits, 1);
    }

    #[test]
    fn replace_grid_drops_routes() {
        let mut p = planner(maps::OPEN_10);
        p.find_path(0.5, 0.5, 9.5, 9.5, true);
        let old = p.replace_grid(PassabilityGrid::from_ascii(maps::SPLIT_BY_WALL).unwrap());
        assert_eq!(old.width(), 10);
        assert_eq!(p.cache_len(), 0);
        assert!(p.last_search().is_none());
        assert!(p.find_path(0.5, 0.5, 9.5, 5.5, true).is_empty());
    }

    #[test]
    fn walkability_probe() {
        let p = planner(maps::ISOLATED_ROCK);
        assert!(p.is_walkable(0.2, 0.2));
        assert!(!p.is_walkable(3.5, 3.5));
        assert!(!p.is_walkable(-0.5, 0.0));
        assert!(!p.is_walkable(f32::NAN, 0.0));
    }
}
