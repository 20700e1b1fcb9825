//! The navigation context for one map.

use crate::config::NavConfig;
use warfront_core::{ConfigError, GridError, TileCoord};
use warfront_path::{PassabilityGrid, PathPlanner};
use warfront_spatial::SpatialIndex;

/// Owns the spatial index and path planner for the current map.
///
/// Game logic holds one `NavWorld` and borrows the components from it:
/// movement and combat code use [`index_mut`](Self::index_mut) to keep
/// entity positions current, AI code asks [`planner_mut`](Self::planner_mut)
/// for routes. Map edits go through [`set_passable`](Self::set_passable) so
/// that cached routes are invalidated.
#[derive(Debug)]
pub struct NavWorld {
    config: NavConfig,
    index: SpatialIndex,
    planner: PathPlanner,
}

impl NavWorld {
    /// Build both components for `grid`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if either half of `config` is invalid.
    pub fn new(grid: PassabilityGrid, config: NavConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let index = SpatialIndex::new(config.spatial.clone())?;
        let planner = PathPlanner::new(grid, config.planner.clone())?;
        tracing::debug!(
            width = planner.grid().width(),
            height = planner.grid().height(),
            cell_size = config.spatial.cell_size,
            "nav world created"
        );
        Ok(Self {
            config,
            index,
            planner,
        })
    }

    /// Start over on a new map: the index is emptied and the planner
    /// switches to `grid` with an empty route cache.
    pub fn regenerate(&mut self, grid: PassabilityGrid) {
        tracing::debug!(
            width = grid.width(),
            height = grid.height(),
            dropped_entities = self.index.len(),
            "nav world regenerated"
        );
        self.index.clear();
        self.planner.replace_grid(grid);
    }

    /// Change one tile's passability. Returns whether it changed.
    ///
    /// # Errors
    ///
    /// [`GridError::OutOfBounds`] for off-map tiles.
    pub fn set_passable(&mut self, tile: TileCoord, passable: bool) -> Result<bool, GridError> {
        self.planner.set_passable(tile, passable)
    }

    /// The spatial index.
    pub fn index(&self) -> &SpatialIndex {
        &self.index
    }

    /// The spatial index, for insert / update / remove.
    pub fn index_mut(&mut self) -> &mut SpatialIndex {
        &mut self.index
    }

    /// The path planner.
    pub fn planner(&self) -> &PathPlanner {
        &self.planner
    }

    /// The path planner, for `find_path` and cache control.
    pub fn planner_mut(&mut self) -> &mut PathPlanner {
        &mut self.planner
    }

    /// Both components at once, for systems that query one while
    /// mutating the other.
    pub fn split_mut(&mut self) -> (&mut SpatialIndex, &mut PathPlanner) {
        (&mut self.index, &mut self.planner)
    }

    /// Configuration the world was built with.
    pub fn config(&self) -> &NavConfig {
        &self.config
    }
}
