//! Warfront: the navigation core of a real-time strategy game.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Warfront sub-crates and adds [`NavWorld`], the context object that
//! owns one spatial index and one path planner for the current map.
//!
//! # Quick start
//!
//! ```rust
//! use warfront::prelude::*;
//! use warfront_test_utils::TestUnit;
//!
//! let grid = PassabilityGrid::from_ascii(&[
//!     "........",
//!     "...##...",
//!     "...##...",
//!     "........",
//! ])
//! .unwrap();
//! let mut world = NavWorld::new(grid, NavConfig::default()).unwrap();
//!
//! // Track a unit, then look around it.
//! world.index_mut().insert(&TestUnit::new(1, 0.5, 1.5)).unwrap();
//! assert_eq!(world.index().query(1.0, 1.0, 2.0), vec![EntityId(1)]);
//!
//! // Route it past the rocks.
//! let path = world.planner_mut().find_path(0.5, 1.5, 7.5, 1.5, true);
//! assert!(!path.is_empty());
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `warfront-core` | Ids, tile coordinates, the `Spatial` trait, errors |
//! | [`spatial`] | `warfront-spatial` | Bucketed spatial index, range queries, raycasts |
//! | [`path`] | `warfront-path` | Passability grid, A*, smoothing, route cache |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod config;
mod world;

pub use config::NavConfig;
pub use world::NavWorld;

/// Core types, traits, and ids (`warfront-core`).
///
/// Entity and faction ids, [`types::TileCoord`] and [`types::Waypoint`],
/// the [`types::Spatial`] trait entities implement, and the error enums.
pub use warfront_core as types;

/// Bucketed grid spatial index (`warfront-spatial`).
///
/// [`spatial::SpatialIndex`] answers radius queries, nearest-entity
/// searches and sampled raycasts.
pub use warfront_spatial as spatial;

/// Path planning (`warfront-path`).
///
/// [`path::PathPlanner`] runs A* over a [`path::PassabilityGrid`] and
/// memoizes smoothed routes.
pub use warfront_path as path;

/// Common imports for typical Warfront usage.
pub mod prelude {
    // Context
    pub use crate::{NavConfig, NavWorld};

    // Core types and traits
    pub use warfront_core::{
        EntityId, EntityKind, FactionId, Footprint, GridVersion, Spatial, TileCoord, Waypoint,
    };

    // Errors
    pub use warfront_core::{ConfigError, GridError, SpatialError};

    // Spatial index
    pub use warfront_spatial::{Nearest, RayHit, SpatialConfig, SpatialIndex};

    // Path planning
    pub use warfront_path::{PassabilityGrid, Path, PathPlanner, PlannerConfig};
}
