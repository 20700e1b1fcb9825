//! Core types and traits for the Warfront navigation core.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! vocabulary shared by the spatial index and the path planner: entity and
//! faction ids, tile coordinates, waypoints, footprints, the [`Spatial`]
//! trait entities implement, and the error enums.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod entity;
pub mod error;
pub mod id;
pub mod tile;

pub use entity::{EntityKind, Footprint, Spatial};
pub use error::{ConfigError, GridError, SpatialError};
pub use id::{EntityId, FactionId, GridVersion};
pub use tile::{TileCoord, Waypoint};
