//! Bucketed grid spatial index for Warfront entities.
//!
//! [`SpatialIndex`] partitions tile space into square cells of
//! [`SpatialConfig::cell_size`] tiles. Every tracked entity is listed in each
//! cell its footprint overlaps, and circular range queries scan only the
//! cells covering the circle before applying an exact distance filter.
//!
//! # Bookkeeping
//!
//! The index owns all of its state: a side table from [`EntityId`] to the
//! entity's recorded position and cell keys, and a table from [`CellKey`] to
//! the ids in that cell. Callers hand entities in through the
//! [`Spatial`](warfront_core::Spatial) trait and get ids back.
//!
//! [`EntityId`]: warfront_core::EntityId

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cell;
pub mod config;
pub mod index;
pub mod raycast;

#[cfg(test)]
pub(crate) mod compliance;

pub use cell::{CellKey, CellRange};
pub use config::SpatialConfig;
pub use index::{EntityRecord, Nearest, SpatialIndex};
pub use raycast::RayHit;
