//! Error types for the navigation core.
//!
//! Ordinary "nothing found" outcomes (unreachable targets, aborted searches,
//! empty ranges) are not errors; they are reported as empty collections.
//! These enums cover construction failures and caller misuse only.

use crate::id::EntityId;
use crate::tile::TileCoord;
use thiserror::Error;

/// Errors from spatial index mutations.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SpatialError {
    /// A coordinate or radius was NaN or infinite.
    #[error("invalid argument: {what} must be finite, got {value}")]
    InvalidArgument {
        /// Which argument was rejected.
        what: &'static str,
        /// The offending value.
        value: f32,
    },
    /// `insert` was called for an entity the index already tracks.
    #[error("entity {0} is already tracked")]
    AlreadyTracked(EntityId),
    /// `update` was called for an entity the index does not track.
    #[error("entity {0} is not tracked")]
    UnknownEntity(EntityId),
}

/// Errors from passability grid construction and mutation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// Attempted to construct a grid with zero tiles.
    #[error("grid must have at least one tile")]
    EmptyGrid,
    /// A grid dimension exceeds what tile coordinates can address.
    #[error("{name} = {value} exceeds maximum {max}")]
    DimensionTooLarge {
        /// Which dimension (`"width"` or `"height"`).
        name: &'static str,
        /// The requested value.
        value: u32,
        /// The largest accepted value.
        max: u32,
    },
    /// The passability buffer length does not equal `width * height`.
    #[error("passability buffer has {actual} tiles, expected {expected}")]
    DimensionMismatch {
        /// `width * height`.
        expected: usize,
        /// Length of the supplied buffer.
        actual: usize,
    },
    /// A tile lies outside the grid.
    #[error("tile {tile} out of bounds: [0, {width}) x [0, {height})")]
    OutOfBounds {
        /// The offending tile.
        tile: TileCoord,
        /// Grid width.
        width: u32,
        /// Grid height.
        height: u32,
    },
    /// An ASCII map row is shorter or longer than the first row.
    #[error("map row {row} has {actual} columns, expected {expected}")]
    RaggedRow {
        /// Row index.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of this row.
        actual: usize,
    },
    /// An ASCII map row contained a character with no passability meaning.
    #[error("unrecognised map glyph {glyph:?} at row {row}, column {column}")]
    UnknownGlyph {
        /// The character.
        glyph: char,
        /// Row index.
        row: usize,
        /// Column index.
        column: usize,
    },
}

/// Errors detected while validating configuration.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// Spatial bucket size is zero, negative, or non-finite.
    #[error("cell_size must be finite and positive, got {value}")]
    InvalidCellSize {
        /// The invalid value.
        value: f32,
    },
    /// Raycast sample spacing is zero, negative, or non-finite.
    #[error("raycast_step must be finite and positive, got {value}")]
    InvalidRaycastStep {
        /// The invalid value.
        value: f32,
    },
    /// The A* expansion cap is zero, which would abort every search.
    #[error("max_iterations must be at least 1")]
    ZeroIterationCap,
    /// The grid handed to a component failed validation.
    #[error("grid: {0}")]
    Grid(#[from] GridError),
}
