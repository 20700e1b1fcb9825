//! Spatial index configuration.

use warfront_core::ConfigError;

/// Tuning knobs for [`SpatialIndex`](crate::SpatialIndex).
#[derive(Clone, Debug, PartialEq)]
pub struct SpatialConfig {
    /// Side length of one bucket, in tiles. Default: 4.0.
    ///
    /// Roughly the typical query radius works well: smaller cells mean more
    /// bucket lookups per query, larger cells mean more distance checks.
    pub cell_size: f32,
    /// Distance between raycast samples, in tiles. Default: 0.5.
    ///
    /// Must stay below the smallest footprint radius (0.5 for 1×1 units)
    /// for the sampled sweep not to step over a unit.
    pub raycast_step: f32,
}

impl Default for SpatialConfig {
    fn default() -> Self {
        Self {
            cell_size: 4.0,
            raycast_step: 0.5,
        }
    }
}

impl SpatialConfig {
    /// Config with the given cell size and default raycast spacing.
    pub fn with_cell_size(cell_size: f32) -> Self {
        Self {
            cell_size,
            ..Self::default()
        }
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(ConfigError::InvalidCellSize {
                value: self.cell_size,
            });
        }
        if !self.raycast_step.is_finite() || self.raycast_step <= 0.0 {
            return Err(ConfigError::InvalidRaycastStep {
                value: self.raycast_step,
            });
        }
        Ok(())
    }
}
