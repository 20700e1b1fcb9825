//! Aggregate configuration for a [`NavWorld`](crate::NavWorld).

use warfront_core::ConfigError;
use warfront_path::PlannerConfig;
use warfront_spatial::SpatialConfig;

/// Settings for both navigation components.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NavConfig {
    /// Spatial index bucket size and raycast spacing.
    pub spatial: SpatialConfig,
    /// A* iteration cap, route cache size and smoothing.
    pub planner: PlannerConfig,
}

impl NavConfig {
    /// Validate both halves, spatial first.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.spatial.validate()?;
        self.planner.validate()
    }
}
