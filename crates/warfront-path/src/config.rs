//! Planner configuration.

use warfront_core::ConfigError;

/// Tuning knobs for [`PathPlanner`](crate::PathPlanner).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Tile expansions allowed per search before giving up. Default: 2000.
    pub max_iterations: u32,
    /// Maximum number of memoized routes. 0 disables the cache.
    /// Default: 500.
    pub cache_capacity: usize,
    /// Whether to string-pull the tile route. Default: true.
    pub smooth: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_iterations: 2000,
            cache_capacity: 500,
            smooth: true,
        }
    }
}

impl PlannerConfig {
    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_iterations == 0 {
            return Err(ConfigError::ZeroIterationCap);
        }
        Ok(())
    }
}
