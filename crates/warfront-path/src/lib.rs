//! A* path planning over tile passability grids.
//!
//! [`PathPlanner`] owns a versioned [`PassabilityGrid`] and answers
//! `find_path` requests with a smoothed list of tile-center waypoints.
//!
//! # Pipeline
//!
//! 1. Floor both endpoints to tiles; an impassable destination is retargeted
//!    to its nearest passable 4-neighbour.
//! 2. Run 8-connected A* ([`astar::search`]) with an octile heuristic and a
//!    per-call expansion cap.
//! 3. String-pull the tile chain ([`smoothing::smooth`]).
//! 4. Memoize the result in a FIFO-bounded [`PathCache`] stamped with the
//!    grid's [`GridVersion`](warfront_core::GridVersion).
//!
//! An empty [`Path`] means "no route", "already there", or "search aborted";
//! callers treat all three the same way.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod astar;
pub mod cache;
pub mod config;
pub mod grid;
mod open_set;
pub mod path;
pub mod planner;
pub mod smoothing;

pub use astar::{SearchOutcome, SearchResult, SearchStats};
pub use cache::{CacheStats, PathCache};
pub use config::PlannerConfig;
pub use grid::PassabilityGrid;
pub use path::Path;
pub use planner::PathPlanner;
