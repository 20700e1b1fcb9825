//! Benchmark profiles for the Warfront navigation core.
//!
//! - [`reference_grid`]: 128x128 map with seeded rock clusters
//! - [`stress_grid`]: 512x512 map with the same density
//! - [`populated_index`]: spatial index preloaded with scattered units
//! - [`route_pairs`]: deterministic passable start/end pairs

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::error::Error;
use warfront_core::{GridError, TileCoord};
use warfront_path::PassabilityGrid;
use warfront_spatial::{SpatialConfig, SpatialIndex};
use warfront_test_utils::{scatter_units, TestUnit};

/// Build a reference map: 128x128 tiles, about 15% blocked in clusters.
pub fn reference_grid(seed: u64) -> Result<PassabilityGrid, GridError> {
    clustered_grid(seed, 128, 128, 0.15)
}

/// Build a stress map: 512x512 tiles, same density as [`reference_grid`].
pub fn stress_grid(seed: u64) -> Result<PassabilityGrid, GridError> {
    clustered_grid(seed, 512, 512, 0.15)
}

/// Scatter 3x3 rock clusters until roughly `density` of the map is blocked.
///
/// The map border stays open so every interior region has a way around.
/// Placement gives up after a bounded number of clusters if `density` is
/// more than the interior can hold.
pub fn clustered_grid(
    seed: u64,
    width: u32,
    height: u32,
    density: f32,
) -> Result<PassabilityGrid, GridError> {
    if width < 3 || height < 3 {
        return PassabilityGrid::open(width, height);
    }
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut tiles = vec![true; width as usize * height as usize];
    let target = (tiles.len() as f32 * density) as usize;
    let mut blocked = 0;
    for _ in 0..target.saturating_mul(4) {
        if blocked >= target {
            break;
        }
        let cx = rng.gen_range(1..width - 1) as usize;
        let cy = rng.gen_range(1..height - 1) as usize;
        for y in cy.saturating_sub(1)..=(cy + 1).min(height as usize - 2) {
            for x in cx.saturating_sub(1)..=(cx + 1).min(width as usize - 2) {
                let i = y * width as usize + x;
                if tiles[i] && x > 0 && y > 0 {
                    tiles[i] = false;
                    blocked += 1;
                }
            }
        }
    }
    PassabilityGrid::new(width, height, tiles)
}

/// Spatial index holding `n` 1x1 units scattered over the map.
pub fn populated_index(
    seed: u64,
    n: u32,
    width: f32,
    height: f32,
) -> Result<(SpatialIndex, Vec<TestUnit>), Box<dyn Error>> {
    let units = scatter_units(seed, n, width, height);
    let mut index = SpatialIndex::new(SpatialConfig::default())?;
    for unit in &units {
        index.insert(unit)?;
    }
    Ok((index, units))
}

/// `n` deterministic `(start, end)` pairs of passable tiles.
///
/// Empty when the grid has no passable tile.
pub fn route_pairs(grid: &PassabilityGrid, n: usize, seed: u64) -> Vec<(TileCoord, TileCoord)> {
    if grid.passable_count() == 0 {
        return Vec::new();
    }
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let pick = |rng: &mut ChaCha8Rng| loop {
        let tile = TileCoord::new(
            rng.gen_range(0..grid.width() as i32),
            rng.gen_range(0..grid.height() as i32),
        );
        if grid.is_passable(tile) {
            return tile;
        }
    };
    (0..n).map(|_| (pick(&mut rng), pick(&mut rng))).collect()
}
