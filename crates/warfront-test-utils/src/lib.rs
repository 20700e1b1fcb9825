//! Test utilities and fixtures for Warfront development.
//!
//! Provides a [`TestUnit`] implementing [`Spatial`], deterministic seeded
//! placement and movement helpers, and a few reference ASCII maps shared by
//! the spatial and path planner test suites.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod maps;

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use warfront_core::{EntityId, EntityKind, FactionId, Footprint, Spatial};

/// Minimal entity for driving the spatial index in tests.
#[derive(Clone, Debug, PartialEq)]
pub struct TestUnit {
    pub id: EntityId,
    pub x: f32,
    pub y: f32,
    pub size: u32,
    pub faction: FactionId,
    pub kind: EntityKind,
}

impl TestUnit {
    /// A neutral 1×1 unit.
    pub fn new(id: u32, x: f32, y: f32) -> Self {
        Self {
            id: EntityId(id),
            x,
            y,
            size: 1,
            faction: FactionId::NEUTRAL,
            kind: EntityKind::Unit,
        }
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    pub fn with_faction(mut self, faction: FactionId) -> Self {
        self.faction = faction;
        self
    }

    pub fn with_kind(mut self, kind: EntityKind) -> Self {
        self.kind = kind;
        self
    }

    /// Move to `(x, y)`.
    pub fn teleport(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }
}

impl Spatial for TestUnit {
    fn id(&self) -> EntityId {
        self.id
    }

    fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    fn footprint(&self) -> Footprint {
        Footprint::new(self.size)
    }

    fn faction(&self) -> FactionId {
        self.faction
    }

    fn kind(&self) -> EntityKind {
        self.kind
    }
}

/// Deterministically scatter `n` units over `[0, width) × [0, height)`.
///
/// Factions alternate between 1 and 2. Ids are `0..n`.
pub fn scatter_units(seed: u64, n: u32, width: f32, height: f32) -> Vec<TestUnit> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|i| {
            let x = rng.gen_range(0.0..width);
            let y = rng.gen_range(0.0..height);
            TestUnit::new(i, x, y).with_faction(FactionId(1 + (i % 2) as u16))
        })
        .collect()
}

/// Nudge every unit by up to `max_step` on each axis, clamped to the map.
pub fn jitter_units(
    rng: &mut ChaCha8Rng,
    units: &mut [TestUnit],
    max_step: f32,
    width: f32,
    height: f32,
) {
    for unit in units {
        let dx = rng.gen_range(-max_step..=max_step);
        let dy = rng.gen_range(-max_step..=max_step);
        unit.x = (unit.x + dx).clamp(0.0, width - f32::EPSILON * width);
        unit.y = (unit.y + dy).clamp(0.0, height - f32::EPSILON * height);
    }
}

/// Seeded RNG for tests that drive their own randomness.
pub fn test_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Ids of `units` within `radius` of `(x, y)`, by brute force.
pub fn brute_force_query(units: &[TestUnit], x: f32, y: f32, radius: f32) -> Vec<EntityId> {
    if radius <= 0.0 {
        return Vec::new();
    }
    let mut ids: Vec<EntityId> = units
        .iter()
        .filter(|u| {
            let dx = u.x - x;
            let dy = u.y - y;
            dx * dx + dy * dy <= radius * radius
        })
        .map(|u| u.id)
        .collect();
    ids.sort();
    ids
}
