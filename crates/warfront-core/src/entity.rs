//! The [`Spatial`] trait and the per-entity data the spatial index records.

use crate::id::{EntityId, FactionId};

/// Square footprint of an entity, in whole tiles per side.
///
/// Units occupy 1×1; buildings occupy N×N. An entity at `(x, y)` with
/// footprint `s` covers the half-open area `[x, x+s) × [y, y+s)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Footprint(u32);

impl Footprint {
    /// The 1×1 footprint of a single unit.
    pub const UNIT: Footprint = Footprint(1);

    /// Create a footprint of `size` tiles per side. Zero is raised to one.
    pub const fn new(size: u32) -> Self {
        if size == 0 {
            Self(1)
        } else {
            Self(size)
        }
    }

    /// Side length in tiles.
    pub const fn size(self) -> u32 {
        self.0
    }

    /// Radius of the circle used for hit tests (half the side length).
    pub fn radius(self) -> f32 {
        self.0 as f32 * 0.5
    }
}

impl Default for Footprint {
    fn default() -> Self {
        Self::UNIT
    }
}

/// Coarse entity category used by type-filtered queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    /// A mobile unit (infantry, vehicle, worker).
    Unit,
    /// A static structure.
    Building,
    /// A harvestable resource node.
    Resource,
    /// A projectile or other short-lived effect.
    Projectile,
}

/// Anything the spatial index can track.
///
/// Implemented by the game's entity types. The spatial index reads these
/// values on `insert` and `update` and keeps its own copy, so it never holds
/// on to or mutates the caller's objects.
pub trait Spatial {
    /// Stable identifier of the entity.
    fn id(&self) -> EntityId;

    /// Current continuous tile-space position.
    fn position(&self) -> (f32, f32);

    /// Footprint; 1×1 unless overridden.
    fn footprint(&self) -> Footprint {
        Footprint::UNIT
    }

    /// Owning faction; neutral unless overridden.
    fn faction(&self) -> FactionId {
        FactionId::NEUTRAL
    }

    /// Category; [`EntityKind::Unit`] unless overridden.
    fn kind(&self) -> EntityKind {
        EntityKind::Unit
    }
}

impl<T: Spatial + ?Sized> Spatial for &T {
    fn id(&self) -> EntityId {
        (**self).id()
    }

    fn position(&self) -> (f32, f32) {
        (**self).position()
    }

    fn footprint(&self) -> Footprint {
        (**self).footprint()
    }

    fn faction(&self) -> FactionId {
        (**self).faction()
    }

    fn kind(&self) -> EntityKind {
        (**self).kind()
    }
}
