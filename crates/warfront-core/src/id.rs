//! Strongly-typed identifiers.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies a live entity (unit, building, projectile) in the world.
///
/// Ids are assigned by the entity's owner. The spatial index keys its side
/// tables by `EntityId`, so two distinct entities must never share one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for EntityId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a faction (player or AI side).
///
/// [`FactionId::NEUTRAL`] marks entities that belong to nobody, such as
/// resource nodes. Neutral entities are never anyone's enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FactionId(pub u16);

impl FactionId {
    /// Faction of unowned entities.
    pub const NEUTRAL: FactionId = FactionId(0);

    /// Returns `true` for [`FactionId::NEUTRAL`].
    pub fn is_neutral(self) -> bool {
        self == Self::NEUTRAL
    }

    /// Whether an entity of faction `other` is hostile to `self`.
    ///
    /// Factions are hostile when they differ and neither is neutral.
    pub fn is_hostile_to(self, other: FactionId) -> bool {
        self != other && !self.is_neutral() && !other.is_neutral()
    }
}

impl fmt::Display for FactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for FactionId {
    fn from(v: u16) -> Self {
        Self(v)
    }
}

/// Counter for unique [`GridVersion`] allocation.
static GRID_VERSION_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Version stamp of a passability grid.
///
/// Allocated from a process-wide monotonic counter via [`GridVersion::next`].
/// A fresh version is taken every time a grid is built or a tile's
/// passability changes, so two different grid states never share a version,
/// even across grid replacement. Path cache entries carry the version they
/// were computed against; a mismatch means the entry is stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridVersion(u64);

impl GridVersion {
    /// Allocate a fresh, never-before-returned version. Thread-safe.
    pub fn next() -> Self {
        Self(GRID_VERSION_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw counter value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for GridVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}
