//! Bounded route memo with grid-version invalidation.
//!
//! [`PathCache`] memoizes smoothed routes by `(start tile, end tile)`. Each
//! entry is stamped with the [`GridVersion`] of the grid it was planned on;
//! a lookup under a different version is a miss, and the stale entry is
//! dropped on the spot. Capacity is bounded and eviction is FIFO by
//! insertion order.
//!
//! # Invalidation
//!
//! An entry is treated as absent when:
//! - The grid version passed to [`get`](PathCache::get) differs from the
//!   entry's stamp (passability changed or the grid was replaced).
//! - It was evicted to make room, oldest insertion first.
//! - [`clear`](PathCache::clear) was called.

use indexmap::IndexMap;
use warfront_core::{GridVersion, TileCoord, Waypoint};

/// Counters for cache traffic since construction or the last
/// [`PathCache::reset_stats`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups with no entry for the key.
    pub misses: u64,
    /// Lookups that found an entry planned on an older grid.
    pub stale: u64,
    /// Entries dropped to stay within capacity.
    pub evictions: u64,
    /// Entries stored.
    pub inserts: u64,
}

#[derive(Clone, Debug)]
struct CachedRoute {
    version: GridVersion,
    waypoints: Vec<Waypoint>,
}

/// FIFO-bounded map from `(start, end)` tiles to waypoints.
#[derive(Clone, Debug)]
pub struct PathCache {
    capacity: usize,
    entries: IndexMap<(TileCoord, TileCoord), CachedRoute>,
    stats: CacheStats,
}

impl PathCache {
    /// An empty cache holding at most `capacity` routes. A capacity of 0
    /// stores nothing.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: IndexMap::with_capacity(capacity.min(1024)),
            stats: CacheStats::default(),
        }
    }

    /// Look up the route from `start` to `end` planned on `version`.
    pub fn get(
        &mut self,
        start: TileCoord,
        end: TileCoord,
        version: GridVersion,
    ) -> Option<&[Waypoint]> {
        let key = (start, end);
        let Some(index) = self.entries.get_index_of(&key) else {
            self.stats.misses += 1;
            return None;
        };
        let cached = self.entries[index].version;
        if cached != version {
            self.entries.shift_remove_index(index);
            self.stats.stale += 1;
            tracing::trace!(%start, %end, %cached, current = %version, "dropped stale route");
            return None;
        }
        self.stats.hits += 1;
        Some(&self.entries[index].waypoints)
    }

    /// Store a route, evicting the oldest entry if full.
    ///
    /// Storing a key that is already present replaces it and moves it to
    /// the back of the eviction queue.
    pub fn insert(
        &mut self,
        start: TileCoord,
        end: TileCoord,
        version: GridVersion,
        waypoints: Vec<Waypoint>,
    ) {
        if self.capacity == 0 {
            return;
        }
        let key = (start, end);
        self.entries.shift_remove(&key);
        while self.entries.len() >= self.capacity {
            if let Some(((s, e), _)) = self.entries.shift_remove_index(0) {
                self.stats.evictions += 1;
                tracing::trace!(start = %s, end = %e, "evicted oldest route");
            }
        }
        self.entries.insert(key, CachedRoute { version, waypoints });
        self.stats.inserts += 1;
    }

    /// Whether any entry, fresh or stale, exists for the key.
    pub fn contains(&self, start: TileCoord, end: TileCoord) -> bool {
        self.entries.contains_key(&(start, end))
    }

    /// Keys in eviction order, oldest first.
    pub fn keys(&self) -> impl Iterator<Item = (TileCoord, TileCoord)> + '_ {
        self.entries.keys().copied()
    }

    /// Drop every entry. Statistics are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of stored routes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of stored routes.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Traffic counters.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Zero the traffic counters.
    pub fn reset_stats(&mut self) {
        self.stats = CacheStats::default();
    }
}
