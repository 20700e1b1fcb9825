//! The bucketed spatial index and its query family.

use crate::cell::{CellKey, CellRange};
use crate::config::SpatialConfig;
use indexmap::{IndexMap, IndexSet};
use smallvec::SmallVec;
use warfront_core::{
    ConfigError, EntityId, EntityKind, FactionId, Footprint, Spatial, SpatialError,
};

/// The index's copy of an entity, taken at the last `insert` or `update`.
#[derive(Clone, Debug, PartialEq)]
pub struct EntityRecord {
    /// Entity id.
    pub id: EntityId,
    /// Recorded horizontal position.
    pub x: f32,
    /// Recorded vertical position.
    pub y: f32,
    /// Recorded footprint.
    pub footprint: Footprint,
    /// Recorded faction.
    pub faction: FactionId,
    /// Recorded category.
    pub kind: EntityKind,
}

impl EntityRecord {
    fn from_entity<E: Spatial + ?Sized>(entity: &E) -> Result<Self, SpatialError> {
        let (x, y) = entity.position();
        finite("x", x)?;
        finite("y", y)?;
        Ok(Self {
            id: entity.id(),
            x,
            y,
            footprint: entity.footprint(),
            faction: entity.faction(),
            kind: entity.kind(),
        })
    }

    /// Squared distance from the recorded position to `(x, y)`.
    pub fn distance_sq(&self, x: f32, y: f32) -> f32 {
        let dx = self.x - x;
        let dy = self.y - y;
        dx * dx + dy * dy
    }

    /// Middle of the footprint square `[x, x+s) × [y, y+s)`.
    pub fn center(&self) -> (f32, f32) {
        let r = self.footprint.radius();
        (self.x + r, self.y + r)
    }

    /// Squared distance from the footprint center to `(x, y)`.
    pub fn center_distance_sq(&self, x: f32, y: f32) -> f32 {
        let (cx, cy) = self.center();
        let dx = cx - x;
        let dy = cy - y;
        dx * dx + dy * dy
    }
}

/// Result of [`SpatialIndex::find_nearest`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Nearest {
    /// The closest matching entity.
    pub id: EntityId,
    /// Its distance from the query point.
    pub distance: f32,
}

/// Side-table entry: the record plus the buckets it is listed in.
#[derive(Clone, Debug)]
struct Tracked {
    record: EntityRecord,
    cells: SmallVec<[CellKey; 4]>,
}

/// Uniform-grid spatial index over live entities.
///
/// # Invariant
///
/// For every tracked entity, the set of buckets listing it equals
/// [`CellRange::footprint`] of its recorded position and footprint, and no
/// bucket lists an untracked id. Empty buckets are discarded.
///
/// # Determinism
///
/// Query results are returned in cell scan order (row-major over the covered
/// cell rectangle), then bucket insertion order. The order is not part of
/// the contract but is reproducible for identical operation sequences.
#[derive(Clone, Debug)]
pub struct SpatialIndex {
    config: SpatialConfig,
    entities: IndexMap<EntityId, Tracked>,
    buckets: IndexMap<CellKey, IndexSet<EntityId>>,
    max_footprint: Footprint,
}

impl SpatialIndex {
    /// Create an empty index.
    ///
    /// Returns `Err(ConfigError)` if the config fails
    /// [`SpatialConfig::validate`].
    pub fn new(config: SpatialConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            entities: IndexMap::new(),
            buckets: IndexMap::new(),
            max_footprint: Footprint::UNIT,
        })
    }

    /// The configuration this index was built with.
    pub fn config(&self) -> &SpatialConfig {
        &self.config
    }

    /// Bucket side length in tiles.
    pub fn cell_size(&self) -> f32 {
        self.config.cell_size
    }

    /// Number of tracked entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns `true` if no entity is tracked.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Number of non-empty buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Whether `id` is tracked.
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// The recorded state of `id`.
    pub fn record(&self, id: EntityId) -> Option<&EntityRecord> {
        self.entities.get(&id).map(|t| &t.record)
    }

    /// Buckets `id` is currently listed in.
    pub fn cells_of(&self, id: EntityId) -> Option<&[CellKey]> {
        self.entities.get(&id).map(|t| t.cells.as_slice())
    }

    /// Ids listed in the bucket `cell`, in insertion order.
    pub fn bucket(&self, cell: CellKey) -> impl Iterator<Item = EntityId> + '_ {
        self.buckets
            .get(&cell)
            .into_iter()
            .flat_map(|ids| ids.iter().copied())
    }

    /// Key of the bucket containing `(x, y)`.
    pub fn cell_of(&self, x: f32, y: f32) -> CellKey {
        CellKey::containing(x, y, self.config.cell_size)
    }

    /// Iterate all tracked records in insertion order.
    pub fn records(&self) -> impl Iterator<Item = &EntityRecord> + '_ {
        self.entities.values().map(|t| &t.record)
    }

    /// Largest footprint tracked since the index was built or cleared.
    pub fn max_footprint(&self) -> Footprint {
        self.max_footprint
    }

    /// Drop every entity and bucket. Used when a new map is generated.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.buckets.clear();
        self.max_footprint = Footprint::UNIT;
    }

    // ── Mutation ────────────────────────────────────────────────

    /// Start tracking `entity`.
    ///
    /// # Errors
    ///
    /// - [`SpatialError::InvalidArgument`] if its position is not finite.
    /// - [`SpatialError::AlreadyTracked`] if its id is already tracked.
    pub fn insert<E: Spatial + ?Sized>(&mut self, entity: &E) -> Result<(), SpatialError> {
        let record = EntityRecord::from_entity(entity)?;
        if self.entities.contains_key(&record.id) {
            return Err(SpatialError::AlreadyTracked(record.id));
        }
        let cells = self.footprint_cells(&record);
        for &cell in &cells {
            self.buckets.entry(cell).or_default().insert(record.id);
        }
        self.max_footprint = self.max_footprint.max(record.footprint);
        tracing::trace!(id = %record.id, cells = cells.len(), "spatial insert");
        self.entities.insert(record.id, Tracked { record, cells });
        Ok(())
    }

    /// Stop tracking `id`, returning its last record.
    ///
    /// Removing an untracked id is a no-op that returns `None`.
    pub fn remove(&mut self, id: EntityId) -> Option<EntityRecord> {
        let tracked = self.entities.shift_remove(&id)?;
        for cell in &tracked.cells {
            self.unlist(*cell, id);
        }
        tracing::trace!(%id, "spatial remove");
        Some(tracked.record)
    }

    /// Re-read `entity`'s position, footprint, faction, and kind.
    ///
    /// When the covered buckets are unchanged only the record is refreshed;
    /// otherwise the entity is unlisted from stale buckets and listed in the
    /// new ones.
    ///
    /// # Errors
    ///
    /// - [`SpatialError::InvalidArgument`] if its position is not finite.
    /// - [`SpatialError::UnknownEntity`] if its id is not tracked.
    pub fn update<E: Spatial + ?Sized>(&mut self, entity: &E) -> Result<(), SpatialError> {
        let record = EntityRecord::from_entity(entity)?;
        let id = record.id;
        let new_cells = self.footprint_cells(&record);
        let old_cells = match self.entities.get_mut(&id) {
            Some(tracked) => {
                tracked.record = record.clone();
                if tracked.cells == new_cells {
                    self.max_footprint = self.max_footprint.max(record.footprint);
                    return Ok(());
                }
                std::mem::replace(&mut tracked.cells, new_cells.clone())
            }
            None => return Err(SpatialError::UnknownEntity(id)),
        };

        for cell in old_cells.iter().filter(|c| !new_cells.contains(c)) {
            self.unlist(*cell, id);
        }
        for cell in new_cells.iter().filter(|c| !old_cells.contains(c)) {
            self.buckets.entry(*cell).or_default().insert(id);
        }
        self.max_footprint = self.max_footprint.max(record.footprint);
        Ok(())
    }

    fn footprint_cells(&self, record: &EntityRecord) -> SmallVec<[CellKey; 4]> {
        CellRange::footprint(
            record.x,
            record.y,
            record.footprint.size(),
            self.config.cell_size,
        )
        .to_keys()
    }

    fn unlist(&mut self, cell: CellKey, id: EntityId) {
        if let Some(ids) = self.buckets.get_mut(&cell) {
            ids.swap_remove(&id);
            if ids.is_empty() {
                self.buckets.swap_remove(&cell);
            }
        }
    }

    // ── Queries ─────────────────────────────────────────────────

    /// Ids of entities whose recorded position lies within `radius` of
    /// `(x, y)`.
    ///
    /// Returns an empty list for `radius <= 0`. Non-finite input also yields
    /// an empty list (and a warning) rather than an error.
    pub fn query(&self, x: f32, y: f32, radius: f32) -> Vec<EntityId> {
        let mut out = Vec::new();
        self.query_into(x, y, radius, &mut out);
        out
    }

    /// Like [`query`](Self::query) but writes into `out` (cleared first) so
    /// callers in per-tick loops can reuse one allocation.
    pub fn query_into(&self, x: f32, y: f32, radius: f32, out: &mut Vec<EntityId>) {
        out.clear();
        self.scan(x, y, radius, |record| {
            out.push(record.id);
        });
    }

    /// Ids within range whose record satisfies `predicate`.
    pub fn query_filtered<F>(&self, x: f32, y: f32, radius: f32, mut predicate: F) -> Vec<EntityId>
    where
        F: FnMut(&EntityRecord) -> bool,
    {
        let mut out = Vec::new();
        self.scan(x, y, radius, |record| {
            if predicate(record) {
                out.push(record.id);
            }
        });
        out
    }

    /// Ids within range that belong to `faction`.
    pub fn query_by_faction(
        &self,
        x: f32,
        y: f32,
        radius: f32,
        faction: FactionId,
    ) -> Vec<EntityId> {
        self.query_filtered(x, y, radius, |r| r.faction == faction)
    }

    /// Ids within range of the given category.
    pub fn query_by_kind(&self, x: f32, y: f32, radius: f32, kind: EntityKind) -> Vec<EntityId> {
        self.query_filtered(x, y, radius, |r| r.kind == kind)
    }

    /// Ids within range that are hostile to `faction`.
    ///
    /// Neutral entities are never returned, and a neutral `faction` has no
    /// enemies.
    pub fn query_enemies(&self, x: f32, y: f32, radius: f32, faction: FactionId) -> Vec<EntityId> {
        self.query_filtered(x, y, radius, |r| faction.is_hostile_to(r.faction))
    }

    /// The closest entity within `max_range` of `(x, y)` that satisfies
    /// `predicate`. Ties keep the first one scanned.
    pub fn find_nearest<F>(
        &self,
        x: f32,
        y: f32,
        max_range: f32,
        mut predicate: F,
    ) -> Option<Nearest>
    where
        F: FnMut(&EntityRecord) -> bool,
    {
        let mut best: Option<(EntityId, f32)> = None;
        self.scan(x, y, max_range, |record| {
            if !predicate(record) {
                return;
            }
            let d2 = record.distance_sq(x, y);
            if best.map_or(true, |(_, b)| d2 < b) {
                best = Some((record.id, d2));
            }
        });
        best.map(|(id, d2)| Nearest {
            id,
            distance: d2.sqrt(),
        })
    }

    /// Broad phase over covered buckets, narrow phase on squared distance.
    ///
    /// Each entity is visited at most once even when its footprint spans
    /// several scanned buckets: only the first of its cells inside the
    /// scanned rectangle reports it.
    pub(crate) fn scan<F>(&self, x: f32, y: f32, radius: f32, mut visit: F)
    where
        F: FnMut(&EntityRecord),
    {
        if !x.is_finite() || !y.is_finite() || !radius.is_finite() {
            tracing::warn!(x, y, radius, "spatial query with non-finite input ignored");
            return;
        }
        if radius <= 0.0 || self.entities.is_empty() {
            return;
        }

        let range = CellRange::covering_circle(x, y, radius, self.config.cell_size);
        let radius_sq = radius * radius;
        let mut test = |cell: CellKey, ids: &IndexSet<EntityId>| {
            for id in ids {
                let Some(tracked) = self.entities.get(id) else {
                    continue;
                };
                let owner = tracked.cells.iter().find(|c| range.contains(**c));
                if owner == Some(&cell) && tracked.record.distance_sq(x, y) <= radius_sq {
                    visit(&tracked.record);
                }
            }
        };

        // A huge radius covers more cells than exist; walk the buckets instead.
        if range.cell_count() > self.buckets.len() as u64 {
            for (cell, ids) in &self.buckets {
                if range.contains(*cell) {
                    test(*cell, ids);
                }
            }
        } else {
            for cell in range.iter() {
                if let Some(ids) = self.buckets.get(&cell) {
                    test(cell, ids);
                }
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn bucket_table(&self) -> &IndexMap<CellKey, IndexSet<EntityId>> {
        &self.buckets
    }
}

fn finite(what: &'static str, value: f32) -> Result<(), SpatialError> {
    if value.is_finite() {
        Ok(())
    } else {
        tracing::warn!(what, value, "rejected non-finite entity coordinate");
        Err(SpatialError::InvalidArgument { what, value })
    }
}
