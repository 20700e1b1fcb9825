//! Cell keys and the arithmetic that maps tile space onto buckets.

use smallvec::SmallVec;
use std::fmt;

/// Signed address of one bucket: `(floor(x / cell_size), floor(y / cell_size))`.
///
/// The bucket grid is logically unbounded; negative keys are valid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey {
    /// Bucket column.
    pub x: i32,
    /// Bucket row.
    pub y: i32,
}

impl CellKey {
    /// Create a cell key.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Key of the bucket containing the finite point `(x, y)`.
    pub fn containing(x: f32, y: f32, cell_size: f32) -> Self {
        Self::new(axis_cell(x, cell_size), axis_cell(y, cell_size))
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

/// Inclusive rectangle of cell keys, iterated row by row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRange {
    /// Minimum corner (inclusive).
    pub min: CellKey,
    /// Maximum corner (inclusive).
    pub max: CellKey,
}

impl CellRange {
    /// Cells overlapped by the half-open footprint `[x, x+size) × [y, y+size)`.
    pub fn footprint(x: f32, y: f32, size: u32, cell_size: f32) -> Self {
        let extent = size as f32;
        Self {
            min: CellKey::containing(x, y, cell_size),
            max: CellKey::new(
                axis_last_cell(x, extent, cell_size),
                axis_last_cell(y, extent, cell_size),
            ),
        }
    }

    /// Cells covering the bounding square of the circle at `(x, y)` with
    /// the given radius.
    pub fn covering_circle(x: f32, y: f32, radius: f32, cell_size: f32) -> Self {
        Self {
            min: CellKey::containing(x - radius, y - radius, cell_size),
            max: CellKey::containing(x + radius, y + radius, cell_size),
        }
    }

    /// Whether `cell` lies inside the rectangle.
    pub fn contains(&self, cell: CellKey) -> bool {
        cell.x >= self.min.x && cell.x <= self.max.x && cell.y >= self.min.y && cell.y <= self.max.y
    }

    /// Number of cells in the rectangle.
    pub fn cell_count(&self) -> u64 {
        let w = (i64::from(self.max.x) - i64::from(self.min.x) + 1).max(0) as u64;
        let h = (i64::from(self.max.y) - i64::from(self.min.y) + 1).max(0) as u64;
        w.saturating_mul(h)
    }

    /// Iterate the cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = CellKey> + '_ {
        (self.min.y..=self.max.y)
            .flat_map(move |y| (self.min.x..=self.max.x).map(move |x| CellKey::new(x, y)))
    }

    /// Collect the cells into the inline list stored per entity.
    pub(crate) fn to_keys(self) -> SmallVec<[CellKey; 4]> {
        self.iter().collect()
    }
}

/// Bucket index of a single coordinate. Saturates at the `i32` range.
fn axis_cell(v: f32, cell_size: f32) -> i32 {
    (v / cell_size).floor() as i32
}

/// Last bucket touched by the half-open interval `[start, start + extent)`.
/// Saturates like `axis_cell`.
fn axis_last_cell(start: f32, extent: f32, cell_size: f32) -> i32 {
    let first = axis_cell(start, cell_size);
    let last = (((start + extent) / cell_size).ceil() as i32).saturating_sub(1);
    last.max(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn containing_uses_floor_for_negatives() {
        assert_eq!(CellKey::containing(-0.1, 3.9, 4.0), CellKey::new(-1, 0));
        assert_eq!(CellKey::containing(-4.0, 4.0, 4.0), CellKey::new(-1, 1));
    }

    #[test]
    fn unit_footprint_inside_one_cell() {
        let r = CellRange::footprint(1.0, 1.0, 1, 4.0);
        assert_eq!(r.min, CellKey::new(0, 0));
        assert_eq!(r.max, CellKey::new(0, 0));
        assert_eq!(r.cell_count(), 1);
    }

    #[test]
    fn footprint_ending_on_boundary_stays_in_cell() {
        // [3, 4) does not touch cell 1.
        let r = CellRange::footprint(3.0, 3.0, 1, 4.0);
        assert_eq!(r.cell_count(), 1);
    }

    #[test]
    fn footprint_straddling_boundary_spans_four_cells() {
        let r = CellRange::footprint(3.5, 3.5, 1, 4.0);
        let keys: Vec<_> = r.iter().collect();
        assert_eq!(
            keys,
            vec![
                CellKey::new(0, 0),
                CellKey::new(1, 0),
                CellKey::new(0, 1),
                CellKey::new(1, 1)
            ]
        );
    }

    #[test]
    fn building_footprint_spans_multiple_cells() {
        let r = CellRange::footprint(2.0, 0.0, 4, 2.0);
        assert_eq!(r.min, CellKey::new(1, 0));
        assert_eq!(r.max, CellKey::new(2, 1));
        assert_eq!(r.cell_count(), 4);
    }

    #[test]
    fn far_footprints_saturate_instead_of_overflowing() {
        let west = CellRange::footprint(-1.0e12, 0.0, 1, 4.0);
        assert_eq!(west.min, CellKey::new(i32::MIN, 0));
        assert_eq!(west.max, CellKey::new(i32::MIN, 0));
        let east = CellRange::footprint(1.0e12, 1.0e12, 2, 4.0);
        assert_eq!(east.min, CellKey::new(i32::MAX, i32::MAX));
        assert_eq!(east.max, CellKey::new(i32::MAX, i32::MAX));
        assert_eq!(east.cell_count(), 1);
    }

    #[test]
    fn circle_range_covers_bounding_square() {
        let r = CellRange::covering_circle(0.0, 0.0, 5.0, 4.0);
        assert_eq!(r.min, CellKey::new(-2, -2));
        assert_eq!(r.max, CellKey::new(1, 1));
        assert!(r.contains(CellKey::new(-1, 1)));
        assert!(!r.contains(CellKey::new(2, 0)));
    }

    proptest! {
        #[test]
        fn footprint_cells_are_exactly_the_overlapping_ones(
            x in -50.0f32..50.0,
            y in -50.0f32..50.0,
            size in 1u32..6,
            cell_size in prop_oneof![Just(1.0f32), Just(2.0f32), Just(4.0f32), Just(8.0f32)],
        ) {
            let range = CellRange::footprint(x, y, size, cell_size);
            let extent = size as f32;
            // A cell [c*cs, (c+1)*cs) overlaps [x, x+extent) iff it starts
            // before the end and ends after the start.
            let overlaps = |c: i32, start: f32| {
                let lo = c as f32 * cell_size;
                let hi = lo + cell_size;
                lo < start + extent && hi > start
            };
            for cx in range.min.x - 2..=range.max.x + 2 {
                let inside = cx >= range.min.x && cx <= range.max.x;
                prop_assert_eq!(inside, overlaps(cx, x), "column {} for x={}", cx, x);
            }
            for cy in range.min.y - 2..=range.max.y + 2 {
                let inside = cy >= range.min.y && cy <= range.max.y;
                prop_assert_eq!(inside, overlaps(cy, y), "row {} for y={}", cy, y);
            }
        }
    }
}
