//! Index invariant checks shared by the unit test modules.

use crate::cell::CellRange;
use crate::index::SpatialIndex;
use indexmap::IndexSet;

/// Assert that recorded cell lists match each record's footprint.
pub fn assert_cells_match_footprints(index: &SpatialIndex) {
    for record in index.records() {
        let expected: Vec<_> = CellRange::footprint(
            record.x,
            record.y,
            record.footprint.size(),
            index.cell_size(),
        )
        .iter()
        .collect();
        let actual = index.cells_of(record.id).expect("record without cells");
        assert_eq!(
            actual,
            expected.as_slice(),
            "entity {} has stale cells {actual:?}, expected {expected:?}",
            record.id
        );
    }
}

/// Assert that buckets list exactly the entities whose cell lists name them.
pub fn assert_buckets_match_side_table(index: &SpatialIndex) {
    let mut listed = 0usize;
    for (cell, ids) in index.bucket_table() {
        assert!(!ids.is_empty(), "empty bucket {cell} was not discarded");
        for id in ids {
            let cells = index
                .cells_of(*id)
                .unwrap_or_else(|| panic!("bucket {cell} lists untracked entity {id}"));
            assert!(
                cells.contains(cell),
                "bucket {cell} lists {id}, whose cells are {cells:?}"
            );
            listed += 1;
        }
    }
    let expected: usize = index
        .records()
        .map(|r| index.cells_of(r.id).map_or(0, |c| c.len()))
        .sum();
    assert_eq!(listed, expected, "bucket memberships != recorded cells");
}

/// Assert that no entity's cell list contains duplicates.
pub fn assert_cell_lists_unique(index: &SpatialIndex) {
    for record in index.records() {
        let cells = index.cells_of(record.id).expect("record without cells");
        let unique: IndexSet<_> = cells.iter().collect();
        assert_eq!(unique.len(), cells.len(), "duplicate cells for {}", record.id);
    }
}

/// Run every check.
pub fn assert_consistent(index: &SpatialIndex) {
    assert_cells_match_footprints(index);
    assert_buckets_match_side_table(index);
    assert_cell_lists_unique(index);
}
