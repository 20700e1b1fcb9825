//! Reference ASCII maps. `.` is passable, `#` is blocked; row 0 is the top.

/// 10×10 with no obstacles.
pub const OPEN_10: &[&str] = &[
    "..........",
    "..........",
    "..........",
    "..........",
    "..........",
    "..........",
    "..........",
    "..........",
    "..........",
    "..........",
];

/// A full-height wall at column 4 splits the map in two.
pub const SPLIT_BY_WALL: &[&str] = &[
    "....#.....",
    "....#.....",
    "....#.....",
    "....#.....",
    "....#.....",
    "....#.....",
];

/// A single blocked tile at (3, 3) with open surroundings.
pub const ISOLATED_ROCK: &[&str] = &[
    ".......",
    ".......",
    ".......",
    "...#...",
    ".......",
    ".......",
    ".......",
];

/// 2×2 block with (1, 0) blocked: (0, 0) → (1, 1) must not cut the corner.
pub const CORNER: &[&str] = &[
    ".#",
    "..",
];

/// Winding corridor; the only route from top-left to bottom-left snakes
/// through the gaps.
pub const SERPENTINE: &[&str] = &[
    "..........",
    "#########.",
    "..........",
    ".#########",
    "..........",
];

/// Blocked destination at (5, 2) enclosed on all four sides.
pub const SEALED_GOAL: &[&str] = &[
    "........",
    ".....#..",
    "....###.",
    ".....#..",
    "........",
];

/// Large open field with a long barrier, used to exercise the expansion cap.
pub fn long_barrier(width: usize, height: usize) -> Vec<String> {
    (0..height)
        .map(|row| {
            (0..width)
                .map(|col| {
                    if col == width / 2 && row + 1 < height {
                        '#'
                    } else {
                        '.'
                    }
                })
                .collect()
        })
        .collect()
}
