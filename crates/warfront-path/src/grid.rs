//! Versioned per-tile passability grid.

use warfront_core::{GridError, GridVersion, TileCoord};

/// Row-major boolean passability for a `width × height` tile map.
///
/// Every construction and every effective [`set_passable`](Self::set_passable)
/// takes a fresh [`GridVersion`], so anything derived from the grid (cached
/// paths) can detect that it is stale by comparing versions.
#[derive(Clone, Debug)]
pub struct PassabilityGrid {
    width: u32,
    height: u32,
    tiles: Vec<bool>,
    version: GridVersion,
}

impl PassabilityGrid {
    /// Largest accepted dimension: tile coordinates are `i32`.
    pub const MAX_DIM: u32 = i32::MAX as u32;

    /// Wrap a row-major passability buffer.
    ///
    /// # Errors
    ///
    /// - [`GridError::EmptyGrid`] if either dimension is 0.
    /// - [`GridError::DimensionTooLarge`] if either exceeds [`Self::MAX_DIM`].
    /// - [`GridError::DimensionMismatch`] if `tiles.len() != width * height`.
    pub fn new(width: u32, height: u32, tiles: Vec<bool>) -> Result<Self, GridError> {
        check_dims(width, height)?;
        let expected = (width as usize).saturating_mul(height as usize);
        if tiles.len() != expected {
            return Err(GridError::DimensionMismatch {
                expected,
                actual: tiles.len(),
            });
        }
        Ok(Self {
            width,
            height,
            tiles,
            version: GridVersion::next(),
        })
    }

    /// A grid with every tile passable.
    pub fn open(width: u32, height: u32) -> Result<Self, GridError> {
        check_dims(width, height)?;
        Self::new(width, height, vec![true; width as usize * height as usize])
    }

    /// Build a grid by evaluating `passable` for every tile.
    pub fn from_fn<F>(width: u32, height: u32, mut passable: F) -> Result<Self, GridError>
    where
        F: FnMut(TileCoord) -> bool,
    {
        check_dims(width, height)?;
        let mut tiles = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                tiles.push(passable(TileCoord::new(x, y)));
            }
        }
        Self::new(width, height, tiles)
    }

    /// Parse an ASCII map: `.` (or space) is passable, `#` is blocked.
    /// Row 0 is `y = 0`.
    ///
    /// # Errors
    ///
    /// [`GridError::RaggedRow`] when rows differ in width,
    /// [`GridError::UnknownGlyph`] for any other character, plus the
    /// dimension errors of [`new`](Self::new).
    pub fn from_ascii<S: AsRef<str>>(rows: &[S]) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().chars().count());
        let mut tiles = Vec::with_capacity(width * height);
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let actual = line.chars().count();
            if actual != width {
                return Err(GridError::RaggedRow {
                    row,
                    expected: width,
                    actual,
                });
            }
            for (column, glyph) in line.chars().enumerate() {
                tiles.push(match glyph {
                    '.' | ' ' => true,
                    '#' => false,
                    _ => return Err(GridError::UnknownGlyph { glyph, row, column }),
                });
            }
        }
        let width = u32::try_from(width).map_err(|_| GridError::DimensionTooLarge {
            name: "width",
            value: u32::MAX,
            max: Self::MAX_DIM,
        })?;
        let height = u32::try_from(height).map_err(|_| GridError::DimensionTooLarge {
            name: "height",
            value: u32::MAX,
            max: Self::MAX_DIM,
        })?;
        Self::new(width, height, tiles)
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Current version stamp.
    pub fn version(&self) -> GridVersion {
        self.version
    }

    /// Whether `tile` lies on the map.
    pub fn in_bounds(&self, tile: TileCoord) -> bool {
        tile.x >= 0 && tile.y >= 0 && (tile.x as u32) < self.width && (tile.y as u32) < self.height
    }

    /// Row-major offset of `tile`, if in bounds.
    pub fn index(&self, tile: TileCoord) -> Option<usize> {
        if !self.in_bounds(tile) {
            return None;
        }
        Some(tile.y as usize * self.width as usize + tile.x as usize)
    }

    /// Whether a ground unit may enter `tile`. Off-map tiles are impassable.
    pub fn is_passable(&self, tile: TileCoord) -> bool {
        self.index(tile).is_some_and(|i| self.tiles[i])
    }

    /// Change one tile's passability.
    ///
    /// Returns `Ok(true)` if the value changed (and the version was bumped),
    /// `Ok(false)` if it already had that value.
    ///
    /// # Errors
    ///
    /// [`GridError::OutOfBounds`] for off-map tiles.
    pub fn set_passable(&mut self, tile: TileCoord, passable: bool) -> Result<bool, GridError> {
        let i = self.index(tile).ok_or(GridError::OutOfBounds {
            tile,
            width: self.width,
            height: self.height,
        })?;
        if self.tiles[i] == passable {
            return Ok(false);
        }
        self.tiles[i] = passable;
        let previous = self.version;
        self.version = GridVersion::next();
        tracing::debug!(
            %tile,
            passable,
            from = %previous,
            to = %self.version,
            "passability changed"
        );
        Ok(true)
    }

    /// Number of passable tiles.
    pub fn passable_count(&self) -> usize {
        self.tiles.iter().filter(|&&p| p).count()
    }

    /// Row-major passability buffer.
    pub fn tiles(&self) -> &[bool] {
        &self.tiles
    }
}

fn check_dims(width: u32, height: u32) -> Result<(), GridError> {
    if width == 0 || height == 0 {
        return Err(GridError::EmptyGrid);
    }
    if width > PassabilityGrid::MAX_DIM {
        return Err(GridError::DimensionTooLarge {
            name: "width",
            value: width,
            max: PassabilityGrid::MAX_DIM,
        });
    }
    if height > PassabilityGrid::MAX_DIM {
        return Err(GridError::DimensionTooLarge {
            name: "height",
            value: height,
            max: PassabilityGrid::MAX_DIM,
        });
    }
    Ok(())
}
