use crate::LearnError;

/// Identifier of a single tile. Opaque to the core; equality is the only
/// operation the algorithms rely on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileId(pub usize);

/// A 2D matrix of tile ids, stored row-major.
///
/// Used both for the example inputs handed to the learner and for the
/// generated outputs handed back by the solver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tilemap {
    width: usize,
    height: usize,
    data: Vec<TileId>,
}

impl Tilemap {
    /// Creates a tilemap with every cell holding `tile`.
    pub fn filled(width: usize, height: usize, tile: TileId) -> Self {
        Self {
            width,
            height,
            data: vec![tile; width * height],
        }
    }

    /// Builds a tilemap from nested rows of raw tile ids.
    ///
    /// Every row must have the same length; ragged input is rejected.
    pub fn from_rows(rows: &[Vec<usize>]) -> Result<Self, LearnError> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).unwrap_or(0);
        let mut data = Vec::with_capacity(width * height);
        for (row_index, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(LearnError::RaggedImage {
                    row: row_index,
                    found: row.len(),
                    expected: width,
                });
            }
            data.extend(row.iter().map(|&id| TileId(id)));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }

    /// Returns the tile at `(x, y)`, or `None` when out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<TileId> {
        self.index(x, y).map(|i| self.data[i])
    }

    /// Overwrites the tile at `(x, y)`. Out-of-bounds writes are ignored.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, tile: TileId) {
        if let Some(i) = self.index(x, y) {
            self.data[i] = tile;
        }
    }

    /// The map as nested rows of raw tile ids.
    pub fn to_rows(&self) -> Vec<Vec<usize>> {
        (0..self.height)
            .map(|y| {
                (0..self.width)
                    .map(|x| self.data[y * self.width + x].0)
                    .collect()
            })
            .collect()
    }
}
