use crate::direction::Direction;
use crate::tilemap::{TileId, Tilemap};

/// An NxN window of tile ids, stored row-major.
///
/// Two patterns are equal iff every cell matches. The row-major tile slice
/// is also the canonical serialization the learner dedups on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    n: usize,
    tiles: Vec<TileId>,
}

impl Pattern {
    /// Copies the NxN window of `map` anchored at `(x, y)`.
    ///
    /// The caller guarantees the window lies fully inside the map.
    pub(crate) fn from_window(map: &Tilemap, x: usize, y: usize, n: usize) -> Self {
        let mut tiles = Vec::with_capacity(n * n);
        for dy in 0..n {
            for dx in 0..n {
                // In-bounds per the learner's scan ranges.
                if let Some(tile) = map.get(x + dx, y + dy) {
                    tiles.push(tile);
                }
            }
        }
        debug_assert_eq!(tiles.len(), n * n);
        Self { n, tiles }
    }

    /// Side length of the pattern.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Tile at `(row, col)` within the pattern.
    ///
    /// # Panics
    /// Panics if the coordinates exceed the pattern size.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> TileId {
        assert!(row < self.n && col < self.n);
        self.tiles[row * self.n + col]
    }

    /// The tile at offset (0, 0); this is what a collapsed cell renders as.
    #[inline]
    pub fn top_left(&self) -> TileId {
        self.tiles[0]
    }

    /// Row-major tiles; the canonical form used for deduplication.
    pub fn tiles(&self) -> &[TileId] {
        &self.tiles
    }

    /// True when `other` may sit at direction `dir` of `self`: the region
    /// where the two windows overlap (with `other` offset one cell toward
    /// `dir`) must match tile-by-tile.
    ///
    /// For N = 1 the offset leaves no overlap, and the relation degenerates
    /// to equality of the two single tiles.
    pub fn compatible_with(&self, other: &Pattern, dir: Direction) -> bool {
        debug_assert_eq!(self.n, other.n);
        if self.n == 1 {
            return self.tiles[0] == other.tiles[0];
        }
        let n = self.n as isize;
        let (dy, dx) = dir.delta();
        for row in 0..n {
            for col in 0..n {
                let other_row = row - dy;
                let other_col = col - dx;
                if other_row < 0 || other_row >= n || other_col < 0 || other_col >= n {
                    continue;
                }
                if self.get(row as usize, col as usize)
                    != other.get(other_row as usize, other_col as usize)
                {
                    return false;
                }
            }
        }
        true
    }
}
