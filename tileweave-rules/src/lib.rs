use thiserror::Error;

pub mod adjacency;
pub mod direction;
pub mod learner;
pub mod mask;
pub mod pattern;
pub mod tilemap;

/// Adjacency table learned from example tilemaps.
pub use crate::adjacency::AdjacencyRules;
/// The four cardinal directions shared by learner and solver.
pub use crate::direction::Direction;
/// Learns (patterns, weights, adjacencies) from example tilemaps.
pub use crate::learner::learn;
/// Immutable artifacts produced by `learn`.
pub use crate::learner::LearnedModel;
/// Fixed-width bitset over pattern indices.
pub use crate::mask::PatternMask;
/// An NxN window of tile ids.
pub use crate::pattern::Pattern;
/// Identifier of a single tile.
pub use crate::tilemap::TileId;
/// A 2D matrix of tile ids.
pub use crate::tilemap::Tilemap;

/// Errors that can occur while learning a model from example tilemaps.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LearnError {
    /// The requested pattern size cannot produce any window.
    #[error("pattern size must be at least 1, got {0}")]
    InvalidPatternSize(usize),
    /// No example tilemaps were supplied.
    #[error("at least one example tilemap is required")]
    NoImages,
    /// A tilemap's rows do not all share the same length.
    #[error("tilemap row {row} has {found} tiles, expected {expected}")]
    RaggedImage {
        row: usize,
        found: usize,
        expected: usize,
    },
    /// An example tilemap is too small to contain a single pattern window.
    #[error("example tilemap {index} is {width}x{height}, smaller than the pattern size {n}")]
    ImageTooSmall {
        index: usize,
        width: usize,
        height: usize,
        n: usize,
    },
}
