use thiserror::Error;

pub mod entropy;
pub mod model;
pub mod propagator;
pub mod queue;
pub mod solver;
pub mod wave;

/// Shannon entropy of a single cell under the learned weights.
pub use crate::entropy::shannon_entropy;
/// Error raised when entropy is requested for an emptied cell.
pub use crate::entropy::EntropyError;
/// Façade binding a learned model to solver runs and stored presets.
pub use crate::model::Model;
/// Arc-consistency sweep over the wave.
pub use crate::propagator::propagate;
/// Errors specific to the propagation phase.
pub use crate::propagator::PropagationError;
/// FIFO of cell coordinates awaiting propagation.
pub use crate::queue::PropagationQueue;
/// A cell constraint applied before the first observation of each attempt.
pub use crate::solver::PresetInstruction;
/// Observing hook invoked after each observation.
pub use crate::solver::ProgressCallback;
/// Snapshot handed to the optional progress callback.
pub use crate::solver::ProgressInfo;
/// Runs the observe/propagate/select loop.
pub use crate::solver::{solve, SolveConfig};
/// 2D grid of per-cell possibility masks.
pub use crate::wave::WaveGrid;

/// Errors surfaced by `generate`/`solve`.
///
/// Exhausting the attempt budget is not an error; it is the absent result
/// `Ok(None)`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// Output dimensions must both be at least 1.
    #[error("output dimensions must be at least 1x1, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// The attempt budget must allow at least one attempt.
    #[error("max_attempts must be at least 1, got {0}")]
    InvalidMaxAttempts(usize),
    /// The learned model has an empty pattern table.
    #[error("the learned model contains no patterns")]
    NoPatterns,
    /// A stored preset does not fit the requested output grid.
    #[error("preset at ({x}, {y}) lies outside the {width}x{height} output grid")]
    PresetOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    /// A preset mask was built for a different pattern count.
    #[error("preset mask at ({x}, {y}) covers {found} patterns, expected {expected}")]
    PresetMaskLength {
        x: usize,
        y: usize,
        found: usize,
        expected: usize,
    },
    /// A preset pattern index is not in the pattern table.
    #[error("preset pattern index {index} is out of range for {num_patterns} patterns")]
    UnknownPattern { index: usize, num_patterns: usize },
    /// The presets alone are infeasible; no amount of retrying can help.
    #[error("presets are contradictory: cell ({x}, {y}) has no remaining pattern")]
    Unsatisfiable { x: usize, y: usize },
    /// An invariant the solver relies on was violated.
    #[error("internal error: {0}")]
    Internal(String),
}
