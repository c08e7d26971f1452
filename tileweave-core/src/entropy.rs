use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use tileweave_rules::PatternMask;

use crate::wave::WaveGrid;

/// Raised when entropy is requested for a cell with no remaining patterns.
///
/// This is diagnostic only: the solver restarts attempts on contradictions
/// before ever asking for the entropy of an emptied cell, so the error never
/// escapes a `generate` call.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntropyError {
    #[error("entropy requested for a cell with no remaining patterns")]
    Contradiction,
}

/// Shannon entropy of a cell's pattern distribution under `weights`.
///
/// Collapsed cells are exactly `0.0`. For larger sets this computes
/// `ln(Σw) - Σ(w·ln w)/Σw`, the expanded form of `-Σ p·ln p` with
/// `p = w/Σw`.
pub fn shannon_entropy(cell: &PatternMask, weights: &[usize]) -> Result<f64, EntropyError> {
    let count = cell.count();
    if count == 0 {
        return Err(EntropyError::Contradiction);
    }
    if count == 1 {
        return Ok(0.0);
    }

    let mut sum_of_weights = 0.0f64;
    let mut sum_of_weight_log_weight = 0.0f64;
    for index in cell.iter_ones() {
        let weight = weights[index] as f64;
        sum_of_weights += weight;
        sum_of_weight_log_weight += weight * weight.ln();
    }
    Ok(sum_of_weights.ln() - sum_of_weight_log_weight / sum_of_weights)
}

/// Picks the unsolved cell with the least entropy, breaking ties uniformly
/// at random. Returns `None` once every cell is collapsed.
///
/// Ties are detected by exact float equality against the tracked minimum,
/// matching the historical selection behavior.
pub fn select_lowest_entropy<R: Rng + ?Sized>(
    wave: &WaveGrid,
    weights: &[usize],
    rng: &mut R,
) -> Result<Option<(usize, usize)>, EntropyError> {
    let mut minimum = f64::INFINITY;
    let mut candidates: Vec<(usize, usize)> = Vec::new();

    for y in 0..wave.height() {
        for x in 0..wave.width() {
            let Some(cell) = wave.get(x, y) else { continue };
            let entropy = shannon_entropy(cell, weights)?;
            if entropy == 0.0 {
                continue;
            }
            if entropy < minimum {
                minimum = entropy;
                candidates.clear();
                candidates.push((x, y));
            } else if entropy == minimum {
                candidates.push((x, y));
            }
        }
    }

    Ok(candidates.choose(rng).copied())
}
