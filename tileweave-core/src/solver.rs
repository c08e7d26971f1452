use log::{debug, info, warn};
use rand::Rng;

use tileweave_rules::{LearnedModel, PatternMask, TileId, Tilemap};

use crate::entropy::select_lowest_entropy;
use crate::propagator::propagate;
use crate::queue::PropagationQueue;
use crate::wave::WaveGrid;
use crate::GenerateError;

/// A cell constraint applied before the first observation of every attempt:
/// cell `(x, y)` starts from `mask` instead of the full pattern set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetInstruction {
    pub x: usize,
    pub y: usize,
    pub mask: PatternMask,
}

/// Snapshot handed to the optional progress callback after each observation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressInfo {
    /// The attempt currently running, starting at 1.
    pub attempt: usize,
    /// Cells collapsed so far in this attempt.
    pub collapsed_cells: usize,
    /// Total cells in the output grid.
    pub total_cells: usize,
}

/// Callback observing solver progress. Purely observational; the solver
/// ignores anything it does.
pub type ProgressCallback = Box<dyn Fn(ProgressInfo) + Send + Sync>;

/// Configuration for one `solve` call.
pub struct SolveConfig {
    /// Output grid width.
    pub width: usize,
    /// Output grid height.
    pub height: usize,
    /// Attempt budget; the sole liveness bound.
    pub max_attempts: usize,
    /// Optional per-observation progress hook.
    pub progress_callback: Option<ProgressCallback>,
}

impl SolveConfig {
    pub fn new(width: usize, height: usize, max_attempts: usize) -> Self {
        Self {
            width,
            height,
            max_attempts,
            progress_callback: None,
        }
    }

    /// Attaches a progress hook.
    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }
}

/// Collapses a wave over a `width` x `height` grid using the learned model,
/// honoring `presets`, retrying on contradictions up to the attempt budget.
///
/// Returns the finished tilemap, or `Ok(None)` once the budget is spent.
/// A contradiction produced by the presets alone is `Unsatisfiable`: the
/// presets are not randomized, so no retry can change the outcome.
///
/// All randomness flows through `rng`; a seeded generator makes the run
/// reproducible.
pub fn solve<R: Rng + ?Sized>(
    model: &LearnedModel,
    presets: &[PresetInstruction],
    config: &SolveConfig,
    rng: &mut R,
) -> Result<Option<Tilemap>, GenerateError> {
    let (width, height) = (config.width, config.height);
    if width < 1 || height < 1 {
        return Err(GenerateError::InvalidDimensions { width, height });
    }
    if config.max_attempts < 1 {
        return Err(GenerateError::InvalidMaxAttempts(config.max_attempts));
    }
    let num_patterns = model.num_patterns();
    if num_patterns == 0 {
        return Err(GenerateError::NoPatterns);
    }
    for preset in presets {
        if preset.x >= width || preset.y >= height {
            return Err(GenerateError::PresetOutOfBounds {
                x: preset.x,
                y: preset.y,
                width,
                height,
            });
        }
        if preset.mask.len() != num_patterns {
            return Err(GenerateError::PresetMaskLength {
                x: preset.x,
                y: preset.y,
                found: preset.mask.len(),
                expected: num_patterns,
            });
        }
    }

    info!(
        "solving {}x{} grid over {} patterns, {} preset(s), budget {}",
        width,
        height,
        num_patterns,
        presets.len(),
        config.max_attempts
    );

    let mut wave = WaveGrid::new(width, height, num_patterns);
    let mut queue = PropagationQueue::new();

    // Presets carry no randomness: a contradiction here dooms every attempt.
    if let Err(contradiction) = prepare_attempt(&mut wave, &mut queue, model, presets) {
        return Err(GenerateError::Unsatisfiable {
            x: contradiction.0,
            y: contradiction.1,
        });
    }

    let mut current = if presets.is_empty() {
        // A uniform wave has equal entropy everywhere; the entropy scan
        // would pick uniformly anyway.
        random_cell(width, height, rng)
    } else {
        match select_lowest_entropy(&wave, model.weights(), rng)
            .map_err(|e| GenerateError::Internal(e.to_string()))?
        {
            Some(cell) => cell,
            None => return render(&wave, model).map(Some),
        }
    };

    let total_cells = width * height;
    let mut attempt = 1usize;
    loop {
        observe(&mut wave, current, model.weights(), rng)?;
        if let Some(callback) = &config.progress_callback {
            callback(ProgressInfo {
                attempt,
                collapsed_cells: wave.count_collapsed(),
                total_cells,
            });
        }

        queue.push(current);
        if let Err(contradiction) = propagate(&mut wave, model.adjacency(), &mut queue) {
            debug!(
                "attempt {} hit a contradiction at {:?}",
                attempt, contradiction
            );
            attempt += 1;
            if attempt > config.max_attempts {
                warn!("attempt budget {} exhausted", config.max_attempts);
                return Ok(None);
            }
            // Presets were proven consistent above and propagation is
            // deterministic, so re-preparing cannot fail.
            prepare_attempt(&mut wave, &mut queue, model, presets)
                .map_err(|(x, y)| GenerateError::Unsatisfiable { x, y })?;
            current = random_cell(width, height, rng);
            continue;
        }

        match select_lowest_entropy(&wave, model.weights(), rng)
            .map_err(|e| GenerateError::Internal(e.to_string()))?
        {
            Some(cell) => current = cell,
            None => {
                debug!("grid fully collapsed on attempt {}", attempt);
                return render(&wave, model).map(Some);
            }
        }
    }
}

/// Reinitializes the wave, applies the presets, and propagates their
/// consequences. Returns the contradicting coordinate on failure.
fn prepare_attempt(
    wave: &mut WaveGrid,
    queue: &mut PropagationQueue,
    model: &LearnedModel,
    presets: &[PresetInstruction],
) -> Result<(), (usize, usize)> {
    wave.reset();
    queue.clear();
    for preset in presets {
        wave.apply_preset(preset.x, preset.y, &preset.mask);
        if preset.mask.is_empty() {
            // An empty preset mask is a contradiction even with no neighbor
            // to propagate into.
            return Err((preset.x, preset.y));
        }
        queue.push((preset.x, preset.y));
    }
    propagate(wave, model.adjacency(), queue).map_err(|e| match e {
        crate::propagator::PropagationError::Contradiction { x, y } => (x, y),
    })
}

/// Collapses the cell at `cell` to a single pattern by a weighted draw over
/// its remaining indices, walked in ascending order.
fn observe<R: Rng + ?Sized>(
    wave: &mut WaveGrid,
    cell: (usize, usize),
    weights: &[usize],
    rng: &mut R,
) -> Result<(), GenerateError> {
    let (x, y) = cell;
    let mask = wave
        .get_mut(x, y)
        .ok_or_else(|| GenerateError::Internal(format!("observed cell ({x}, {y}) out of bounds")))?;
    if mask.is_empty() {
        return Err(GenerateError::Internal(format!(
            "observed cell ({x}, {y}) holds no patterns"
        )));
    }

    let total: f64 = mask.iter_ones().map(|i| weights[i] as f64).sum();
    let threshold = rng.gen_range(0.0..total);
    let mut cursor = 0.0f64;
    let mut chosen = None;
    for index in mask.iter_ones() {
        chosen = Some(index);
        cursor += weights[index] as f64;
        if cursor >= threshold {
            break;
        }
    }

    if let Some(index) = chosen {
        mask.clear_all();
        mask.set(index);
    }
    Ok(())
}

fn random_cell<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> (usize, usize) {
    (rng.gen_range(0..width), rng.gen_range(0..height))
}

/// Reads the collapsed wave back into a tilemap: each cell renders as the
/// top-left tile of its sole surviving pattern.
fn render(wave: &WaveGrid, model: &LearnedModel) -> Result<Tilemap, GenerateError> {
    let mut out = Tilemap::filled(wave.width(), wave.height(), TileId(0));
    for y in 0..wave.height() {
        for x in 0..wave.width() {
            let pattern = wave
                .get(x, y)
                .and_then(|cell| if cell.count() == 1 { cell.iter_ones().next() } else { None })
                .ok_or_else(|| {
                    GenerateError::Internal(format!("cell ({x}, {y}) is not collapsed"))
                })?;
            out.set(x, y, model.patterns()[pattern].top_left());
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tileweave_rules::learn;

    fn stripe_model() -> LearnedModel {
        let image =
            Tilemap::from_rows(&[vec![0, 1, 0, 1], vec![0, 1, 0, 1], vec![0, 1, 0, 1]]).unwrap();
        learn(&[image], 2).unwrap()
    }

    #[test]
    fn rejects_degenerate_requests() {
        let model = stripe_model();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            solve(&model, &[], &SolveConfig::new(0, 4, 5), &mut rng),
            Err(GenerateError::InvalidDimensions {
                width: 0,
                height: 4,
            })
        );
        assert_eq!(
            solve(&model, &[], &SolveConfig::new(4, 4, 0), &mut rng),
            Err(GenerateError::InvalidMaxAttempts(0))
        );
    }

    #[test]
    fn rejects_misplaced_presets() {
        let model = stripe_model();
        let mut rng = StdRng::seed_from_u64(0);
        let mut mask = PatternMask::empty(2);
        mask.set(0);
        let preset = PresetInstruction { x: 9, y: 0, mask };
        assert_eq!(
            solve(&model, &[preset], &SolveConfig::new(4, 4, 5), &mut rng),
            Err(GenerateError::PresetOutOfBounds {
                x: 9,
                y: 0,
                width: 4,
                height: 4,
            })
        );
    }

    #[test]
    fn rejects_mismatched_preset_masks() {
        let model = stripe_model();
        let mut rng = StdRng::seed_from_u64(0);
        let preset = PresetInstruction {
            x: 0,
            y: 0,
            mask: PatternMask::full(7),
        };
        assert_eq!(
            solve(&model, &[preset], &SolveConfig::new(4, 4, 5), &mut rng),
            Err(GenerateError::PresetMaskLength {
                x: 0,
                y: 0,
                found: 7,
                expected: 2,
            })
        );
    }

    #[test]
    fn observation_collapses_to_a_possible_pattern() {
        let model = stripe_model();
        let mut wave = WaveGrid::new(1, 1, 2);
        let mut rng = StdRng::seed_from_u64(3);
        observe(&mut wave, (0, 0), model.weights(), &mut rng).unwrap();
        let cell = wave.get(0, 0).unwrap();
        assert_eq!(cell.count(), 1);
    }

    #[test]
    fn observation_respects_the_surviving_set() {
        let model = stripe_model();
        let mut wave = WaveGrid::new(1, 1, 2);
        let mut only_one = PatternMask::empty(2);
        only_one.set(1);
        wave.apply_preset(0, 0, &only_one);

        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..10 {
            wave.apply_preset(0, 0, &only_one);
            observe(&mut wave, (0, 0), model.weights(), &mut rng).unwrap();
            assert!(wave.get(0, 0).unwrap().contains(1));
        }
    }

    #[test]
    fn empty_preset_mask_is_unsatisfiable() {
        let model = stripe_model();
        let mut rng = StdRng::seed_from_u64(0);
        let preset = PresetInstruction {
            x: 0,
            y: 0,
            mask: PatternMask::empty(2),
        };
        assert_eq!(
            solve(&model, &[preset], &SolveConfig::new(1, 1, 5), &mut rng),
            Err(GenerateError::Unsatisfiable { x: 0, y: 0 })
        );
    }
}
