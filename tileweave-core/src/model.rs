use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use tileweave_rules::{learn, LearnError, LearnedModel, PatternMask, TileId, Tilemap};

use crate::solver::{solve, PresetInstruction, SolveConfig};
use crate::GenerateError;

/// Binds a learned model to solver invocations and a persistent preset list.
///
/// The learned artifacts are immutable after `learn`; presets accumulate on
/// the model and are applied to every subsequent `generate` until cleared.
#[derive(Debug, Clone)]
pub struct Model {
    learned: LearnedModel,
    presets: Vec<PresetInstruction>,
}

impl Model {
    /// Learns a model from example tilemaps. See [`tileweave_rules::learn`].
    pub fn learn(images: &[Tilemap], n: usize) -> Result<Self, LearnError> {
        Ok(Self::from_learned(learn(images, n)?))
    }

    /// Wraps already-learned artifacts.
    pub fn from_learned(learned: LearnedModel) -> Self {
        Self {
            learned,
            presets: Vec::new(),
        }
    }

    /// The learned artifacts backing this model.
    pub fn learned(&self) -> &LearnedModel {
        &self.learned
    }

    /// The presets currently stored on the model.
    pub fn presets(&self) -> &[PresetInstruction] {
        &self.presets
    }

    /// Pins cell `(x, y)` to a single pattern index.
    ///
    /// Coordinates are validated against the output size at `generate` time.
    pub fn set_preset_pattern(
        &mut self,
        x: usize,
        y: usize,
        pattern: usize,
    ) -> Result<(), GenerateError> {
        let num_patterns = self.learned.num_patterns();
        if pattern >= num_patterns {
            return Err(GenerateError::UnknownPattern {
                index: pattern,
                num_patterns,
            });
        }
        let mut mask = PatternMask::empty(num_patterns);
        mask.set(pattern);
        self.presets.push(PresetInstruction { x, y, mask });
        Ok(())
    }

    /// Restricts cell `(x, y)` to the patterns whose top-left tile is
    /// `tile`. A tile no pattern starts with leaves the cell empty, which
    /// `generate` reports as `Unsatisfiable`.
    pub fn set_preset_tile(&mut self, x: usize, y: usize, tile: TileId) {
        let mut mask = PatternMask::empty(self.learned.num_patterns());
        for (index, pattern) in self.learned.patterns().iter().enumerate() {
            if pattern.top_left() == tile {
                mask.set(index);
            }
        }
        self.presets.push(PresetInstruction { x, y, mask });
    }

    /// Restricts cell `(x, y)` to an arbitrary pattern mask.
    pub fn set_preset_mask(
        &mut self,
        x: usize,
        y: usize,
        mask: PatternMask,
    ) -> Result<(), GenerateError> {
        let expected = self.learned.num_patterns();
        if mask.len() != expected {
            return Err(GenerateError::PresetMaskLength {
                x,
                y,
                found: mask.len(),
                expected,
            });
        }
        self.presets.push(PresetInstruction { x, y, mask });
        Ok(())
    }

    /// Forgets every stored preset.
    pub fn clear_presets(&mut self) {
        self.presets.clear();
    }

    /// Runs the solver with entropy-sourced randomness.
    pub fn generate(
        &self,
        width: usize,
        height: usize,
        max_attempts: usize,
    ) -> Result<Option<Tilemap>, GenerateError> {
        self.generate_with_rng(width, height, max_attempts, &mut StdRng::from_entropy())
    }

    /// Runs the solver with a fixed seed; identical seeds give identical
    /// outputs.
    pub fn generate_seeded(
        &self,
        width: usize,
        height: usize,
        max_attempts: usize,
        seed: u64,
    ) -> Result<Option<Tilemap>, GenerateError> {
        self.generate_with_rng(width, height, max_attempts, &mut StdRng::seed_from_u64(seed))
    }

    /// Runs the solver with a caller-supplied RNG.
    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        width: usize,
        height: usize,
        max_attempts: usize,
        rng: &mut R,
    ) -> Result<Option<Tilemap>, GenerateError> {
        let config = SolveConfig::new(width, height, max_attempts);
        solve(&self.learned, &self.presets, &config, rng)
    }
}
