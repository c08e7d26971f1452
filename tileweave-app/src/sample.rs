use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::AppError;
use tileweave_rules::{LearnError, Tilemap};

/// On-disk description of a learning sample: the pattern size, one or more
/// example tilemaps, and optional cell presets.
#[derive(Debug, Clone, Deserialize)]
pub struct SampleFile {
    /// Pattern side length (typically 2 or 3).
    pub n: usize,
    /// Example tilemaps as nested rows of tile ids.
    pub images: Vec<Vec<Vec<usize>>>,
    /// Cells to pin to a tile before each generation.
    #[serde(default)]
    pub presets: Vec<SamplePreset>,
}

/// Pins the output cell `(x, y)` to patterns starting with `tile`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SamplePreset {
    pub x: usize,
    pub y: usize,
    pub tile: usize,
}

/// Reads and parses a RON sample file.
pub fn load_sample(path: &Path) -> Result<SampleFile, AppError> {
    let text = fs::read_to_string(path)?;
    let sample: SampleFile = ron::from_str(&text)?;
    Ok(sample)
}

impl SampleFile {
    /// Converts the nested rows into tilemaps, rejecting ragged input.
    pub fn tilemaps(&self) -> Result<Vec<Tilemap>, LearnError> {
        self.images
            .iter()
            .map(|rows| Tilemap::from_rows(rows))
            .collect()
    }
}
