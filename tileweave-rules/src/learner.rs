use std::collections::HashMap;

use log::debug;

use crate::adjacency::AdjacencyRules;
use crate::pattern::Pattern;
use crate::tilemap::{TileId, Tilemap};
use crate::LearnError;

/// The immutable artifacts produced by [`learn`]: the pattern table, the
/// occurrence weights, and the adjacency table.
///
/// A learned model never changes after construction and may be shared by any
/// number of concurrent solver runs.
#[derive(Debug, Clone, PartialEq)]
pub struct LearnedModel {
    n: usize,
    patterns: Vec<Pattern>,
    weights: Vec<usize>,
    adjacency: AdjacencyRules,
}

impl LearnedModel {
    /// Side length of the learned patterns.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of distinct patterns.
    pub fn num_patterns(&self) -> usize {
        self.patterns.len()
    }

    /// The pattern table, indexed by pattern index.
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Occurrence count per pattern index. Always positive.
    pub fn weights(&self) -> &[usize] {
        &self.weights
    }

    /// The adjacency table.
    pub fn adjacency(&self) -> &AdjacencyRules {
        &self.adjacency
    }
}

/// Learns a model from example tilemaps.
///
/// Every NxN window of every image is scanned in row-major order, images in
/// the order given, without periodic wrap and without rotations or
/// reflections. Distinct windows become pattern-table entries in order of
/// first appearance; repeats increment the matching entry's weight. The
/// adjacency table is then computed from pairwise overlap comparison.
///
/// The result is a pure function of `(images, n)`: identical inputs yield an
/// identical model on every run and platform.
pub fn learn(images: &[Tilemap], n: usize) -> Result<LearnedModel, LearnError> {
    if n < 1 {
        return Err(LearnError::InvalidPatternSize(n));
    }
    if images.is_empty() {
        return Err(LearnError::NoImages);
    }
    for (index, image) in images.iter().enumerate() {
        if image.width() < n || image.height() < n {
            return Err(LearnError::ImageTooSmall {
                index,
                width: image.width(),
                height: image.height(),
                n,
            });
        }
    }

    let mut index_by_tiles: HashMap<Vec<TileId>, usize> = HashMap::new();
    let mut patterns: Vec<Pattern> = Vec::new();
    let mut weights: Vec<usize> = Vec::new();

    for image in images {
        for y in 0..=image.height() - n {
            for x in 0..=image.width() - n {
                let window = Pattern::from_window(image, x, y, n);
                match index_by_tiles.get(window.tiles()) {
                    Some(&index) => weights[index] += 1,
                    None => {
                        index_by_tiles.insert(window.tiles().to_vec(), patterns.len());
                        patterns.push(window);
                        weights.push(1);
                    }
                }
            }
        }
    }

    let adjacency = AdjacencyRules::build(&patterns);
    debug!(
        "learned {} patterns from {} image(s) at n={}",
        patterns.len(),
        images.len(),
        n
    );

    Ok(LearnedModel {
        n,
        patterns,
        weights,
        adjacency,
    })
}
