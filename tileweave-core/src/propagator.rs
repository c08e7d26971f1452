use thiserror::Error;

use tileweave_rules::{AdjacencyRules, Direction, PatternMask};

use crate::queue::PropagationQueue;
use crate::wave::WaveGrid;

/// Errors specific to the propagation phase.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropagationError {
    /// A cell lost its last remaining pattern.
    #[error("contradiction found at ({x}, {y})")]
    Contradiction { x: usize, y: usize },
}

/// Runs an arc-consistency sweep from the queued cells until quiescence.
///
/// For every dequeued cell and direction `d`, the neighbor at that direction
/// is intersected with the union of `allowed(p, d)` over the cell's
/// surviving patterns. Neighbors that shrink are re-enqueued; a neighbor
/// left empty is a contradiction and aborts the sweep.
///
/// The sweep is confluent: for a given starting wave the final state does
/// not depend on the order cells were enqueued.
pub fn propagate(
    wave: &mut WaveGrid,
    rules: &AdjacencyRules,
    queue: &mut PropagationQueue,
) -> Result<(), PropagationError> {
    let width = wave.width() as isize;
    let height = wave.height() as isize;
    let num_patterns = wave.num_patterns();

    while let Some((x, y)) = queue.pop() {
        let source = match wave.get(x, y) {
            Some(cell) => cell.clone(),
            None => continue,
        };

        for dir in Direction::ALL {
            let (dy, dx) = dir.delta();
            let nx = x as isize + dx;
            let ny = y as isize + dy;
            if nx < 0 || nx >= width || ny < 0 || ny >= height {
                continue;
            }
            let (nx, ny) = (nx as usize, ny as usize);

            // Union of everything the survivors at (x, y) still support in
            // this direction.
            let mut support = PatternMask::empty(num_patterns);
            for pattern in source.iter_ones() {
                support.union_with(rules.allowed(pattern, dir));
            }

            let neighbor = match wave.get_mut(nx, ny) {
                Some(cell) => cell,
                None => continue,
            };
            let before = neighbor.count();
            neighbor.intersect_with(&support);
            let after = neighbor.count();

            if after == 0 {
                return Err(PropagationError::Contradiction { x: nx, y: ny });
            }
            if after < before {
                queue.push((nx, ny));
            }
        }
    }

    Ok(())
}
