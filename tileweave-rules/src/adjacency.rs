use crate::direction::Direction;
use crate::mask::PatternMask;
use crate::pattern::Pattern;

/// Which patterns may sit next to which, per direction.
///
/// `allowed(i, d)` holds a bit for every pattern `j` that can legally sit
/// immediately at direction `d` of pattern `i`. The table is symmetric:
/// bit `j` of `allowed(i, d)` is set iff bit `i` of `allowed(j, d.opposite())`
/// is set. Self-adjacency is not assumed; a pattern is its own neighbor only
/// when its shifted overlap matches itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyRules {
    num_patterns: usize,
    allowed: Vec<[PatternMask; 4]>,
}

impl AdjacencyRules {
    /// Computes the full table by overlap comparison over every pair of
    /// patterns, self-pairs included.
    pub(crate) fn build(patterns: &[Pattern]) -> Self {
        let num_patterns = patterns.len();
        let mut allowed: Vec<[PatternMask; 4]> = (0..num_patterns)
            .map(|_| std::array::from_fn(|_| PatternMask::empty(num_patterns)))
            .collect();

        for i in 0..num_patterns {
            for j in i..num_patterns {
                for dir in Direction::ALL {
                    if patterns[i].compatible_with(&patterns[j], dir) {
                        allowed[i][dir.index()].set(j);
                        allowed[j][dir.opposite().index()].set(i);
                    }
                }
            }
        }

        Self {
            num_patterns,
            allowed,
        }
    }

    /// Number of patterns the table covers.
    pub fn num_patterns(&self) -> usize {
        self.num_patterns
    }

    /// The mask of patterns that may sit at direction `dir` of `pattern`.
    ///
    /// # Panics
    /// Panics if `pattern` is out of range.
    #[inline]
    pub fn allowed(&self, pattern: usize, dir: Direction) -> &PatternMask {
        &self.allowed[pattern][dir.index()]
    }

    /// True when pattern `b` may sit at direction `dir` of pattern `a`.
    /// Out-of-range indices are never adjacent.
    #[inline]
    pub fn check(&self, a: usize, b: usize, dir: Direction) -> bool {
        if a >= self.num_patterns || b >= self.num_patterns {
            return false;
        }
        self.allowed[a][dir.index()].contains(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tilemap::Tilemap;

    fn patterns_of(rows: &[Vec<usize>], n: usize) -> Vec<Pattern> {
        let map = Tilemap::from_rows(rows).unwrap();
        let mut out = Vec::new();
        for y in 0..=map.height() - n {
            for x in 0..=map.width() - n {
                out.push(Pattern::from_window(&map, x, y, n));
            }
        }
        out
    }

    #[test]
    fn uniform_pattern_is_self_adjacent_everywhere() {
        let patterns = patterns_of(&[vec![0, 0], vec![0, 0]], 2);
        let rules = AdjacencyRules::build(&patterns[..1]);
        for dir in Direction::ALL {
            assert!(rules.check(0, 0, dir));
            assert_eq!(rules.allowed(0, dir).count(), 1);
        }
    }

    #[test]
    fn table_is_symmetric() {
        // Stripe sample: two distinct column patterns.
        let patterns = vec![
            Pattern::from_window(
                &Tilemap::from_rows(&[vec![0, 1], vec![0, 1]]).unwrap(),
                0,
                0,
                2,
            ),
            Pattern::from_window(
                &Tilemap::from_rows(&[vec![1, 0], vec![1, 0]]).unwrap(),
                0,
                0,
                2,
            ),
        ];
        let rules = AdjacencyRules::build(&patterns);
        for dir in Direction::ALL {
            for a in 0..2 {
                for b in 0..2 {
                    assert_eq!(
                        rules.check(a, b, dir),
                        rules.check(b, a, dir.opposite()),
                        "symmetry broken for ({a}, {b}, {dir:?})"
                    );
                }
            }
        }
        // The stripes only interleave horizontally and repeat vertically.
        assert!(rules.check(0, 1, Direction::Right));
        assert!(!rules.check(0, 0, Direction::Right));
        assert!(rules.check(0, 0, Direction::Up));
        assert!(!rules.check(0, 1, Direction::Up));
    }

    #[test]
    fn out_of_range_is_never_adjacent() {
        let patterns = patterns_of(&[vec![0, 0], vec![0, 0]], 2);
        let rules = AdjacencyRules::build(&patterns[..1]);
        assert!(!rules.check(0, 1, Direction::Up));
        assert!(!rules.check(1, 0, Direction::Up));
    }
}
