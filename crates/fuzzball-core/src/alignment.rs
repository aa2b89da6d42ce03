//! Smith-Waterman local alignment
//!
//! Scores a query against one candidate and recovers the best local match.
//!
//! # Scoring (defaults)
//!
//! | Event    | Score |
//! |----------|-------|
//! | match    | +2    |
//! | mismatch | -1    |
//! | gap      | -1    |
//!
//! The alignment score is the maximum cell of the DP matrix, floored at 0.
//! The reported alignment starts from the first maximal cell in row-major
//! order and is traced back until a zero cell. When several predecessors
//! explain a cell, diagonal wins over up (query advances alone), which wins
//! over left (candidate advances alone).

use serde::{Deserialize, Serialize};

use crate::sequence::CodePointSequence;

/// Scoring constants. Symmetric: swapping query and candidate keeps the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scoring {
    pub match_score: i32,
    pub mismatch_penalty: i32,
    pub gap_penalty: i32,
}

impl Default for Scoring {
    fn default() -> Self {
        Self {
            match_score: 2,
            mismatch_penalty: -1,
            gap_penalty: -1,
        }
    }
}

/// Best local alignment between a query and a candidate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentResult {
    pub score: i32,
    /// (query_index, candidate_index) for every diagonal step, in order
    pub alignment: Vec<(usize, usize)>,
    /// Candidate span covered by the alignment
    pub matched: CodePointSequence,
}

/// Row-major (rows x cols) DP matrix
struct ScoreMatrix {
    cols: usize,
    cells: Vec<i32>,
}

impl ScoreMatrix {
    fn new(rows: usize, cols: usize) -> Self {
        Self {
            cols,
            cells: vec![0; rows * cols],
        }
    }

    #[inline]
    fn get(&self, i: usize, j: usize) -> i32 {
        self.cells[i * self.cols + j]
    }

    #[inline]
    fn set(&mut self, i: usize, j: usize, value: i32) {
        self.cells[i * self.cols + j] = value;
    }
}

impl Scoring {
    #[inline]
    fn substitution(&self, a: u32, b: u32) -> i32 {
        if a == b {
            self.match_score
        } else {
            self.mismatch_penalty
        }
    }

    /// Align `query` against `candidate`. O(|query| * |candidate|) time and space.
    pub fn align(
        &self,
        query: &CodePointSequence,
        candidate: &CodePointSequence,
    ) -> AlignmentResult {
        let q = query.as_slice();
        let c = candidate.as_slice();
        if q.is_empty() || c.is_empty() {
            return AlignmentResult::default();
        }

        let mut h = ScoreMatrix::new(q.len() + 1, c.len() + 1);
        let (mut best, mut best_i, mut best_j) = (0, 0, 0);

        for i in 1..=q.len() {
            for j in 1..=c.len() {
                let diag = h.get(i - 1, j - 1) + self.substitution(q[i - 1], c[j - 1]);
                let up = h.get(i - 1, j) + self.gap_penalty;
                let left = h.get(i, j - 1) + self.gap_penalty;
                let value = 0i32.max(diag).max(up).max(left);
                h.set(i, j, value);

                if value > best {
                    best = value;
                    best_i = i;
                    best_j = j;
                }
            }
        }

        if best == 0 {
            return AlignmentResult::default();
        }

        let alignment = self.traceback(&h, q, c, best_i, best_j);
        let matched = match (alignment.first(), alignment.last()) {
            (Some(&(_, start)), Some(&(_, end))) => CodePointSequence::from(&c[start..=end]),
            _ => CodePointSequence::default(),
        };

        AlignmentResult {
            score: best,
            alignment,
            matched,
        }
    }

    fn traceback(
        &self,
        h: &ScoreMatrix,
        q: &[u32],
        c: &[u32],
        mut i: usize,
        mut j: usize,
    ) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();

        while i > 0 && j > 0 && h.get(i, j) > 0 {
            let value = h.get(i, j);
            if value == h.get(i - 1, j - 1) + self.substitution(q[i - 1], c[j - 1]) {
                pairs.push((i - 1, j - 1));
                i -= 1;
                j -= 1;
            } else if value == h.get(i - 1, j) + self.gap_penalty {
                i -= 1;
            } else {
                j -= 1;
            }
        }

        pairs.reverse();
        pairs
    }
}

/// Align with the default scoring constants
pub fn align(query: &CodePointSequence, candidate: &CodePointSequence) -> AlignmentResult {
    Scoring::default().align(query, candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn seq(s: &str) -> CodePointSequence {
        CodePointSequence::new(s)
    }

    #[test]
    fn test_identical_sequences() {
        for s in ["a", "hello", "mississippi", "日本語テキスト"] {
            let result = align(&seq(s), &seq(s));
            let len = s.chars().count();
            assert_eq!(result.score, 2 * len as i32);
            assert_eq!(result.alignment, (0..len).map(|k| (k, k)).collect::<Vec<_>>());
            assert_eq!(result.matched, seq(s));
        }
    }

    #[test]
    fn test_symmetric_score() {
        let pairs = [
            ("hello", "yellow"),
            ("kitten", "sitting"),
            ("abcd", "abxcd"),
            ("banana", "ananas"),
            ("x", "xyz"),
        ];
        for (a, b) in pairs {
            assert_eq!(align(&seq(a), &seq(b)).score, align(&seq(b), &seq(a)).score);
        }
    }

    #[test]
    fn test_disjoint_sequences_score_zero() {
        let result = align(&seq("abc"), &seq("xyz"));
        assert_eq!(result, AlignmentResult::default());
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(align(&seq(""), &seq("abc")), AlignmentResult::default());
        assert_eq!(align(&seq("abc"), &seq("")), AlignmentResult::default());
    }

    #[test]
    fn test_local_match_inside_longer_candidate() {
        let result = align(&seq("hello"), &seq("jello"));
        assert_eq!(result.score, 8);
        assert_eq!(result.alignment, vec![(1, 1), (2, 2), (3, 3), (4, 4)]);
        assert_eq!(result.matched.to_string(), "ello");
    }

    #[test]
    fn test_gap_in_candidate() {
        let result = align(&seq("abcd"), &seq("abxcd"));
        assert_eq!(result.score, 7);
        assert_eq!(result.alignment, vec![(0, 0), (1, 1), (2, 3), (3, 4)]);
        assert_eq!(result.matched.to_string(), "abxcd");
    }

    #[test]
    fn test_first_maximal_cell_wins() {
        // (1,1) and (2,1) both hold 2; the row-major first is reported
        let result = align(&seq("aa"), &seq("a"));
        assert_eq!(result.score, 2);
        assert_eq!(result.alignment, vec![(0, 0)]);
    }

    #[test]
    fn test_custom_scoring() {
        let scoring = Scoring {
            match_score: 3,
            mismatch_penalty: -3,
            gap_penalty: -2,
        };
        assert_eq!(scoring.align(&seq("abc"), &seq("abc")).score, 9);
        assert_eq!(scoring.align(&seq("abc"), &seq("axc")).score, 3);
    }
}
