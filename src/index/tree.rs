use thiserror::Error;
use tracing::debug;

use crate::index::bits::QueryError;
use crate::index::node::WaveletNode;

/// Error type returned by wavelet tree construction.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum BuildError {
    /// The input sequence was empty.
    #[error("input sequence must be non-empty")]
    EmptyInput,

    /// The supplied value bounds were inverted.
    #[error("invalid bounds: low {low} exceeds high {high}")]
    InvalidBounds {
        /// Supplied lower bound.
        low: i64,
        /// Supplied upper bound.
        high: i64,
    },

    /// An input element fell outside the supplied value bounds.
    #[error("value {value} at position {position} outside bounds [{low}, {high}]")]
    ValueOutOfBounds {
        /// Offending value.
        value: i64,
        /// Its position in the input sequence.
        position: usize,
        /// Lower bound the value was checked against.
        low: i64,
        /// Upper bound the value was checked against.
        high: i64,
    },
}

/// Minimum and maximum of `values` in one scan, `None` when empty.
pub fn value_bounds(values: &[i64]) -> Option<(i64, i64)> {
    let mut iter = values.iter().copied();
    let first = iter.next()?;
    let mut low = first;
    let mut high = first;
    for value in iter {
        low = low.min(value);
        high = high.max(value);
    }
    Some((low, high))
}

/// Static wavelet tree over a fixed sequence of integers.
///
/// Built once from a sequence and its inclusive value bounds, then queried
/// read-only: `access` decodes the value at a position, `rank` counts
/// occurrences of a value within a prefix, and `quantile` returns the k-th
/// smallest value within a position range. All queries run in
/// O(log(high - low + 1)); the structure is never mutated after
/// construction, so concurrent readers need no synchronization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaveletTree {
    root: WaveletNode,
    len: usize,
    low: i64,
    high: i64,
}

impl WaveletTree {
    /// Build a tree over `values`, scanning them once for the value bounds.
    pub fn build(values: &[i64]) -> Result<Self, BuildError> {
        let (low, high) = value_bounds(values).ok_or(BuildError::EmptyInput)?;
        Self::build_with_bounds(values, low, high)
    }

    /// Build a tree over `values` with caller-supplied inclusive bounds.
    ///
    /// Every element must lie within `[low, high]`; a violation is reported
    /// with the offending value and position.
    pub fn build_with_bounds(values: &[i64], low: i64, high: i64) -> Result<Self, BuildError> {
        if values.is_empty() {
            return Err(BuildError::EmptyInput);
        }
        if low > high {
            return Err(BuildError::InvalidBounds { low, high });
        }
        for (position, &value) in values.iter().enumerate() {
            if value < low || value > high {
                return Err(BuildError::ValueOutOfBounds {
                    value,
                    position,
                    low,
                    high,
                });
            }
        }

        let root = WaveletNode::build(values.to_vec(), low, high);
        debug!(
            len = values.len(),
            low,
            high,
            nodes = root.node_count(),
            "built wavelet tree"
        );

        Ok(Self {
            root,
            len: values.len(),
            low,
            high,
        })
    }

    /// Number of elements in the indexed sequence.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the indexed sequence is empty. Construction rejects empty
    /// input, so this is false for every built tree.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inclusive value bounds `(low, high)` the tree was built over.
    pub fn bounds(&self) -> (i64, i64) {
        (self.low, self.high)
    }

    /// The original value at `index`.
    pub fn access(&self, index: usize) -> Result<i64, QueryError> {
        if index >= self.len {
            return Err(QueryError::OutOfRange {
                index,
                len: self.len,
            });
        }
        self.root.access_at(index)
    }

    /// Count occurrences of `value` among positions `0..=position`.
    ///
    /// Never fails: a `value` outside the tree's bounds yields 0, and a
    /// `position` past the end counts over the whole sequence.
    pub fn rank(&self, position: usize, value: i64) -> usize {
        let bounded = position.min(self.len - 1);
        self.root.rank_value(bounded, value)
    }

    /// The `k`-th smallest value (1-indexed) among positions `start..=end`.
    pub fn quantile(&self, start: usize, end: usize, k: usize) -> Result<i64, QueryError> {
        if start > end || end >= self.len || k == 0 || k > end - start + 1 {
            return Err(QueryError::InvalidRange {
                start,
                end,
                k,
                len: self.len,
            });
        }
        self.root.quantile_at(start, end, k)
    }

    /// Render the node layout, one line per node with its value-range
    /// boundaries and zeros prefix-sum, indented by descent path.
    pub fn structure(&self) -> String {
        let mut out = String::new();
        self.root.write_structure(&mut out, "");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn access_round_trips_the_input() {
        let values = [3, 1, 4, 1, 5, 9, 2, 6];
        let tree = WaveletTree::build(&values).expect("build should succeed");

        for (index, &expected) in values.iter().enumerate() {
            assert_eq!(tree.access(index), Ok(expected));
        }
    }

    #[test]
    fn rank_matches_naive_counts() {
        let values = [2, 7, 2, 2, 5, 7, 1];
        let tree = WaveletTree::build(&values).expect("build should succeed");

        for position in 0..values.len() {
            for value in 0..=8 {
                let naive = values[..=position]
                    .iter()
                    .filter(|&&held| held == value)
                    .count();
                assert_eq!(tree.rank(position, value), naive, "rank({position}, {value})");
            }
        }
    }

    #[test]
    fn rank_clamps_positions_past_the_end() {
        let values = [4, 4, 2];
        let tree = WaveletTree::build(&values).expect("build should succeed");
        assert_eq!(tree.rank(100, 4), 2);
        assert_eq!(tree.rank(100, 3), 0);
    }

    #[test]
    fn quantile_matches_the_sorted_range() {
        let values = [9, 3, 7, 3, 1, 8];
        let tree = WaveletTree::build(&values).expect("build should succeed");

        for start in 0..values.len() {
            for end in start..values.len() {
                let mut sorted = values[start..=end].to_vec();
                sorted.sort_unstable();
                for k in 1..=sorted.len() {
                    assert_eq!(tree.quantile(start, end, k), Ok(sorted[k - 1]));
                }
            }
        }
    }

    #[test]
    fn bounds_report_the_scanned_extremes() {
        let tree = WaveletTree::build(&[-5, 12, 0]).expect("build should succeed");
        assert_eq!(tree.bounds(), (-5, 12));
        assert_eq!(tree.len(), 3);
        assert!(!tree.is_empty());
    }

    #[test]
    fn value_bounds_scans_min_and_max() {
        assert_eq!(value_bounds(&[3, -1, 7, 0]), Some((-1, 7)));
        assert_eq!(value_bounds(&[42]), Some((42, 42)));
        assert_eq!(value_bounds(&[]), None);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(WaveletTree::build(&[]), Err(BuildError::EmptyInput));
        assert_eq!(
            WaveletTree::build_with_bounds(&[], 0, 10),
            Err(BuildError::EmptyInput)
        );
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        assert_eq!(
            WaveletTree::build_with_bounds(&[1], 5, 2),
            Err(BuildError::InvalidBounds { low: 5, high: 2 })
        );
    }

    #[test]
    fn out_of_domain_values_are_rejected() {
        assert_eq!(
            WaveletTree::build_with_bounds(&[3, 11, 4], 0, 10),
            Err(BuildError::ValueOutOfBounds {
                value: 11,
                position: 1,
                low: 0,
                high: 10,
            })
        );
    }

    #[test_case(1, 0, 1; "inverted range")]
    #[test_case(0, 2, 0; "k of zero")]
    #[test_case(0, 2, 4; "k past the range width")]
    #[test_case(0, 5, 1; "end past the sequence")]
    fn quantile_rejects_invalid_ranges(start: usize, end: usize, k: usize) {
        let tree = WaveletTree::build(&[5, 1, 3]).expect("build should succeed");
        assert_eq!(
            tree.quantile(start, end, k),
            Err(QueryError::InvalidRange {
                start,
                end,
                k,
                len: 3,
            })
        );
    }

    #[test]
    fn access_rejects_indices_past_the_end() {
        let tree = WaveletTree::build(&[5, 1, 3]).expect("build should succeed");
        assert_eq!(
            tree.access(3),
            Err(QueryError::OutOfRange { index: 3, len: 3 })
        );
    }
}
