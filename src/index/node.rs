use std::fmt::Write as _;

use crate::index::bits::{BitPartition, QueryError};

/// One node of the wavelet tree, covering an inclusive value range.
///
/// A node whose range has collapsed to a single value is a leaf and stores
/// no further structure. An internal node owns the routing partition for its
/// locally-held positions and exactly two children covering the lower and
/// upper halves of its range. Halves that receive no elements are kept as
/// explicit empty nodes so that descents can stop at them instead of
/// dereferencing missing children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaveletNode {
    /// Range collapsed to a single value; implicitly represents `value` at
    /// every one of its `len` positions.
    Leaf {
        /// The single value covered by this node.
        value: i64,
        /// Number of original elements routed here.
        len: usize,
    },

    /// A half of some parent's range that no element was routed into.
    Empty {
        /// Lower bound (inclusive) of the uncovered range.
        low: i64,
        /// Upper bound (inclusive) of the uncovered range.
        high: i64,
    },

    /// A node still covering more than one value.
    Internal {
        /// Lower bound (inclusive) of the covered range.
        low: i64,
        /// Upper bound (inclusive) of the covered range.
        high: i64,
        /// Routing bits and zeros prefix-sum for the local positions.
        partition: BitPartition,
        /// Child covering `[low, mid]`.
        left: Box<WaveletNode>,
        /// Child covering `[mid + 1, high]`.
        right: Box<WaveletNode>,
    },
}

impl WaveletNode {
    /// Recursively build the subtree for `values`, all of which lie within
    /// `[low, high]`. The caller validates the domain before the first call.
    pub(crate) fn build(values: Vec<i64>, low: i64, high: i64) -> Self {
        if values.is_empty() {
            return WaveletNode::Empty { low, high };
        }
        if low == high {
            return WaveletNode::Leaf {
                value: low,
                len: values.len(),
            };
        }

        // Overflow-safe floor((low + high) / 2).
        let mid = low + (high - low) / 2;
        let mut partition = BitPartition::with_capacity(values.len());
        let mut left_values = Vec::new();
        let mut right_values = Vec::new();

        for value in values {
            let goes_left = value <= mid;
            partition.push(goes_left);
            if goes_left {
                left_values.push(value);
            } else {
                right_values.push(value);
            }
        }

        WaveletNode::Internal {
            low,
            high,
            partition,
            left: Box::new(WaveletNode::build(left_values, low, mid)),
            right: Box::new(WaveletNode::build(right_values, mid + 1, high)),
        }
    }

    /// Number of original elements held by this subtree.
    pub fn len(&self) -> usize {
        match self {
            WaveletNode::Leaf { len, .. } => *len,
            WaveletNode::Empty { .. } => 0,
            WaveletNode::Internal { partition, .. } => partition.len(),
        }
    }

    /// Whether this subtree holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total node count of this subtree, including empty nodes.
    pub(crate) fn node_count(&self) -> usize {
        match self {
            WaveletNode::Internal { left, right, .. } => {
                1 + left.node_count() + right.node_count()
            }
            _ => 1,
        }
    }

    /// Decode the original value at local position `index`.
    ///
    /// The root validates `index` against the full length; within the
    /// descent each mapped index stays inside the child it is passed to.
    pub(crate) fn access_at(&self, index: usize) -> Result<i64, QueryError> {
        match self {
            WaveletNode::Leaf { value, .. } => Ok(*value),
            WaveletNode::Empty { .. } => Err(QueryError::OutOfRange { index, len: 0 }),
            WaveletNode::Internal {
                partition,
                left,
                right,
                ..
            } => {
                let bit = partition.bit(index);
                // Count of same-class positions up to and including `index`,
                // converted to the child's 0-based index space.
                let mapped = partition.rank_bit(bit, index + 1)? - 1;
                if bit {
                    right.access_at(mapped)
                } else {
                    left.access_at(mapped)
                }
            }
        }
    }

    /// Count occurrences of `value` among local positions `0..=i`.
    ///
    /// Precondition: `i < self.len()`. A `value` outside this node's range
    /// contributes nothing and yields 0 without descending.
    pub(crate) fn rank_value(&self, i: usize, value: i64) -> usize {
        match self {
            // The clamp mirrors the descent guards below: with `i` bounded at
            // the public entry it never engages, but it keeps an oversized
            // prefix from over-counting a short leaf.
            WaveletNode::Leaf { value: held, len } => {
                if value == *held {
                    (i + 1).min(*len)
                } else {
                    0
                }
            }
            WaveletNode::Empty { .. } => 0,
            WaveletNode::Internal {
                low,
                high,
                partition,
                left,
                right,
            } => {
                if value < *low || value > *high {
                    return 0;
                }
                let mid = low + (high - low) / 2;
                let zeros = partition.zeros_before(i + 1);
                if value <= mid {
                    // No left-routed positions in the prefix means no
                    // occurrences of a left-half value.
                    if zeros == 0 {
                        0
                    } else {
                        left.rank_value(zeros - 1, value)
                    }
                } else {
                    let ones = (i + 1) - zeros;
                    if ones == 0 {
                        0
                    } else {
                        right.rank_value(ones - 1, value)
                    }
                }
            }
        }
    }

    /// The `k`-th smallest value (1-indexed) among local positions `l..=r`.
    ///
    /// Preconditions (`l <= r < len`, `1 <= k <= r - l + 1`) are validated
    /// once at the root; the remappings below preserve them level by level.
    pub(crate) fn quantile_at(&self, l: usize, r: usize, k: usize) -> Result<i64, QueryError> {
        match self {
            WaveletNode::Leaf { value, .. } => Ok(*value),
            WaveletNode::Empty { .. } => Err(QueryError::InvalidRange {
                start: l,
                end: r,
                k,
                len: 0,
            }),
            WaveletNode::Internal {
                partition,
                left,
                right,
                ..
            } => {
                let left_l = partition.zeros_before(l);
                let left_r = partition.zeros_before(r + 1);
                let in_left = left_r - left_l;
                if k <= in_left {
                    left.quantile_at(left_l, left_r - 1, k)
                } else {
                    // Right-child positions are remapped through
                    // `position - zeros_before(position)`.
                    right.quantile_at(l - left_l, r - left_r, k - in_left)
                }
            }
        }
    }

    /// Append one line per node describing range boundaries and the local
    /// zeros prefix-sum, indented by descent path.
    pub(crate) fn write_structure(&self, out: &mut String, indent: &str) {
        match self {
            WaveletNode::Leaf { value, len } => {
                let _ = writeln!(out, "{indent}[{value}-{value}] n={len}");
            }
            WaveletNode::Empty { low, high } => {
                let _ = writeln!(out, "{indent}[{low}-{high}] n=0");
            }
            WaveletNode::Internal {
                low,
                high,
                partition,
                left,
                right,
            } => {
                let zeros: Vec<usize> = (0..=partition.len())
                    .map(|pos| partition.zeros_before(pos))
                    .collect();
                let _ = writeln!(out, "{indent}[{low}-{high}] zeros={zeros:?}");
                left.write_structure(out, &format!("{indent}  L-"));
                right.write_structure(out, &format!("{indent}  R-"));
            }
        }
    }
}
