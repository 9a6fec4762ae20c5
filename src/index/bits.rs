use bitvec::prelude::*;
use thiserror::Error;

/// Error type returned by index queries.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum QueryError {
    /// An index or position argument fell outside the structurally valid
    /// bound for the node it was applied to.
    #[error("index {index} out of range for length {len}")]
    OutOfRange {
        /// Index that was requested.
        index: usize,
        /// Number of valid positions at the point of failure.
        len: usize,
    },

    /// `quantile` was called with an inverted range or an order statistic
    /// outside `[1, end - start + 1]`.
    #[error("invalid range [{start}, {end}] with k={k} over length {len}")]
    InvalidRange {
        /// Start position (inclusive) of the requested range.
        start: usize,
        /// End position (inclusive) of the requested range.
        end: usize,
        /// Requested order statistic (1-indexed).
        k: usize,
        /// Sequence length the range was checked against.
        len: usize,
    },
}

/// Routing bits for one internal node plus a dense zeros prefix-sum.
///
/// Bit `false` routes the element at that position into the left child,
/// `true` into the right child. `zeros_prefix` has one entry more than the
/// bit vector: `zeros_prefix[j]` counts the `false` bits among the first
/// `j` positions, which makes rank over either bit value O(1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitPartition {
    bits: BitVec,
    zeros_prefix: Vec<usize>,
}

impl BitPartition {
    pub(crate) fn with_capacity(len: usize) -> Self {
        let mut zeros_prefix = Vec::with_capacity(len + 1);
        zeros_prefix.push(0);
        Self {
            bits: BitVec::with_capacity(len),
            zeros_prefix,
        }
    }

    /// Append the routing decision for the next local position.
    pub(crate) fn push(&mut self, goes_left: bool) {
        let zeros = self.zeros_prefix[self.bits.len()] + usize::from(goes_left);
        self.bits.push(!goes_left);
        self.zeros_prefix.push(zeros);
    }

    /// Number of local positions covered by this partition.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether the partition holds no positions.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Routing bit at `index`: `false` = left child, `true` = right child.
    ///
    /// Callers validate `index < len()` before descending.
    pub fn bit(&self, index: usize) -> bool {
        self.bits[index]
    }

    /// Count of `false` bits among the first `pos` positions, unchecked
    /// beyond the slice bound itself. Used by descents whose arguments were
    /// validated at the root.
    pub fn zeros_before(&self, pos: usize) -> usize {
        self.zeros_prefix[pos]
    }

    /// Rank of `bit` over the first `pos` positions, `pos` in `[0, len]`.
    ///
    /// For `bit = false` this is `zeros_prefix[pos]`; for `bit = true` it is
    /// `pos - zeros_prefix[pos]`.
    pub fn rank_bit(&self, bit: bool, pos: usize) -> Result<usize, QueryError> {
        if pos > self.bits.len() {
            return Err(QueryError::OutOfRange {
                index: pos,
                len: self.bits.len(),
            });
        }
        let zeros = self.zeros_prefix[pos];
        Ok(if bit { pos - zeros } else { zeros })
    }
}
