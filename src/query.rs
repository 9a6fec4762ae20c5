//! Stateless request/response surface over a built [`WaveletTree`].
//!
//! Each request is self-contained and evaluates to one typed outcome or one
//! typed failure; no session state lives on either side of the call.

use crate::index::{QueryError, WaveletTree};

/// A single read-only query against the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryRequest {
    /// Decode the original value at `index`.
    Access {
        /// 0-based position in the original sequence.
        index: usize,
    },
    /// Count occurrences of `value` among positions `0..=position`.
    Rank {
        /// Inclusive end of the counted prefix.
        position: usize,
        /// Value to count.
        value: i64,
    },
    /// The `k`-th smallest value among positions `start..=end`.
    Quantile {
        /// Start position (inclusive).
        start: usize,
        /// End position (inclusive).
        end: usize,
        /// Order statistic, 1-indexed.
        k: usize,
    },
}

/// Successful result of a [`QueryRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOutcome {
    /// A decoded or selected value (access, quantile).
    Value(i64),
    /// An occurrence count (rank).
    Count(usize),
}

/// Evaluate one request against `tree`.
pub fn execute(tree: &WaveletTree, request: QueryRequest) -> Result<QueryOutcome, QueryError> {
    match request {
        QueryRequest::Access { index } => tree.access(index).map(QueryOutcome::Value),
        QueryRequest::Rank { position, value } => {
            Ok(QueryOutcome::Count(tree.rank(position, value)))
        }
        QueryRequest::Quantile { start, end, k } => {
            tree.quantile(start, end, k).map(QueryOutcome::Value)
        }
    }
}
