//! # Wavelet-tree range index
//!
//! A static index over a fixed sequence of integers supporting three
//! read-only queries, each in O(log(high - low + 1)):
//!
//! 1. **Access**: decode the original value at a position
//! 2. **Rank**: count occurrences of a value within a prefix
//! 3. **Quantile**: the k-th smallest value within a position range
//!
//! The tree recursively bisects the value domain `[low, high]`; each
//! internal node routes its locally-held positions into the lower or upper
//! half via a bit vector backed by a dense zeros prefix-sum, so rank over
//! routing bits is O(1) and every query is a short recursive descent.
//!
//! ## Usage Example
//!
//! ```
//! use waverange::WaveletTree;
//!
//! let salaries = [50_000, 60_000, 55_000, 50_000, 70_000];
//! let tree = WaveletTree::build(&salaries)?;
//!
//! assert_eq!(tree.access(0)?, 50_000);
//! assert_eq!(tree.rank(4, 50_000), 2);
//! assert_eq!(tree.quantile(0, 4, 3)?, 55_000);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! The structure is immutable after construction: queries take `&self`, so
//! concurrent readers need no synchronization.

#![warn(missing_docs, missing_debug_implementations)]

pub mod index;
pub mod query;

// Re-exports for convenience
pub use index::{value_bounds, BitPartition, BuildError, QueryError, WaveletNode, WaveletTree};
pub use query::{execute, QueryOutcome, QueryRequest};
