//! Wavelet-tree index internals.
//!
//! The tree bisects its value domain recursively: each internal node owns a
//! [`BitPartition`] routing its locally-held positions into the lower or
//! upper half of its range, and rank over those routing bits is what every
//! query reduces to.

mod bits;
mod node;
mod tree;

pub use bits::{BitPartition, QueryError};
pub use node::WaveletNode;
pub use tree::{value_bounds, BuildError, WaveletTree};
