//! Errors surfaced at the crate's call boundaries.

use thiserror::Error;

use crate::{
    edge::Edge,
    node::{Node, NumNodes},
};

/// Convenience alias for results carrying a [`FlowError`].
pub type Result<T> = std::result::Result<T, FlowError>;

/// Errors reported by the max-flow engine and the network generator.
///
/// All of these are detected synchronously when the offending call is made;
/// the algorithms themselves never fail midway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum FlowError {
    /// An arc carries a negative or non-finite capacity.
    #[error("arc {edge} has a negative or non-finite capacity")]
    InvalidCapacity {
        /// The offending arc.
        edge: Edge,
    },

    /// Source and sink must be distinct vertices of the network.
    #[error("source {source} and sink {sink} must be distinct nodes below {num_nodes}")]
    InvalidEndpoints {
        /// Requested source node.
        source: Node,
        /// Requested sink node.
        sink: Node,
        /// Number of nodes in the network.
        num_nodes: NumNodes,
    },

    /// A generator was configured with degenerate parameters.
    #[error("invalid generator parameters: {reason}")]
    InvalidParameters {
        /// Description of the violated constraint.
        reason: String,
    },
}
