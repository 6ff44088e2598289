//! Activated-random-walk chains with one sink
//!
//! Enumerates the reachable particle configurations of an activated random
//! walk on a finite graph by breadth-first search, assembles the absorbing
//! Markov chain's transition matrix over the exact rational-function field,
//! and derives the stationary distribution through the fundamental-matrix
//! system `(I - Q)`.
//!
//! The walk starts from one active particle on every non-sink vertex; the
//! last vertex of the adjacency list is the sink. Firing follows the
//! abelian-network convention: the unique vertex holding two active
//! particles fires first, otherwise the lowest-indexed vertex holding one.

mod builder;
mod dist;
mod state;

pub use builder::{build_chain, ChainSpace, Graph, TransitionMatrix};
pub use dist::{stationary_distribution, StationaryDist};
pub use state::{Config, Site, StateArena, StateId};

use arw_linalg::LinalgError;
use arw_symbolic::SymbolicError;

/// Error type for chain construction and solving
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChainError {
    /// The sleep-probability count does not match the number of non-sink
    /// vertices. Raised before any exploration begins.
    #[error("expected {expected} sleep probabilities (one per non-sink vertex), got {found}")]
    ArityMismatch { expected: usize, found: usize },

    #[error("invalid graph: {context}")]
    InvalidGraph { context: String },

    /// The firing rule's assumptions were violated by an explored
    /// configuration; indicates a defect, not a recoverable condition.
    #[error("firing invariant violated: {context}")]
    InvariantViolation { context: String },

    #[error(transparent)]
    Symbolic(#[from] SymbolicError),

    #[error(transparent)]
    Linalg(#[from] LinalgError),
}

pub type Result<T> = std::result::Result<T, ChainError>;
