//! Exact linear algebra over symbolic rational functions
//!
//! Solves `X * A = B` by column operations with degree-based pivoting,
//! entirely in the exact field provided by `arw-symbolic`. The elimination
//! reports singularity as a value rather than an error, which lets the
//! null-vector extraction reuse the same pass, and it emits progress events
//! through an injected sink so long runs stay observable without coupling
//! the algorithm to any display.

mod matrix;
mod progress;
mod solver;
mod sparse;

pub use matrix::Matrix;
pub use progress::{LogProgress, ProgressSink, SilentProgress};
pub use solver::{eliminate, null_vector, selected_inverse, solve, EliminationOutcome};
pub use sparse::SparseMatrix;

use arw_symbolic::{Rat, SymbolicError};

/// Error type for matrix and solver operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LinalgError {
    #[error(transparent)]
    Symbolic(#[from] SymbolicError),

    /// No nonzero pivot candidate in the given row; carries the row's
    /// entries at the point of failure for diagnosis.
    #[error("singular matrix: no pivot candidate in row {row}")]
    SingularMatrix { row: usize, row_entries: Vec<Rat> },

    #[error("shape mismatch: {context}")]
    ShapeMismatch { context: String },
}

pub type Result<T> = std::result::Result<T, LinalgError>;
