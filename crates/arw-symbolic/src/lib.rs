//! Exact symbolic arithmetic for activated-random-walk chains
//!
//! This crate provides the rational-function field the chain solver works
//! over: multivariate polynomials in the per-vertex sleep probabilities,
//! with arbitrary-precision rational coefficients, and reduced fractions
//! of those polynomials.
//!
//! # Architecture
//!
//! - Flat monomial-map polynomial representation ([`Poly`])
//! - Primitive-remainder-sequence GCD for fraction cancellation
//! - Canonical fractions: reduced, denominator monic ([`Rat`])
//! - A fixed, ordered parameter set ([`ParamSet`]) shared by all values
//!
//! # Design Principles
//!
//! 1. **Exactness**: no floating point anywhere in the arithmetic; `f64`
//!    only appears in the optional evaluation helpers.
//! 2. **Cancel everywhere**: every arithmetic result is reduced, which is
//!    what keeps expression size bounded across repeated elimination.
//! 3. **Degree as a heuristic**: the numerator total degree is exposed for
//!    pivot selection only, never for correctness decisions.

mod gcd;
mod param;
mod poly;
mod rat;

pub use gcd::poly_gcd;
pub use param::ParamSet;
pub use poly::{Monomial, Poly};
pub use rat::Rat;

/// Error type for symbolic operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SymbolicError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("parameter index {index} out of range for arity {arity}")]
    ParameterOutOfRange { index: usize, arity: usize },
}

pub type Result<T> = std::result::Result<T, SymbolicError>;
