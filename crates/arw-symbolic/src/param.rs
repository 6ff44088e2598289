//! Named parameter sets
//!
//! Every symbolic value in a computation is a rational function over one
//! fixed, ordered set of parameters. The set is established once per chain
//! (one sleep probability per non-sink vertex) and threaded through to
//! rendering.

use serde::{Deserialize, Serialize};

/// An ordered set of parameter names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSet {
    names: Vec<String>,
}

impl ParamSet {
    pub fn new(names: Vec<String>) -> Self {
        ParamSet { names }
    }

    /// The conventional sleep-probability set `q_0 .. q_{n-1}`.
    pub fn sleep_probs(n: usize) -> Self {
        ParamSet {
            names: (0..n).map(|i| format!("q_{i}")).collect(),
        }
    }

    /// A single-parameter set, used by the univariate specialization.
    pub fn single(name: &str) -> Self {
        ParamSet {
            names: vec![name.to_string()],
        }
    }

    pub fn arity(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn name(&self, index: usize) -> &str {
        &self.names[index]
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sleep_prob_names() {
        let ps = ParamSet::sleep_probs(3);
        assert_eq!(ps.arity(), 3);
        assert_eq!(ps.name(0), "q_0");
        assert_eq!(ps.name(2), "q_2");
    }
}
