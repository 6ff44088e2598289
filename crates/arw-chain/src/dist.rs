//! Stationary distribution via the fundamental matrix
//!
//! Splits the transition matrix into the transient-to-transient block `Q`
//! and the transient-to-absorbing block `R`, then computes row 0 of
//! `(I - Q)^{-1}` (absorption starts from the all-active configuration at
//! index 0) and multiplies by `R` to obtain one absorption probability per
//! absorbing configuration.

use crate::builder::{build_chain, Graph};
use crate::state::Config;
use crate::Result;
use arw_linalg::{selected_inverse, Matrix, ProgressSink};
use arw_symbolic::{ParamSet, Rat};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Instant;

/// The computed distribution: absorbing configurations in discovery order,
/// one exact probability each. The probabilities sum to one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationaryDist {
    pub params: ParamSet,
    pub states: Vec<Config>,
    pub probs: Vec<Rat>,
}

impl StationaryDist {
    /// Number of non-sink vertices.
    pub fn vertices(&self) -> usize {
        self.states.first().map(|s| s.len()).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Symbolic sum of all probabilities.
    pub fn total(&self) -> Rat {
        self.probs
            .iter()
            .fold(Rat::zero(self.params.arity()), |acc, p| &acc + p)
    }
}

/// Compute the stationary distribution of the walk on `graph` with the
/// given sleep probabilities, starting from all vertices active.
pub fn stationary_distribution(
    graph: &Graph,
    params: &ParamSet,
    sink: &mut dyn ProgressSink,
) -> Result<StationaryDist> {
    let arity = params.arity();

    let started = Instant::now();
    let chain = build_chain(graph, params)?;
    log::info!(
        "transition matrix: {} states, {} absorbing, built in {:.3}s",
        chain.states.len(),
        chain.absorbing.len(),
        started.elapsed().as_secs_f64()
    );

    let absorbing: HashSet<usize> = chain.absorbing.iter().copied().collect();
    let transient: Vec<usize> =
        (0..chain.states.len()).filter(|i| !absorbing.contains(i)).collect();

    let states: Vec<Config> = chain
        .absorbing
        .iter()
        .map(|&i| chain.states.get(i).clone())
        .collect();

    // Degenerate walk with no transient states: the initial configuration
    // is itself absorbing.
    if transient.is_empty() {
        let probs = vec![Rat::one(arity); states.len()];
        return Ok(StationaryDist {
            params: params.clone(),
            states,
            probs,
        });
    }

    let ell = transient.len();
    let mut transient_local = vec![usize::MAX; chain.states.len()];
    for (local, &global) in transient.iter().enumerate() {
        transient_local[global] = local;
    }
    let mut absorbing_local = vec![usize::MAX; chain.states.len()];
    for (local, &global) in chain.absorbing.iter().enumerate() {
        absorbing_local[global] = local;
    }

    // I - Q over the transient block, R from transient to absorbing.
    let mut fundamental = Matrix::identity(ell, arity);
    let mut reach = Matrix::zeros(ell, chain.absorbing.len(), arity);
    for (&(from, to), p) in chain.transitions.iter() {
        if absorbing.contains(&from) {
            continue;
        }
        let row = transient_local[from];
        if absorbing.contains(&to) {
            reach.set(row, absorbing_local[to], p.clone());
        } else {
            let col = transient_local[to];
            let updated = fundamental.get(row, col) - p;
            fundamental.set(row, col, updated);
        }
    }

    let solving = Instant::now();
    let all_cols: Vec<usize> = (0..ell).collect();
    let row0 = selected_inverse(fundamental, &[0], &all_cols, sink)?;
    let dist = row0.mul(&reach)?;
    log::info!("linear solve finished in {:.3}s", solving.elapsed().as_secs_f64());

    let probs: Vec<Rat> = (0..dist.cols()).map(|j| dist.get(0, j).clone()).collect();

    Ok(StationaryDist {
        params: params.clone(),
        states,
        probs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use arw_linalg::SilentProgress;

    #[test]
    fn single_vertex_always_escapes() {
        // 2-vertex graph: the only neighbor is the sink, so the particle
        // either sleeps or leaves; absorption at the empty configuration
        // still carries total probability together with the asleep one.
        let graph = Graph::new(vec![vec![1], vec![0]]).unwrap();
        let params = ParamSet::sleep_probs(1);
        let sd = stationary_distribution(&graph, &params, &mut SilentProgress).unwrap();

        assert_eq!(sd.states.len(), 2);
        assert!(sd.total().is_one());

        // P(asleep) = q, P(escaped) = 1 - q.
        let q = Rat::var(0, &params).unwrap();
        assert_eq!(sd.probs[0], q);
        assert_eq!(sd.probs[1], &Rat::one(1) - &q);
    }

    #[test]
    fn cycle_distribution_sums_to_one() {
        let graph = Graph::new(vec![vec![1, 2], vec![0, 2], vec![0, 1]]).unwrap();
        let params = ParamSet::sleep_probs(2);
        let sd = stationary_distribution(&graph, &params, &mut SilentProgress).unwrap();
        assert!(!sd.is_empty());
        assert!(sd.total().is_one());
        for state in &sd.states {
            assert!(!state.has_active());
        }
    }

    #[test]
    fn path_distribution_sums_to_one() {
        let graph = Graph::new(vec![vec![1], vec![0, 2], vec![1]]).unwrap();
        let params = ParamSet::sleep_probs(2);
        let sd = stationary_distribution(&graph, &params, &mut SilentProgress).unwrap();
        assert!(sd.total().is_one());
    }

    #[test]
    fn probabilities_are_probabilities_numerically() {
        // Spot-check positivity on the 3-cycle at an interior point.
        let graph = Graph::new(vec![vec![1, 2], vec![0, 2], vec![0, 1]]).unwrap();
        let params = ParamSet::sleep_probs(2);
        let sd = stationary_distribution(&graph, &params, &mut SilentProgress).unwrap();
        let point = [0.3, 0.7];
        let mut total = 0.0;
        for p in &sd.probs {
            let v = p.eval_f64(&point).unwrap();
            assert!(v >= 0.0 && v <= 1.0, "probability {v} out of range");
            total += v;
        }
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn serde_roundtrip() {
        let graph = Graph::new(vec![vec![1], vec![0]]).unwrap();
        let params = ParamSet::sleep_probs(1);
        let sd = stationary_distribution(&graph, &params, &mut SilentProgress).unwrap();
        let json = serde_json::to_string(&sd).unwrap();
        let back: StationaryDist = serde_json::from_str(&json).unwrap();
        assert_eq!(sd, back);
    }
}
