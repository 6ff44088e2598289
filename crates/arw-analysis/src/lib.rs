//! Statistics derived from a stationary distribution
//!
//! Read-only consumers of the `(states, probabilities)` pair produced by
//! `arw-chain`: k-point joint intensities (marginals), pair correlations,
//! survivor-count probabilities, and the specialization of all sleep
//! probabilities to a single shared parameter. No new machinery beyond
//! combinatorial enumeration and symbolic summation.

use arw_chain::StationaryDist;
use arw_symbolic::{ParamSet, Rat, SymbolicError};

/// Error type for distribution analyses
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    #[error("distribution has {states} states but {probs} probabilities")]
    LengthMismatch { states: usize, probs: usize },

    #[error(transparent)]
    Symbolic(#[from] SymbolicError),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

fn check(sd: &StationaryDist) -> Result<()> {
    if sd.states.len() != sd.probs.len() {
        return Err(AnalysisError::LengthMismatch {
            states: sd.states.len(),
            probs: sd.probs.len(),
        });
    }
    Ok(())
}

/// All k-element subsets of `0..n` in lexicographic order. Empty when
/// `k > n`; the single empty subset when `k == 0`.
fn combinations(n: usize, k: usize) -> Vec<Vec<usize>> {
    if k > n {
        return Vec::new();
    }
    let mut out = Vec::new();
    let mut current: Vec<usize> = (0..k).collect();
    loop {
        out.push(current.clone());
        // Advance the rightmost index that still has room.
        let mut i = k;
        loop {
            if i == 0 {
                return out;
            }
            i -= 1;
            if current[i] < n - k + i {
                break;
            }
        }
        current[i] += 1;
        for j in (i + 1)..k {
            current[j] = current[j - 1] + 1;
        }
    }
}

/// The k-point joint intensities: for each k-vertex subset (lexicographic
/// order), the probability that every vertex of the subset is occupied.
pub fn joint_intensities(k: usize, sd: &StationaryDist) -> Result<Vec<Rat>> {
    check(sd)?;
    let n = sd.vertices();
    let arity = sd.params.arity();

    let mut out = Vec::new();
    for subset in combinations(n, k) {
        let mut intensity = Rat::zero(arity);
        for (state, prob) in sd.states.iter().zip(&sd.probs) {
            if subset.iter().all(|&v| state.site(v).is_occupied()) {
                intensity = &intensity + prob;
            }
        }
        out.push(intensity);
    }
    Ok(out)
}

/// One-point joint intensities: the occupation probability per vertex.
pub fn marginals(sd: &StationaryDist) -> Result<Vec<Rat>> {
    joint_intensities(1, sd)
}

/// Pair correlations `P(i and j) - P(i) P(j)`, ordered like the
/// two-point subsets (i < j, lexicographic).
pub fn pair_correlations(sd: &StationaryDist) -> Result<Vec<Rat>> {
    let joints = joint_intensities(2, sd)?;
    let margs = marginals(sd)?;
    let n = sd.vertices();

    let mut out = Vec::with_capacity(joints.len());
    let mut idx = 0;
    for i in 0..n {
        for j in (i + 1)..n {
            let product = &margs[i] * &margs[j];
            out.push(&joints[idx] - &product);
            idx += 1;
        }
    }
    Ok(out)
}

/// Probability that at least `k` particles survive (at least `k` vertices
/// remain occupied).
pub fn survivors_at_least(k: usize, sd: &StationaryDist) -> Result<Rat> {
    check(sd)?;
    let arity = sd.params.arity();
    let mut prob = Rat::zero(arity);
    for (state, p) in sd.states.iter().zip(&sd.probs) {
        if state.occupied_count() >= k {
            prob = &prob + p;
        }
    }
    Ok(prob)
}

/// Probability that exactly `k` particles survive.
pub fn survivors_exactly(k: usize, sd: &StationaryDist) -> Result<Rat> {
    check(sd)?;
    let arity = sd.params.arity();
    let mut prob = Rat::zero(arity);
    for (state, p) in sd.states.iter().zip(&sd.probs) {
        if state.occupied_count() == k {
            prob = &prob + p;
        }
    }
    Ok(prob)
}

/// Replace every per-vertex sleep probability with one shared parameter.
pub fn specialize_univariate(sd: &StationaryDist, name: &str) -> Result<StationaryDist> {
    check(sd)?;
    let target = ParamSet::single(name);
    let map = vec![0; sd.params.arity()];
    let probs = sd
        .probs
        .iter()
        .map(|p| p.substitute(&map, &target))
        .collect::<arw_symbolic::Result<Vec<Rat>>>()?;
    Ok(StationaryDist {
        params: target,
        states: sd.states.clone(),
        probs,
    })
}
