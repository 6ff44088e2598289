//! End-to-end absorption checks over a family of small graphs.

use arw_chain::{build_chain, stationary_distribution, Graph};
use arw_linalg::SilentProgress;
use arw_symbolic::ParamSet;

fn graphs() -> Vec<(&'static str, Vec<Vec<usize>>)> {
    vec![
        ("2-path", vec![vec![1], vec![0]]),
        ("3-path", vec![vec![1], vec![0, 2], vec![1]]),
        ("3-cycle", vec![vec![1, 2], vec![0, 2], vec![0, 1]]),
        ("4-path", vec![vec![1], vec![0, 2], vec![1, 3], vec![2]]),
        (
            "4-cycle",
            vec![vec![1, 3], vec![0, 2], vec![1, 3], vec![0, 2]],
        ),
    ]
}

// The 4-vertex chains are exercised build-only here; their full symbolic
// solves live in the criterion bench.
fn solved_graphs() -> Vec<(&'static str, Vec<Vec<usize>>)> {
    graphs().into_iter().take(3).collect()
}

#[test]
fn transition_rows_are_stochastic_everywhere() {
    for (name, adjacency) in graphs() {
        let graph = Graph::new(adjacency).unwrap();
        let params = ParamSet::sleep_probs(graph.non_sink());
        let chain = build_chain(&graph, &params).unwrap();
        for id in 0..chain.states.len() {
            let sum = chain.transitions.row_sum(id, params.arity());
            assert!(sum.is_one(), "{name}: row {id} sums to {sum:?}");
        }
    }
}

#[test]
fn distributions_are_normalized() {
    for (name, adjacency) in solved_graphs() {
        let graph = Graph::new(adjacency).unwrap();
        let params = ParamSet::sleep_probs(graph.non_sink());
        let sd = stationary_distribution(&graph, &params, &mut SilentProgress).unwrap();
        assert_eq!(sd.states.len(), sd.probs.len(), "{name}");
        assert!(sd.total().is_one(), "{name}: probabilities do not sum to 1");
    }
}

#[test]
fn rebuilds_are_identical_not_merely_isomorphic() {
    for (_, adjacency) in solved_graphs() {
        let graph = Graph::new(adjacency).unwrap();
        let params = ParamSet::sleep_probs(graph.non_sink());
        let first = stationary_distribution(&graph, &params, &mut SilentProgress).unwrap();
        let second = stationary_distribution(&graph, &params, &mut SilentProgress).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn numeric_sanity_on_the_three_cycle() {
    let graph = Graph::new(vec![vec![1, 2], vec![0, 2], vec![0, 1]]).unwrap();
    let params = ParamSet::sleep_probs(2);
    let sd = stationary_distribution(&graph, &params, &mut SilentProgress).unwrap();

    for point in [[0.1, 0.9], [0.5, 0.5], [0.99, 0.01]] {
        let total: f64 = sd
            .probs
            .iter()
            .map(|p| p.eval_f64(&point).unwrap())
            .sum();
        assert!((total - 1.0).abs() < 1e-9, "total {total} at {point:?}");
    }
}
