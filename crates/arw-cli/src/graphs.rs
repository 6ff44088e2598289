//! Graph sources: the built-in registry and JSON adjacency files
//!
//! A graph argument names either a built-in (small paths, cycles, and
//! cliques, the last vertex always the sink) or a JSON file holding an
//! adjacency list `[[...], ...]`.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

static REGISTRY: Lazy<BTreeMap<&'static str, Vec<Vec<usize>>>> = Lazy::new(|| {
    BTreeMap::from([
        ("2-path", vec![vec![1], vec![0]]),
        ("3-path", vec![vec![1], vec![0, 2], vec![1]]),
        ("3-cycle", vec![vec![1, 2], vec![0, 2], vec![0, 1]]),
        ("4-path", vec![vec![1], vec![0, 2], vec![1, 3], vec![2]]),
        ("4-cycle", vec![vec![1, 3], vec![0, 2], vec![1, 3], vec![0, 2]]),
        (
            "4-clique",
            vec![vec![1, 2, 3], vec![0, 2, 3], vec![0, 1, 3], vec![0, 1, 2]],
        ),
    ])
});

/// Names of all built-in graphs.
pub fn builtin_names() -> Vec<&'static str> {
    REGISTRY.keys().copied().collect()
}

/// Resolve a graph argument to `(name, adjacency)`. Built-in names win;
/// anything else is read as a JSON file and named by its stem.
pub fn resolve(arg: &str) -> Result<(String, Vec<Vec<usize>>)> {
    if let Some(adjacency) = REGISTRY.get(arg) {
        return Ok((arg.to_string(), adjacency.clone()));
    }

    let path = Path::new(arg);
    let text = fs::read_to_string(path).with_context(|| {
        format!(
            "'{arg}' is not a built-in graph ({}) and could not be read as a file",
            builtin_names().join(", ")
        )
    })?;
    let adjacency: Vec<Vec<usize>> = serde_json::from_str(&text)
        .with_context(|| format!("{arg}: expected a JSON adjacency list"))?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("graph")
        .to_string();
    Ok((name, adjacency))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_has_the_small_graphs() {
        let names = builtin_names();
        for expected in ["2-path", "3-cycle", "4-clique"] {
            assert!(names.contains(&expected));
        }
    }

    #[test]
    fn builtin_resolution() {
        let (name, adjacency) = resolve("2-path").unwrap();
        assert_eq!(name, "2-path");
        assert_eq!(adjacency, vec![vec![1], vec![0]]);
    }

    #[test]
    fn unknown_name_is_an_error() {
        assert!(resolve("no-such-graph").is_err());
    }
}
