//! Breadth-first construction of the absorbing chain
//!
//! From the all-active configuration, repeatedly fire the selected vertex
//! and record every outgoing transition with its symbolic probability. Each
//! newly observed configuration gets a fresh index and is enqueued; the
//! transition matrix grows one row and column per discovery.

use crate::state::{Config, Site, StateArena, StateId};
use crate::{ChainError, Result};
use arw_symbolic::{ParamSet, Rat};
use std::collections::{BTreeMap, VecDeque};

/// Adjacency-list graph; the last vertex is the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    adjacency: Vec<Vec<usize>>,
}

impl Graph {
    /// Validate and wrap an adjacency list. The graph must be simple and
    /// every non-sink vertex needs at least one neighbor (particles must be
    /// able to move).
    pub fn new(adjacency: Vec<Vec<usize>>) -> Result<Self> {
        let n_vertices = adjacency.len();
        if n_vertices == 0 {
            return Err(ChainError::InvalidGraph {
                context: "empty adjacency list".to_string(),
            });
        }
        for (v, neighbors) in adjacency.iter().enumerate() {
            if v + 1 < n_vertices && neighbors.is_empty() {
                return Err(ChainError::InvalidGraph {
                    context: format!("non-sink vertex {v} has no neighbors"),
                });
            }
            for &nb in neighbors {
                if nb >= n_vertices {
                    return Err(ChainError::InvalidGraph {
                        context: format!("vertex {v} lists unknown neighbor {nb}"),
                    });
                }
                if nb == v {
                    return Err(ChainError::InvalidGraph {
                        context: format!("vertex {v} has a self-loop"),
                    });
                }
            }
        }
        Ok(Graph { adjacency })
    }

    pub fn vertices(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of non-sink vertices.
    pub fn non_sink(&self) -> usize {
        self.adjacency.len() - 1
    }

    pub fn sink(&self) -> usize {
        self.adjacency.len() - 1
    }

    pub fn neighbors(&self, v: usize) -> &[usize] {
        &self.adjacency[v]
    }

    pub fn degree(&self, v: usize) -> usize {
        self.adjacency[v].len()
    }
}

/// Sparse transition matrix indexed by state id, append-only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransitionMatrix {
    entries: BTreeMap<(StateId, StateId), Rat>,
}

impl TransitionMatrix {
    pub fn new() -> Self {
        TransitionMatrix::default()
    }

    pub fn set(&mut self, from: StateId, to: StateId, p: Rat) {
        if p.is_zero() {
            self.entries.remove(&(from, to));
        } else {
            self.entries.insert((from, to), p);
        }
    }

    pub fn get(&self, from: StateId, to: StateId) -> Option<&Rat> {
        self.entries.get(&(from, to))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&(StateId, StateId), &Rat)> {
        self.entries.iter()
    }

    /// Symbolic sum of one row's entries.
    pub fn row_sum(&self, from: StateId, arity: usize) -> Rat {
        self.entries
            .range((from, 0)..=(from, usize::MAX))
            .fold(Rat::zero(arity), |acc, (_, p)| &acc + p)
    }
}

/// The explored chain: interned states, transition matrix, and the indices
/// of the absorbing states in discovery order.
#[derive(Debug, Clone)]
pub struct ChainSpace {
    pub states: StateArena,
    pub transitions: TransitionMatrix,
    pub absorbing: Vec<StateId>,
}

/// Select the vertex to fire, or `None` when the configuration is
/// absorbing. A vertex with two active particles takes priority; the model
/// admits at most one such vertex, which is checked rather than assumed.
fn firing_vertex(config: &Config) -> Result<Option<(usize, u8)>> {
    let mut two: Option<usize> = None;
    for (v, site) in config.sites().iter().enumerate() {
        if *site == Site::TwoActive {
            if let Some(first) = two {
                return Err(ChainError::InvariantViolation {
                    context: format!(
                        "vertices {first} and {v} both hold two active particles in {config}"
                    ),
                });
            }
            two = Some(v);
        }
    }
    if let Some(v) = two {
        return Ok(Some((v, 2)));
    }
    Ok(config
        .sites()
        .iter()
        .position(|s| *s == Site::OneActive)
        .map(|v| (v, 1)))
}

/// A particle arrives at `site`; a sleeping particle is woken by it.
fn receive(site: Site, config: &Config, v: usize) -> Result<Site> {
    match site {
        Site::Empty => Ok(Site::OneActive),
        Site::OneActive | Site::Asleep => Ok(Site::TwoActive),
        Site::TwoActive => Err(ChainError::InvariantViolation {
            context: format!("vertex {v} would exceed two particles in {config}"),
        }),
    }
}

/// Explore the reachable configuration space and assemble the absorbing
/// chain's transition matrix.
///
/// `params` supplies one sleep probability per non-sink vertex; a count
/// mismatch fails before any exploration starts.
pub fn build_chain(graph: &Graph, params: &ParamSet) -> Result<ChainSpace> {
    let n = graph.non_sink();
    if params.arity() != n {
        return Err(ChainError::ArityMismatch {
            expected: n,
            found: params.arity(),
        });
    }

    let mut states = StateArena::new();
    let mut transitions = TransitionMatrix::new();
    let mut absorbing = Vec::new();

    let (root, _) = states.intern(Config::all_active(n));
    let mut queue: VecDeque<StateId> = VecDeque::from([root]);

    while let Some(id) = queue.pop_front() {
        let config = states.get(id).clone();

        let (v, count) = match firing_vertex(&config)? {
            Some(fire) => fire,
            None => {
                absorbing.push(id);
                transitions.set(id, id, Rat::one(params.arity()));
                continue;
            }
        };

        let sleep = Rat::var(v, params)?;
        let jump = (&Rat::one(params.arity()) - &sleep)
            .div(&Rat::from_int(graph.degree(v) as i64, params.arity()))?;

        // Sleep attempt. With a second particle present the sleeper is
        // immediately re-activated, so the configuration is unchanged.
        let after_fire = if count == 2 {
            transitions.set(id, id, sleep);
            config.with_site(v, Site::OneActive)
        } else {
            let asleep = config.with_site(v, Site::Asleep);
            let (target, fresh) = states.intern(asleep);
            if fresh {
                queue.push_back(target);
            }
            transitions.set(id, target, sleep);
            config.with_site(v, Site::Empty)
        };

        // Jump to each neighbor; the sink swallows the particle.
        for &nb in graph.neighbors(v) {
            let target_config = if nb == graph.sink() {
                after_fire.clone()
            } else {
                let received = receive(after_fire.site(nb), &after_fire, nb)?;
                after_fire.with_site(nb, received)
            };
            let (target, fresh) = states.intern(target_config);
            if fresh {
                queue.push_back(target);
            }
            transitions.set(id, target, jump.clone());
        }
    }

    log::debug!(
        "explored {} states ({} absorbing)",
        states.len(),
        absorbing.len()
    );

    Ok(ChainSpace {
        states,
        transitions,
        absorbing,
    })
}
