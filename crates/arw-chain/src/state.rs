//! Particle configurations and the state arena
//!
//! A configuration records the occupancy of every non-sink vertex. Each
//! distinct configuration discovered during exploration is interned into an
//! arena and addressed by a stable integer index assigned in first-visit
//! order; index 0 is always the all-active initial configuration.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Stable index of an interned configuration.
pub type StateId = usize;

/// Occupancy of a single vertex.
///
/// Serialized with the conventional short symbols, so saved state lists
/// read as `["1", "s", "0"]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Site {
    #[serde(rename = "0")]
    Empty,
    #[serde(rename = "1")]
    OneActive,
    #[serde(rename = "2")]
    TwoActive,
    #[serde(rename = "s")]
    Asleep,
}

impl Site {
    /// Number of active particles at the vertex.
    pub fn active_count(&self) -> u8 {
        match self {
            Site::OneActive => 1,
            Site::TwoActive => 2,
            Site::Empty | Site::Asleep => 0,
        }
    }

    /// Whether any particle (active or asleep) occupies the vertex.
    pub fn is_occupied(&self) -> bool {
        !matches!(self, Site::Empty)
    }

    pub fn symbol(&self) -> char {
        match self {
            Site::Empty => '0',
            Site::OneActive => '1',
            Site::TwoActive => '2',
            Site::Asleep => 's',
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A particle configuration over the non-sink vertices.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Config(Vec<Site>);

impl Config {
    pub fn new(sites: Vec<Site>) -> Self {
        Config(sites)
    }

    /// The all-active starting configuration on `n` vertices.
    pub fn all_active(n: usize) -> Self {
        Config(vec![Site::OneActive; n])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn site(&self, v: usize) -> Site {
        self.0[v]
    }

    pub fn sites(&self) -> &[Site] {
        &self.0
    }

    /// Copy with vertex `v` replaced.
    pub fn with_site(&self, v: usize, site: Site) -> Config {
        let mut sites = self.0.clone();
        sites[v] = site;
        Config(sites)
    }

    /// Number of occupied (non-empty) vertices.
    pub fn occupied_count(&self) -> usize {
        self.0.iter().filter(|s| s.is_occupied()).count()
    }

    /// Whether any vertex holds an active particle.
    pub fn has_active(&self) -> bool {
        self.0.iter().any(|s| s.active_count() > 0)
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, s) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{s}")?;
        }
        write!(f, "]")
    }
}

/// Append-only store of discovered configurations with exact lookup.
#[derive(Debug, Default, Clone)]
pub struct StateArena {
    states: Vec<Config>,
    index: HashMap<Config, StateId>,
}

impl StateArena {
    pub fn new() -> Self {
        StateArena::default()
    }

    /// Intern a configuration, returning its stable index and whether it
    /// was newly discovered.
    pub fn intern(&mut self, config: Config) -> (StateId, bool) {
        if let Some(&id) = self.index.get(&config) {
            return (id, false);
        }
        let id = self.states.len();
        self.index.insert(config.clone(), id);
        self.states.push(config);
        (id, true)
    }

    pub fn get(&self, id: StateId) -> &Config {
        &self.states[id]
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Config> {
        self.states.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_assigns_first_visit_order() {
        let mut arena = StateArena::new();
        let a = Config::all_active(2);
        let b = a.with_site(0, Site::Asleep);

        assert_eq!(arena.intern(a.clone()), (0, true));
        assert_eq!(arena.intern(b.clone()), (1, true));
        assert_eq!(arena.intern(a), (0, false));
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(1), &b);
    }

    #[test]
    fn display_matches_plaintext_convention() {
        let c = Config::new(vec![Site::OneActive, Site::Asleep, Site::Empty]);
        assert_eq!(c.to_string(), "[1, s, 0]");
    }

    #[test]
    fn occupancy_counts() {
        let c = Config::new(vec![Site::TwoActive, Site::Asleep, Site::Empty]);
        assert_eq!(c.occupied_count(), 2);
        assert!(c.has_active());
        let stable = Config::new(vec![Site::Asleep, Site::Empty]);
        assert!(!stable.has_active());
    }

    #[test]
    fn serde_uses_short_symbols() {
        let c = Config::new(vec![Site::OneActive, Site::Asleep, Site::Empty]);
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, r#"["1","s","0"]"#);
    }
}
