//! Team composition identity.

use serde::{Deserialize, Serialize};

/// Number of players on a team; composition blocks are runs of exactly
/// this many consecutive player rows.
pub const TEAM_SIZE: usize = 5;

/// The set of five agents a team picked for one map instance.
///
/// Identity is order-insensitive: agent names are sorted on construction,
/// so two teams with the same agents in different row order compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Composition {
    agents: Vec<String>,
}

impl Composition {
    /// Build a composition from agent names in any order.
    pub fn new(mut agents: Vec<String>) -> Self {
        agents.sort();
        Self { agents }
    }

    /// The sorted agent names.
    pub fn agents(&self) -> &[String] {
        &self.agents
    }

    /// Stable grouping key: the sorted names joined with `-`.
    pub fn key(&self) -> String {
        self.agents.join("-")
    }
}

impl std::fmt::Display for Composition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comp(names: &[&str]) -> Composition {
        Composition::new(names.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_identity_commutes_over_row_order() {
        let a = comp(&["Jett", "Omen", "Sova", "Sage", "Breach"]);
        let b = comp(&["Sage", "Breach", "Jett", "Sova", "Omen"]);
        assert_eq!(a, b);
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn test_key_is_sorted_join() {
        let c = comp(&["Omen", "Jett"]);
        assert_eq!(c.key(), "Jett-Omen");
    }

    #[test]
    fn test_different_agents_differ() {
        let a = comp(&["Jett", "Omen", "Sova", "Sage", "Breach"]);
        let b = comp(&["Jett", "Omen", "Sova", "Sage", "Fade"]);
        assert_ne!(a, b);
    }
}
