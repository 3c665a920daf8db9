//! Coherence checking for a rule set.
//!
//! A rule set is incoherent when two conflicting options are linked by a chain
//! of dependencies in either direction. The walk is breadth-first over the
//! undirected dependency links and expands each option at most once, so it
//! terminates on cycles and self-dependencies.

use std::collections::{HashSet, VecDeque};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Warning;
use crate::option::OptionId;
use crate::rules::RuleSet;

/// A conflicting pair that is also connected through dependencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Incoherence {
    /// Conflict side the walk started from.
    pub a: OptionId,
    /// Conflict side that was reached.
    pub b: OptionId,
    /// Dependency chain from `a` to `b`, both ends included.
    pub path: Vec<OptionId>,
}

impl Incoherence {
    /// The advisory warning for this finding.
    pub fn to_warning(&self) -> Warning {
        Warning::IncoherentRuleSet {
            a: self.a.clone(),
            b: self.b.clone(),
        }
    }
}

impl fmt::Display for Incoherence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let chain: Vec<&str> = self.path.iter().map(OptionId::as_str).collect();
        write!(
            f,
            "{} conflicts with {} but they are linked by {}",
            self.a,
            self.b,
            chain.join(" - ")
        )
    }
}

/// Find the first conflict pair whose sides can reach each other.
///
/// Pairs are scanned in the rule set's first-seen option order.
pub fn find_incoherence(rules: &RuleSet) -> Option<Incoherence> {
    rules.conflict_pairs().find_map(|(a, b)| {
        dependency_path(rules, a.as_str(), b.as_str()).map(|path| Incoherence {
            a: a.clone(),
            b: b.clone(),
            path,
        })
    })
}

/// True when no conflict pair is linked through dependencies.
pub fn is_coherent(rules: &RuleSet) -> bool {
    find_incoherence(rules).is_none()
}

/// Breadth-first walk from `from` looking for `to`.
///
/// The frontier is seeded with the direct neighbors of `from`, and `from`
/// starts out visited. Returns the chain `from .. to` when found.
pub fn dependency_path(rules: &RuleSet, from: &str, to: &str) -> Option<Vec<OptionId>> {
    // Each trail entry remembers which entry discovered it.
    let mut trail: Vec<(&OptionId, Option<usize>)> = Vec::new();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut queue = VecDeque::new();

    visited.insert(from);
    for next in rules.neighbors_of(from) {
        trail.push((next, None));
        queue.push_back(trail.len() - 1);
    }

    while let Some(idx) = queue.pop_front() {
        let node = trail[idx].0;
        if node.as_str() == to {
            return Some(unwind(&trail, idx, from));
        }

        if visited.insert(node.as_str()) {
            for next in rules.neighbors_of(node.as_str()) {
                trail.push((next, Some(idx)));
                queue.push_back(trail.len() - 1);
            }
        }
    }

    None
}

fn unwind(trail: &[(&OptionId, Option<usize>)], mut idx: usize, from: &str) -> Vec<OptionId> {
    let mut path = vec![trail[idx].0.clone()];
    while let Some(parent) = trail[idx].1 {
        path.push(trail[parent].0.clone());
        idx = parent;
    }
    path.push(OptionId::from(from));
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cycle() -> RuleSet {
        let mut rules = RuleSet::new();
        rules.add_dependency("a", "b");
        rules.add_dependency("b", "c");
        rules.add_dependency("c", "a");
        rules
    }

    fn names(path: &[OptionId]) -> Vec<&str> {
        path.iter().map(OptionId::as_str).collect()
    }

    #[test]
    fn cycle_with_outside_conflict_is_coherent() {
        let mut rules = cycle();
        rules.add_conflict("c", "d");
        assert!(is_coherent(&rules));
        assert!(rules.is_coherent());
    }

    #[test]
    fn linking_conflict_into_cycle_breaks_coherence() {
        let mut rules = cycle();
        rules.add_conflict("c", "d");
        rules.add_dependency("d", "a");

        let found = find_incoherence(&rules).expect("d now reaches c");
        assert_eq!(found.a.as_str(), "c");
        assert_eq!(found.b.as_str(), "d");
        assert_eq!(names(&found.path), ["c", "a", "d"]);
        assert!(!rules.is_coherent());
    }

    #[test]
    fn reachability_is_symmetric() {
        let mut rules = RuleSet::new();
        rules.add_dependency("x", "y");
        rules.add_dependency("z", "y");
        assert!(rules.can_reach("x", "z"));
        assert!(rules.can_reach("z", "x"));
        assert!(!rules.can_reach("x", "w"));
    }

    #[test]
    fn one_hop_both_ways() {
        let mut rules = RuleSet::new();
        rules.add_dependency("p", "q");
        assert_eq!(names(&dependency_path(&rules, "p", "q").unwrap()), ["p", "q"]);
        assert_eq!(names(&dependency_path(&rules, "q", "p").unwrap()), ["q", "p"]);
    }

    #[test]
    fn self_dependency_terminates() {
        let mut rules = RuleSet::new();
        rules.add_dependency("f", "f");
        rules.add_conflict("f", "g");
        assert!(dependency_path(&rules, "f", "g").is_none());
        assert!(is_coherent(&rules));
    }

    #[test]
    fn unknown_endpoints_are_unreachable() {
        let rules = cycle();
        assert!(dependency_path(&rules, "nope", "a").is_none());
        assert!(dependency_path(&rules, "a", "nope").is_none());
    }

    #[test]
    fn shortest_chain_reported() {
        let mut rules = RuleSet::new();
        rules.add_dependency("a", "b");
        rules.add_dependency("b", "c");
        rules.add_dependency("c", "d");
        rules.add_dependency("a", "d");
        let path = dependency_path(&rules, "a", "d").unwrap();
        assert_eq!(names(&path), ["a", "d"]);
    }

    #[test]
    fn display_shows_chain() {
        let mut rules = cycle();
        rules.add_conflict("a", "c");
        let found = find_incoherence(&rules).unwrap();
        let text = found.to_string();
        assert!(text.starts_with("a conflicts with c"), "{text}");
        assert!(text.contains("a - c"), "{text}");
        assert_eq!(
            found.to_warning(),
            Warning::IncoherentRuleSet {
                a: "a".into(),
                b: "c".into()
            }
        );
    }
}
