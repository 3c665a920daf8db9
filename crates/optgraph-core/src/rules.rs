//! Rule set container: the dependency and conflict relations between options.
//!
//! Edges are append-only. Nothing is validated on insertion; self-dependencies,
//! duplicates, and cycles are all accepted and handled by the traversals that
//! read the graph.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::coherence::{dependency_path, find_incoherence, Incoherence};
use crate::option::OptionId;

/// The relation graph between options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleSet {
    /// `a -> [b, ..]` for every `add_dependency(a, b)`, in insertion order.
    dependencies: HashMap<OptionId, Vec<OptionId>>,
    /// Reverse of `dependencies`: `b -> [a, ..]`.
    dependents: HashMap<OptionId, Vec<OptionId>>,
    /// Symmetric closure of every dependency edge. Reachability only.
    undirected: HashMap<OptionId, Vec<OptionId>>,
    /// Symmetric conflict lists.
    conflicts: HashMap<OptionId, Vec<OptionId>>,
    /// Every option in the order it was first mentioned.
    order: Vec<OptionId>,
}

impl RuleSet {
    /// Create an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    // --- Mutation ---

    /// Record that `a` depends on `b`: selecting `a` requires `b`.
    pub fn add_dependency(&mut self, a: impl Into<OptionId>, b: impl Into<OptionId>) {
        let (a, b) = (a.into(), b.into());
        self.note(&a, &b);

        self.dependencies.entry(a.clone()).or_default().push(b.clone());
        self.dependents.entry(b.clone()).or_default().push(a.clone());
        self.undirected.entry(a.clone()).or_default().push(b.clone());
        self.undirected.entry(b).or_default().push(a);
    }

    /// Record that `a` and `b` may never be selected together.
    pub fn add_conflict(&mut self, a: impl Into<OptionId>, b: impl Into<OptionId>) {
        let (a, b) = (a.into(), b.into());
        self.note(&a, &b);

        self.conflicts.entry(a.clone()).or_default().push(b.clone());
        self.conflicts.entry(b).or_default().push(a);
    }

    // Must run before the edge maps are touched, since `contains` reads them.
    fn note(&mut self, a: &OptionId, b: &OptionId) {
        if !self.contains(a.as_str()) {
            self.order.push(a.clone());
        }
        if b != a && !self.contains(b.as_str()) {
            self.order.push(b.clone());
        }
    }

    // --- Lookups ---

    /// Options `option` depends on, first-declared first.
    pub fn dependencies_of(&self, option: &str) -> &[OptionId] {
        self.dependencies.get(option).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Options that declared a dependency on `option`.
    pub fn dependents_of(&self, option: &str) -> &[OptionId] {
        self.dependents.get(option).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Options linked to `option` by a dependency in either direction.
    pub fn neighbors_of(&self, option: &str) -> &[OptionId] {
        self.undirected.get(option).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Options `option` conflicts with.
    pub fn conflicts_of(&self, option: &str) -> &[OptionId] {
        self.conflicts.get(option).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The first-declared dependency, whose flag a new option inherits.
    pub fn parent_of(&self, option: &str) -> Option<&OptionId> {
        self.dependencies_of(option).first()
    }

    /// Whether any rule mentions `option`.
    pub fn contains(&self, option: &str) -> bool {
        self.undirected.contains_key(option) || self.conflicts.contains_key(option)
    }

    /// Every option mentioned by a rule, in first-seen order.
    pub fn options(&self) -> impl Iterator<Item = &OptionId> {
        self.order.iter()
    }

    /// Number of distinct options.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no rule has been added yet.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of `add_dependency` calls recorded.
    pub fn dependency_count(&self) -> usize {
        self.dependencies.values().map(Vec::len).sum()
    }

    /// Number of `add_conflict` calls recorded.
    pub fn conflict_count(&self) -> usize {
        self.conflicts.values().map(Vec::len).sum::<usize>() / 2
    }

    /// Every recorded conflict as `(a, b)`, seen from both sides.
    pub fn conflict_pairs(&self) -> impl Iterator<Item = (&OptionId, &OptionId)> {
        self.order
            .iter()
            .flat_map(move |a| self.conflicts_of(a.as_str()).iter().map(move |b| (a, b)))
    }

    // --- Coherence ---

    /// True when no conflicting pair is linked through dependencies.
    pub fn is_coherent(&self) -> bool {
        self.find_incoherence().is_none()
    }

    /// The first conflicting pair linked through dependencies, if any.
    pub fn find_incoherence(&self) -> Option<Incoherence> {
        find_incoherence(self)
    }

    /// Whether `b` can be reached from `a` over dependency links.
    pub fn can_reach(&self, a: &str, b: &str) -> bool {
        dependency_path(self, a, b).is_some()
    }
}
