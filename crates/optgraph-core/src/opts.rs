//! `Opts`: a rule set and its selection, owned together.
//!
//! Toggling reads and writes both structures, so they live behind one owner.
//! Rules may be added at any time; the next read or toggle picks them up.

use std::fmt;

use serde::Serialize;

use crate::cascade::ToggleReport;
use crate::coherence::Incoherence;
use crate::error::Warning;
use crate::option::OptionId;
use crate::rules::RuleSet;
use crate::selection::SelectionState;

/// A rule set together with the current selection over it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Opts {
    rules: RuleSet,
    selection: SelectionState,
}

impl Opts {
    /// Take ownership of `rules`, starting from the initial selection it implies.
    pub fn new(rules: RuleSet) -> Self {
        let selection = SelectionState::new(&rules);
        Self { rules, selection }
    }

    // --- Rules ---

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// See [`RuleSet::add_dependency`].
    pub fn add_dependency(&mut self, a: impl Into<OptionId>, b: impl Into<OptionId>) {
        self.rules.add_dependency(a, b);
    }

    /// See [`RuleSet::add_conflict`].
    pub fn add_conflict(&mut self, a: impl Into<OptionId>, b: impl Into<OptionId>) {
        self.rules.add_conflict(a, b);
    }

    pub fn is_coherent(&self) -> bool {
        self.rules.is_coherent()
    }

    pub fn find_incoherence(&self) -> Option<Incoherence> {
        self.rules.find_incoherence()
    }

    /// The advisory warning for an incoherent rule set, if it is one.
    pub fn coherence_warning(&self) -> Option<Warning> {
        self.find_incoherence().map(|found| found.to_warning())
    }

    // --- Selection ---

    /// Flip `option` and cascade. Coherence is not enforced here.
    pub fn toggle(&mut self, option: impl Into<OptionId>) -> ToggleReport {
        self.selection.toggle(&self.rules, option)
    }

    /// Currently selected options.
    pub fn selected_options(&mut self) -> Vec<OptionId> {
        self.selection.selected_options(&self.rules)
    }

    pub fn is_selected(&self, option: &str) -> bool {
        self.selection.is_selected(option)
    }

    /// Bring the flag map up to date with the rules.
    pub fn refresh(&mut self) {
        self.selection.refresh(&self.rules);
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }
}

// Renders from a refreshed copy so `&self` is enough.
impl fmt::Display for Opts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut state = self.selection.clone();
        let selected = state.selected_options(&self.rules);
        let names: Vec<&str> = selected.iter().map(OptionId::as_str).collect();
        write!(f, "[{}]", names.join(" "))
    }
}
