//! Selection state: one flag per option, and the toggle cascade.
//!
//! The state owns only its flags. The rule set is passed in on every call so
//! the caller can keep adding rules between toggles; [`refresh`] brings the
//! flag map up to date with whatever the rule set knows about.
//!
//! A toggle runs as a *sweep*: the requested option flips, then its
//! dependents flip, then theirs, each option at most once per sweep. When a
//! flip leaves two conflicting options selected, the other side is toggled
//! in a fresh sweep with its own visited set, which runs to completion before
//! the outer sweep continues.
//!
//! [`refresh`]: SelectionState::refresh

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::cascade::{Cause, ToggleReport};
use crate::error::Warning;
use crate::option::OptionId;
use crate::rules::RuleSet;

/// Selected/unselected flag for every known option.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    flags: HashMap<OptionId, bool>,
    /// Options toggled directly without any rule mentioning them.
    strays: Vec<OptionId>,
}

/// Pending work inside a sweep.
enum Step {
    /// Flip `option` unless this sweep already did.
    Visit(OptionId, Cause),
    /// If `option` and `other` are both selected, toggle `other` off in a
    /// new sweep.
    Resolve { option: OptionId, other: OptionId },
}

struct Sweep {
    visited: HashSet<OptionId>,
    steps: Vec<Step>,
}

impl Sweep {
    fn start(option: OptionId, cause: Cause) -> Self {
        Self {
            visited: HashSet::new(),
            steps: vec![Step::Visit(option, cause)],
        }
    }
}

impl SelectionState {
    /// Create a state covering every option `rules` currently knows.
    pub fn new(rules: &RuleSet) -> Self {
        let mut state = Self::default();
        state.refresh(rules);
        state
    }

    /// Materialize a flag for every option that does not have one yet.
    ///
    /// A new option starts with the current flag of its first-declared
    /// dependency, or unselected when it has none. Only one hop is resolved:
    /// if that dependency has no flag yet either, the new option starts
    /// unselected. Options are visited in the rule set's first-seen order.
    pub fn refresh(&mut self, rules: &RuleSet) {
        for option in rules.options() {
            if self.flags.contains_key(option.as_str()) {
                continue;
            }
            let inherited = rules
                .parent_of(option.as_str())
                .and_then(|parent| self.flags.get(parent.as_str()).copied())
                .unwrap_or(false);
            trace!(option = %option, inherited, "materialized option");
            self.flags.insert(option.clone(), inherited);
        }
    }

    /// Flip `option` and propagate the change.
    ///
    /// Never fails. Toggling an option no rule mentions creates it unselected
    /// and then flips it, with a [`Warning::UnknownOption`] in the report.
    /// On incoherent rule sets a conflict resolution that would restart from
    /// flags it already started from is skipped and reported as
    /// [`Warning::RepeatingCascade`], so every toggle terminates.
    pub fn toggle(&mut self, rules: &RuleSet, option: impl Into<OptionId>) -> ToggleReport {
        let option = option.into();
        let mut report = ToggleReport::default();

        self.refresh(rules);
        if !self.flags.contains_key(option.as_str()) {
            warn!(option = %option, "toggling an option no rule mentions");
            report.warnings.push(Warning::UnknownOption(option.clone()));
            self.flags.insert(option.clone(), false);
            self.strays.push(option.clone());
        }

        let mut sweeps = vec![Sweep::start(option, Cause::Requested)];
        // Conflict resolutions already opened, keyed by the flags they started
        // from. Reopening one from the same flags would replay it forever on
        // some incoherent rule sets.
        let mut opened: HashSet<(Vec<bool>, OptionId, OptionId)> = HashSet::new();

        while let Some(depth) = sweeps.len().checked_sub(1) {
            let sweep = &mut sweeps[depth];
            let Some(step) = sweep.steps.pop() else {
                sweeps.pop();
                continue;
            };

            match step {
                Step::Visit(option, cause) => {
                    if !sweep.visited.insert(option.clone()) {
                        continue;
                    }

                    let selected = self.flip(&option);
                    debug!(option = %option, selected, cause = %cause, sweep = depth, "flipped");
                    report.record(&option, selected, cause, depth);

                    // Stack order: conflicts resolve first, in list order,
                    // then dependents, in list order.
                    for dependent in rules.dependents_of(option.as_str()).iter().rev() {
                        sweep.steps.push(Step::Visit(
                            dependent.clone(),
                            Cause::Dependency { on: option.clone() },
                        ));
                    }
                    for other in rules.conflicts_of(option.as_str()).iter().rev() {
                        sweep.steps.push(Step::Resolve {
                            option: option.clone(),
                            other: other.clone(),
                        });
                    }
                }
                Step::Resolve { option, other } => {
                    if !(self.is_selected(option.as_str()) && self.is_selected(other.as_str())) {
                        continue;
                    }
                    self.refresh(rules);
                    let key = (self.snapshot(rules), option.clone(), other.clone());
                    if !opened.insert(key) {
                        warn!(option = %other, with = %option, "conflict cascade repeats; resolution skipped");
                        let warning = Warning::RepeatingCascade {
                            option: other,
                            with: option,
                        };
                        if !report.warnings.contains(&warning) {
                            report.warnings.push(warning);
                        }
                        continue;
                    }
                    sweeps.push(Sweep::start(other, Cause::Conflict { with: option }));
                }
            }
        }

        report
    }

    /// Flags of every rule-known option, in first-seen order.
    fn snapshot(&self, rules: &RuleSet) -> Vec<bool> {
        rules
            .options()
            .map(|option| self.is_selected(option.as_str()))
            .collect()
    }

    fn flip(&mut self, option: &OptionId) -> bool {
        let flag = self.flags.entry(option.clone()).or_insert(false);
        *flag = !*flag;
        *flag
    }

    /// Every selected option: known options in first-seen order, then
    /// directly toggled unknown ones in the order they were first toggled.
    pub fn selected_options(&mut self, rules: &RuleSet) -> Vec<OptionId> {
        self.refresh(rules);
        rules
            .options()
            .chain(self.strays.iter().filter(|s| !rules.contains(s.as_str())))
            .filter(|option| self.is_selected(option.as_str()))
            .cloned()
            .collect()
    }

    /// Current flag of `option`; unknown options read as unselected.
    pub fn is_selected(&self, option: &str) -> bool {
        self.flags.get(option).copied().unwrap_or(false)
    }

    /// Read-only view of every materialized flag.
    pub fn flags(&self) -> &HashMap<OptionId, bool> {
        &self.flags
    }

    /// Number of materialized flags.
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}
