//! Cascade records produced by a toggle.
//!
//! Every flag change made while resolving one toggle request is recorded as a
//! [`Flip`] with the reason it happened, so callers can explain a resulting
//! selection.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Warning;
use crate::option::OptionId;

/// Why an option was flipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cause {
    /// The caller asked for this toggle.
    Requested,
    /// Propagated from an option this one depends on.
    Dependency { on: OptionId },
    /// Deselected because it was selected alongside a conflicting option.
    Conflict { with: OptionId },
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cause::Requested => write!(f, "requested"),
            Cause::Dependency { on } => write!(f, "depends on {on}"),
            Cause::Conflict { with } => write!(f, "conflicts with {with}"),
        }
    }
}

/// One flag change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flip {
    /// Position within the toggle, starting at 1.
    pub sequence: u64,
    /// The option that changed.
    pub option: OptionId,
    /// Flag value after the change.
    pub selected: bool,
    /// Why the change happened.
    pub cause: Cause,
    /// Which sweep made the change. 0 is the requested toggle; every conflict
    /// resolution opens a new one.
    pub sweep: usize,
}

impl fmt::Display for Flip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.selected { '+' } else { '-' };
        write!(f, "{:>3}. {mark}{} ({})", self.sequence, self.option, self.cause)
    }
}

/// Everything that happened while resolving one toggle request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleReport {
    pub flips: Vec<Flip>,
    pub warnings: Vec<Warning>,
}

impl ToggleReport {
    pub(crate) fn record(&mut self, option: &OptionId, selected: bool, cause: Cause, sweep: usize) {
        let sequence = self.flips.len() as u64 + 1;
        self.flips.push(Flip {
            sequence,
            option: option.clone(),
            selected,
            cause,
            sweep,
        });
    }

    /// Number of flag changes.
    pub fn len(&self) -> usize {
        self.flips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flips.is_empty()
    }

    /// How many times `option` changed during this toggle.
    pub fn flip_count(&self, option: &str) -> usize {
        self.flips
            .iter()
            .filter(|f| f.option.as_str() == option)
            .count()
    }

    /// Options in the order they were flipped.
    pub fn flipped(&self) -> impl Iterator<Item = &OptionId> {
        self.flips.iter().map(|f| &f.option)
    }

    /// Number of conflict resolutions the toggle triggered.
    pub fn conflict_sweeps(&self) -> usize {
        self.flips.iter().map(|f| f.sweep).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_numbers_flips() {
        let mut report = ToggleReport::default();
        report.record(&"a".into(), true, Cause::Requested, 0);
        report.record(&"b".into(), true, Cause::Dependency { on: "a".into() }, 0);
        assert_eq!(report.len(), 2);
        assert_eq!(report.flips[0].sequence, 1);
        assert_eq!(report.flips[1].sequence, 2);
        assert_eq!(report.flip_count("b"), 1);
        assert_eq!(report.conflict_sweeps(), 0);
    }

    #[test]
    fn flip_display() {
        let flip = Flip {
            sequence: 3,
            option: "c".into(),
            selected: false,
            cause: Cause::Conflict { with: "e".into() },
            sweep: 1,
        };
        assert_eq!(flip.to_string(), "  3. -c (conflicts with e)");
    }

    #[test]
    fn empty_report() {
        let report = ToggleReport::default();
        assert!(report.is_empty());
        assert_eq!(report.flipped().count(), 0);
    }
}
