//! Non-fatal diagnostics raised by the rule engine.
//!
//! No engine operation fails. Anomalies are absorbed and surfaced as
//! [`Warning`]s so callers can log or display them.

use serde::{Deserialize, Serialize};

use crate::option::OptionId;

/// Advisory conditions noticed while building or toggling a selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum Warning {
    #[error("option {0} is not referenced by any rule; defaulted to unselected before toggling")]
    UnknownOption(OptionId),

    #[error("rule set is incoherent: {a} conflicts with {b} but they are linked by dependencies")]
    IncoherentRuleSet { a: OptionId, b: OptionId },

    #[error("conflict cascade repeats: deselecting {option} against {with} was already tried from the same selection; skipped")]
    RepeatingCascade { option: OptionId, with: OptionId },
}
