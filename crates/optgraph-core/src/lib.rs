//! Rule engine for binary options linked by dependencies and conflicts.
//!
//! A [`RuleSet`] records which options depend on which and which options
//! exclude each other, and can tell whether those rules contradict each
//! other (a conflicting pair that is also linked through dependencies).
//! A [`SelectionState`] holds one flag per option and propagates every
//! toggle through dependents and conflicts. [`Opts`] bundles the two.
//!
//! No operation fails. Anomalies such as toggling an option no rule
//! mentions are reported as [`Warning`]s.

pub mod cascade;
pub mod coherence;
pub mod error;
pub mod option;
pub mod opts;
pub mod rules;
pub mod selection;

pub use cascade::{Cause, Flip, ToggleReport};
pub use coherence::{dependency_path, find_incoherence, is_coherent, Incoherence};
pub use error::Warning;
pub use option::OptionId;
pub use opts::Opts;
pub use rules::RuleSet;
pub use selection::SelectionState;
