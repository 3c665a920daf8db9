//! CLI command implementations.

pub mod check;
pub mod demo;
pub mod toggle;

use anyhow::{bail, Result};
use clap::Args;
use optgraph_core::{OptionId, RuleSet};

/// Rules given on the command line.
#[derive(Debug, Args)]
pub struct RuleArgs {
    /// Dependency `A:B` (A requires B). Repeatable.
    #[arg(long = "dep", value_name = "A:B", value_parser = parse_pair)]
    pub deps: Vec<RulePair>,
    /// Conflict `A:B` (A and B exclude each other). Repeatable.
    #[arg(long = "conflict", value_name = "A:B", value_parser = parse_pair)]
    pub conflicts: Vec<RulePair>,
}

impl RuleArgs {
    /// Build a rule set, adding dependencies before conflicts.
    pub fn to_rules(&self) -> RuleSet {
        let mut rules = RuleSet::new();
        for pair in &self.deps {
            rules.add_dependency(&pair.left, &pair.right);
        }
        for pair in &self.conflicts {
            rules.add_conflict(&pair.left, &pair.right);
        }
        rules
    }
}

/// One `LEFT:RIGHT` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RulePair {
    pub left: OptionId,
    pub right: OptionId,
}

fn parse_pair(raw: &str) -> Result<RulePair, String> {
    let Some((left, right)) = raw.split_once(':') else {
        return Err(format!("expected LEFT:RIGHT, got '{raw}'"));
    };
    let (left, right) = (left.trim(), right.trim());
    if left.is_empty() || right.is_empty() {
        return Err(format!("both sides of '{raw}' must name an option"));
    }
    Ok(RulePair {
        left: left.into(),
        right: right.into(),
    })
}

/// Output format shared by every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Human,
    Json,
}

pub fn resolve_format(name: Option<&str>) -> Result<Format> {
    match name {
        Some("human") | None => Ok(Format::Human),
        Some("json") => Ok(Format::Json),
        Some(other) => bail!("unknown output format: '{other}'. Choose: human, json"),
    }
}

/// `[a b c]` rendering of a selection.
pub fn bracketed(selected: &[OptionId]) -> String {
    let names: Vec<&str> = selected.iter().map(OptionId::as_str).collect();
    format!("[{}]", names.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_pair() {
        let pair = parse_pair("net:tls").unwrap();
        assert_eq!(pair.left.as_str(), "net");
        assert_eq!(pair.right.as_str(), "tls");
        assert_eq!(parse_pair(" a : b ").unwrap().right.as_str(), "b");
    }

    #[test]
    fn parse_self_pair() {
        let pair = parse_pair("f:f").unwrap();
        assert_eq!(pair.left, pair.right);
    }

    #[test]
    fn parse_rejects_malformed() {
        assert!(parse_pair("ab").is_err());
        assert!(parse_pair(":b").is_err());
        assert!(parse_pair("a:").is_err());
    }

    #[test]
    fn rules_from_args() {
        let args = RuleArgs {
            deps: vec![parse_pair("a:b").unwrap()],
            conflicts: vec![parse_pair("b:c").unwrap()],
        };
        let rules = args.to_rules();
        assert_eq!(rules.len(), 3);
        assert_eq!(rules.dependency_count(), 1);
        assert_eq!(rules.conflict_count(), 1);
    }

    #[test]
    fn formats() {
        assert_eq!(resolve_format(None).unwrap(), Format::Human);
        assert_eq!(resolve_format(Some("json")).unwrap(), Format::Json);
        assert!(resolve_format(Some("yaml")).is_err());
    }

    #[test]
    fn bracketed_selection() {
        assert_eq!(bracketed(&[]), "[]");
        assert_eq!(bracketed(&["a".into(), "b".into()]), "[a b]");
    }
}
