//! `optgraph run`: apply toggles and show how the selection evolves.

use anyhow::{Context, Result};
use serde::Serialize;

use optgraph_core::{OptionId, Opts, ToggleReport};

use super::{bracketed, resolve_format, Format, RuleArgs};

/// Outcome of one requested toggle.
#[derive(Debug, Serialize)]
pub struct ToggleOutcome {
    pub option: String,
    pub report: ToggleReport,
    pub selected: Vec<OptionId>,
}

/// Apply `toggles` in order to a fresh selection over `args`.
pub fn apply(args: &RuleArgs, toggles: &[String]) -> Vec<ToggleOutcome> {
    let mut opts = Opts::new(args.to_rules());
    toggles
        .iter()
        .map(|option| {
            let report = opts.toggle(option.as_str());
            ToggleOutcome {
                option: option.clone(),
                report,
                selected: opts.selected_options(),
            }
        })
        .collect()
}

pub fn run(args: &RuleArgs, toggles: &[String], trace: bool, format: Option<&str>) -> Result<()> {
    let format = resolve_format(format)?;
    let rules = args.to_rules();
    if let Some(found) = rules.find_incoherence() {
        eprintln!("warning: {}", found.to_warning());
    }

    let outcomes = apply(args, toggles);

    match format {
        Format::Json => {
            let json = serde_json::to_string_pretty(&outcomes).context("encoding outcomes")?;
            println!("{json}");
        }
        Format::Human => {
            if outcomes.is_empty() {
                println!("{}", bracketed(&Opts::new(rules).selected_options()));
            }
            // Per-toggle warnings are already logged by the engine at `warn`.
            for outcome in &outcomes {
                println!("toggle {}: {}", outcome.option, bracketed(&outcome.selected));
                if trace {
                    for flip in &outcome.report.flips {
                        println!("  {flip}");
                    }
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::parse_pair;

    fn args(deps: &[&str], conflicts: &[&str]) -> RuleArgs {
        RuleArgs {
            deps: deps.iter().map(|d| parse_pair(d).unwrap()).collect(),
            conflicts: conflicts.iter().map(|c| parse_pair(c).unwrap()).collect(),
        }
    }

    #[test]
    fn toggles_apply_in_order() {
        let args = args(&["web:net"], &["net:offline"]);
        let toggles = vec!["net".to_string(), "offline".to_string()];
        let outcomes = apply(&args, &toggles);

        assert_eq!(bracketed(&outcomes[0].selected), "[web net]");
        // offline deselects net, which deselects web.
        assert_eq!(bracketed(&outcomes[1].selected), "[offline]");
        assert_eq!(outcomes[1].report.len(), 3);
    }

    #[test]
    fn unknown_toggle_is_reported() {
        let outcomes = apply(&args(&[], &[]), &["ghost".to_string()]);
        assert_eq!(outcomes[0].report.warnings.len(), 1);
        assert_eq!(bracketed(&outcomes[0].selected), "[ghost]");
    }

    #[test]
    fn run_all_formats() {
        let args = args(&["a:b"], &["a:b"]);
        let toggles = vec!["b".to_string()];
        run(&args, &toggles, true, None).unwrap();
        run(&args, &toggles, false, Some("json")).unwrap();
        run(&args, &[], false, None).unwrap();
    }
}
