//! `optgraph check`: report whether a rule set is coherent.

use anyhow::{bail, Result};

use optgraph_core::RuleSet;

use super::{resolve_format, Format, RuleArgs};

pub fn run(args: &RuleArgs, format: Option<&str>) -> Result<()> {
    let format = resolve_format(format)?;
    check(&args.to_rules(), format)
}

fn check(rules: &RuleSet, format: Format) -> Result<()> {
    let found = rules.find_incoherence();

    match format {
        Format::Json => {
            let json = serde_json::json!({
                "coherent": found.is_none(),
                "options": rules.len(),
                "dependencies": rules.dependency_count(),
                "conflicts": rules.conflict_count(),
                "incoherence": &found,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        Format::Human => {
            println!(
                "{} options, {} dependencies, {} conflicts",
                rules.len(),
                rules.dependency_count(),
                rules.conflict_count()
            );
            if found.is_none() {
                println!("coherent");
            }
        }
    }

    if let Some(found) = found {
        bail!("incoherent rule set: {found}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coherent_rules_pass() {
        let mut rules = RuleSet::new();
        rules.add_dependency("a", "b");
        rules.add_conflict("a", "c");
        check(&rules, Format::Human).unwrap();
        check(&rules, Format::Json).unwrap();
    }

    #[test]
    fn incoherent_rules_fail_with_chain() {
        let mut rules = RuleSet::new();
        rules.add_dependency("a", "b");
        rules.add_dependency("b", "c");
        rules.add_conflict("a", "c");
        let err = check(&rules, Format::Human).unwrap_err();
        let text = err.to_string();
        assert!(text.contains("a conflicts with c"), "{text}");
        assert!(text.contains("a - b - c"), "{text}");
    }
}
