//! `optgraph demo`: walk through the reference scenario.

use anyhow::Result;
use serde::Serialize;

use optgraph_core::{OptionId, Opts, RuleSet};

use super::{bracketed, resolve_format, Format};

/// Selection after one step of the scenario.
#[derive(Debug, Serialize)]
pub struct DemoStep {
    pub step: String,
    pub selected: Vec<OptionId>,
}

/// Rules: a -> b -> c -> a, d -> e, c conflicts with e. Then toggle a,
/// add f -> f and toggle f, toggle e.
pub fn scenario() -> Vec<DemoStep> {
    let mut rules = RuleSet::new();
    rules.add_dependency("a", "b");
    rules.add_dependency("b", "c");
    rules.add_dependency("c", "a");
    rules.add_dependency("d", "e");
    rules.add_conflict("c", "e");

    let mut opts = Opts::new(rules);
    let mut steps = vec![DemoStep {
        step: "start".into(),
        selected: opts.selected_options(),
    }];

    let mut toggle = |opts: &mut Opts, option: &str| {
        opts.toggle(option);
        steps.push(DemoStep {
            step: format!("toggle {option}"),
            selected: opts.selected_options(),
        });
    };

    toggle(&mut opts, "a");
    opts.add_dependency("f", "f");
    toggle(&mut opts, "f");
    toggle(&mut opts, "e");

    steps
}

pub fn run(format: Option<&str>) -> Result<()> {
    let format = resolve_format(format)?;
    let steps = scenario();

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&steps)?),
        Format::Human => {
            for step in &steps {
                println!("{:<10} {}", step.step, bracketed(&step.selected));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_steps() {
        let steps = scenario();
        let rendered: Vec<String> = steps.iter().map(|s| bracketed(&s.selected)).collect();
        assert_eq!(rendered, ["[]", "[a b c]", "[a b c f]", "[d e f]"]);
        assert_eq!(steps[3].step, "toggle e");
    }

    #[test]
    fn demo_runs() {
        run(None).unwrap();
        run(Some("json")).unwrap();
        assert!(run(Some("xml")).is_err());
    }
}
