//! optgraph CLI: drive the option rule engine from the command line.

mod commands;

use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::RuleArgs;

#[derive(Parser)]
#[command(name = "optgraph", version, about = "Option dependency and conflict engine")]
struct Cli {
    /// Log every flip the engine makes (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the reference scenario and print the selection after each step
    Demo {
        /// Output format (human, json)
        #[arg(long)]
        format: Option<String>,
    },
    /// Check whether a rule set is coherent
    Check {
        #[command(flatten)]
        rules: RuleArgs,
        /// Output format (human, json)
        #[arg(long)]
        format: Option<String>,
    },
    /// Apply toggles to a rule set and print the selection after each one
    Run {
        #[command(flatten)]
        rules: RuleArgs,
        /// Option to toggle (repeatable, applied in order)
        #[arg(long = "toggle", value_name = "OPTION")]
        toggles: Vec<String>,
        /// Print every flip with its cause
        #[arg(long)]
        trace: bool,
        /// Output format (human, json)
        #[arg(long)]
        format: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

/// Used when `RUST_LOG` is unset; engine warnings must reach stderr.
const DEFAULT_LOG: &str = "warn";
const VERBOSE_LOG: &str = "optgraph_core=debug";

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_LOG)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Demo { format } => commands::demo::run(format.as_deref()),
        Commands::Check { rules, format } => commands::check::run(&rules, format.as_deref()),
        Commands::Run {
            rules,
            toggles,
            trace,
            format,
        } => commands::toggle::run(&rules, &toggles, trace, format.as_deref()),
    }
}
