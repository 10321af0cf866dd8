use anyhow::Result;
use clap::Parser;
use semplan::cli::{Cli, Commands};
use semplan::commands::{self, PlanConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.command.verbosity());

    match cli.command {
        Commands::Plan {
            input,
            config,
            search_budget,
            shopping_budget,
            format,
            output,
            verbosity: _,
        } => commands::handle_plan(PlanConfig {
            input,
            config,
            search_budget,
            shopping_budget,
            format,
            output,
        }),
        Commands::Init { force } => commands::init_config(force),
    }
}

/// Logs go to stderr so stdout stays clean for the plan itself.
/// `RUST_LOG` wins over `-v` when set.
fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
