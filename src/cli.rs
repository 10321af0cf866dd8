use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "semplan")]
#[command(about = "Search and shopping campaign planner for keyword research output", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a campaign plan from collected keyword records
    Plan {
        /// Keyword records (JSON array, or YAML when the extension is .yaml/.yml)
        #[arg(short, long)]
        input: PathBuf,

        /// Configuration file (defaults to the nearest semplan.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the monthly search campaign budget
        #[arg(long = "search-budget")]
        search_budget: Option<f64>,

        /// Override the shopping budget
        #[arg(long = "shopping-budget")]
        shopping_budget: Option<f64>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Increase verbosity level (can be repeated: -v, -vv)
        /// -v: Show stage summaries
        /// -vv: Show per-stage debug information
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Json => crate::io::output::OutputFormat::Json,
            OutputFormat::Markdown => crate::io::output::OutputFormat::Markdown,
            OutputFormat::Terminal => crate::io::output::OutputFormat::Terminal,
        }
    }
}

impl Commands {
    /// Verbosity requested on the command line; zero for commands without `-v`.
    pub fn verbosity(&self) -> u8 {
        match self {
            Commands::Plan { verbosity, .. } => *verbosity,
            Commands::Init { .. } => 0,
        }
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
