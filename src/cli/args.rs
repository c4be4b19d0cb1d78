use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::directory::FilterCriteria;

#[derive(Parser, Debug)]
#[command(name = "alumni-portal")]
#[command(version)]
#[command(about = "Alumni directory and AI assistant in your terminal", long_about = None)]
pub struct Cli {
    /// Path to configuration file (applied on top of all other layers)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose output (logs to stderr for non-interactive commands)
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write default configuration files
    Init,
    /// Search and filter the alumni directory
    Directory {
        #[command(flatten)]
        filters: FilterArgs,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// List the available class, industry and location options
    Facets {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Ask the AI assistant a single question
    Ask {
        /// The message to send
        message: String,
    },
    /// Show connection stats and recent activity
    Dashboard {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Open the interactive terminal UI (default)
    Tui {
        /// Section to open first (dashboard, directory, assistant, profile)
        #[arg(long)]
        section: Option<String>,
    },
}

/// Directory filters; each one left out means "no constraint"
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Case-insensitive text matched against name, company, position and industry
    #[arg(short, long)]
    pub search: Option<String>,
    /// Graduation year, exact match
    #[arg(long)]
    pub class: Option<String>,
    /// Industry, exact match
    #[arg(long)]
    pub industry: Option<String>,
    /// Case-insensitive location fragment
    #[arg(long)]
    pub location: Option<String>,
}

impl From<FilterArgs> for FilterCriteria {
    fn from(args: FilterArgs) -> Self {
        FilterCriteria {
            search: args.search,
            class: args.class,
            industry: args.industry,
            location: args.location,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    Text,
    /// JSON structured output
    Json,
}
