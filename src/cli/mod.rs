/// CLI argument parsing and command handling - Gateway
mod args;
mod commands;

pub use args::{Cli, Commands, FilterArgs, OutputFormat};
pub use commands::{format_dashboard, format_directory, format_facets, handle_command, run_init};
