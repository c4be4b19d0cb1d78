use anyhow::{bail, Result};
use colored::Colorize;
use serde::Serialize;

use crate::{
    app::init_config,
    chat::{RejectReason, SubmitOutcome},
    directory::{AlumniRecord, DirectoryView, FacetField, Facets, FilterCriteria},
    portal::{ActivityItem, DashboardStats, Portal},
};

use super::{Commands, OutputFormat};

/// Write default configuration files
pub fn run_init() -> Result<()> {
    println!("Initializing alumni portal configuration...");
    for path in init_config()? {
        println!("  • {}", path.display().to_string().green());
    }
    println!("Configuration initialized successfully!");
    Ok(())
}

/// Handle a non-interactive subcommand against a started portal.
/// Returns `false` when the command is the interactive UI.
pub async fn handle_command(
    command: &Commands,
    portal: &Portal,
    show_activity: bool,
) -> Result<bool> {
    match command {
        Commands::Init => run_init()?,
        Commands::Directory { filters, format } => {
            let criteria = FilterCriteria::from(filters.clone());
            let view = portal.directory().view(&criteria);
            println!("{}", format_directory(&view, *format)?);
        }
        Commands::Facets { format } => {
            println!("{}", format_facets(portal.directory().facets(), *format)?);
        }
        Commands::Ask { message } => ask(portal, message).await?,
        Commands::Dashboard { format } => {
            let activity = if show_activity {
                portal.activity()
            } else {
                Vec::new()
            };
            println!(
                "{}",
                format_dashboard(&portal.profile().name, portal.stats(), &activity, *format)?
            );
        }
        Commands::Tui { .. } => return Ok(false),
    }
    Ok(true)
}

/// One-shot chat through the same controller the UI uses
async fn ask(portal: &Portal, message: &str) -> Result<()> {
    let chat = portal.chat();
    let outcome = chat.submit(message).await;
    match outcome {
        SubmitOutcome::Rejected(RejectReason::EmptyMessage) => bail!("message is empty"),
        SubmitOutcome::Rejected(RejectReason::AlreadySending) => {
            bail!("another message is already in flight")
        }
        SubmitOutcome::Replied | SubmitOutcome::Failed => {
            let transcript = chat.transcript();
            let Some(reply) = transcript.last() else {
                bail!("assistant produced no reply");
            };
            if reply.is_error {
                eprintln!("{}", reply.text.red());
                bail!("assistant request failed");
            }
            println!("{}", reply.text);
            Ok(())
        }
    }
}

fn record_line(alumni: &AlumniRecord) -> String {
    format!(
        "{} {}  {}\n    {} at {} · {} · {}\n    {} · {}",
        format!("[{}]", alumni.initials).cyan(),
        alumni.name.bold(),
        format!("Class of {}", alumni.class).dimmed(),
        alumni.position,
        alumni.company,
        alumni.industry,
        alumni.location,
        alumni.email,
        alumni.contact_handle.dimmed(),
    )
}

/// Directory listing; empty views print their message
pub fn format_directory(view: &DirectoryView, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(view.records())?),
        OutputFormat::Text => {
            if let Some(message) = view.empty_message() {
                return Ok(message.yellow().to_string());
            }
            let records = view.records();
            let mut output = format!("{} alumni\n", records.len()).bold().to_string();
            for alumni in records {
                output.push('\n');
                output.push_str(&record_line(alumni));
                output.push('\n');
            }
            Ok(output.trim_end().to_string())
        }
    }
}

pub fn format_facets(facets: &Facets, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(facets)?),
        OutputFormat::Text => {
            let mut output = String::new();
            for field in FacetField::ALL {
                output.push_str(&format!("{}:\n", field.label().bold()));
                for option in facets.options(field) {
                    output.push_str(&format!("  • {}\n", option));
                }
            }
            Ok(output.trim_end().to_string())
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DashboardReport<'a> {
    name: &'a str,
    stats: DashboardStats,
    activity: &'a [ActivityItem],
}

pub fn format_dashboard(
    name: &str,
    stats: DashboardStats,
    activity: &[ActivityItem],
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&DashboardReport {
            name,
            stats,
            activity,
        })?),
        OutputFormat::Text => {
            let mut output = format!("Welcome back, {}!\n\n", name.bold());
            output.push_str(&format!(
                "  {} Connections    {} Upcoming Events\n",
                stats.connections.to_string().cyan().bold(),
                stats.upcoming_events.to_string().yellow().bold()
            ));
            if !activity.is_empty() {
                output.push_str(&format!("\n{}\n", "Recent Activity".bold()));
                for item in activity {
                    output.push_str(&format!(
                        "  {} {}  {}\n",
                        item.kind.icon(),
                        item.text,
                        item.time_ago.dimmed()
                    ));
                }
            }
            Ok(output.trim_end().to_string())
        }
    }
}
