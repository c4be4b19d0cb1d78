use anyhow::{Context, Result};
use colored::Colorize;
use std::time::Duration;

use crate::{
    app::{get_data_dir, load_config, Config},
    cli::{handle_command, run_init, Cli, Commands},
    constants::{INIT_FAILURE_MESSAGE, LOG_FILE_NAME},
    portal::Portal,
    tui::{run_notice, run_ui, App, Section},
    utils::{init_logger, log_error, log_info, log_progress, log_warn, LogTarget},
};

/// Main runtime orchestrator
pub struct Orchestrator {
    cli: Cli,
    config: Config,
}

impl Orchestrator {
    /// Create a new orchestrator from CLI args
    pub fn new(cli: Cli) -> Result<Self> {
        let config = load_config(cli.config.as_deref())?;
        Ok(Self { cli, config })
    }

    fn is_interactive(&self) -> bool {
        matches!(self.cli.command, None | Some(Commands::Tui { .. }))
    }

    /// The terminal UI owns the screen, so it always logs to a file.
    /// Other commands log to stderr only when asked to.
    fn init_logging(&self) -> Result<()> {
        let level = if self.cli.verbose { "debug" } else { "info" };
        if self.is_interactive() {
            let log_path = get_data_dir()?.join(LOG_FILE_NAME);
            init_logger(LogTarget::File(&log_path), level)
        } else if self.cli.verbose {
            init_logger(LogTarget::Stderr, level)
        } else {
            Ok(())
        }
    }

    /// Run the orchestrator
    pub async fn run(self) -> Result<()> {
        if matches!(self.cli.command, Some(Commands::Init)) {
            return run_init();
        }

        self.init_logging().context("Failed to initialize logging")?;

        let show_progress = self.cli.verbose || self.is_interactive();
        if show_progress {
            log_progress(1, 2, "Loading alumni directory");
        }
        let portal = match Portal::from_config(&self.config).await {
            Ok(portal) => portal,
            Err(e) => {
                log_error("❌", format!("Initialization failed: {}", e));
                if self.is_interactive() {
                    run_notice(INIT_FAILURE_MESSAGE)?;
                } else {
                    eprintln!("{}", INIT_FAILURE_MESSAGE.red());
                    eprintln!("   {}", e);
                }
                std::process::exit(1);
            }
        };
        if show_progress {
            log_progress(2, 2, format!("Loaded {} alumni", portal.directory().len()));
        }

        if let Some(command) = &self.cli.command {
            if handle_command(command, &portal, self.config.ui.show_activity).await? {
                return Ok(());
            }
        }

        self.run_interactive(portal).await
    }

    async fn run_interactive(&self, portal: Portal) -> Result<()> {
        let mut app = App::new(portal, &self.config.ui);

        if let Some(Commands::Tui {
            section: Some(name),
        }) = &self.cli.command
        {
            match Section::from_str(name) {
                Some(section) => app.section = section,
                None => log_warn("⚠️", format!("Unknown section '{}', opening dashboard", name)),
            }
        }

        log_info("🎓", format!("Starting terminal UI ({})", app.portal.source_label()));
        let result = run_ui(app, Duration::from_millis(self.config.ui.tick_ms)).await;
        log_info("👋", "Terminal UI closed");
        result
    }
}
