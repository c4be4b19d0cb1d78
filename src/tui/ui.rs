use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, error};

use super::app::{App, ChatRequest};
use super::input::map_key;
use super::render::{render_notice, render_ui};
use crate::chat::{ChatController, RejectReason, SubmitOutcome};

type PortalTerminal = Terminal<CrosstermBackend<io::Stdout>>;

fn ensure_tty() -> Result<()> {
    if !crossterm::tty::IsTty::is_tty(&io::stdout()) {
        eprintln!("❌ The alumni portal requires an interactive terminal.");
        eprintln!("   Use a subcommand such as `alumni-portal directory` for scripted use.");
        return Err(anyhow::anyhow!("No interactive terminal available"));
    }
    Ok(())
}

fn setup_terminal() -> Result<PortalTerminal> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut PortalTerminal) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the terminal UI until the user quits
pub async fn run_ui(mut app: App, tick: Duration) -> Result<()> {
    ensure_tty()?;
    let mut terminal = setup_terminal()?;

    let res = run_app(&mut terminal, &mut app, tick).await;

    restore_terminal(&mut terminal)?;

    if let Err(err) = &res {
        error!(error = %err, "terminal UI stopped with an error");
    }
    res
}

/// Hand a submission to a background task so the screen keeps redrawing
/// (and shows the typing indicator) while the assistant answers.
fn spawn_chat(chat: ChatController, request: ChatRequest) {
    tokio::spawn(async move {
        let outcome = match request {
            ChatRequest::Text(text) => {
                let outcome = chat.submit(&text).await;
                // Lost the race for the gate: hand the draft back unless a new one was started
                if outcome == SubmitOutcome::Rejected(RejectReason::AlreadySending)
                    && chat.pending_input().is_empty()
                {
                    chat.set_input(text);
                }
                outcome
            }
            ChatRequest::Suggestion(text) => chat.send_suggestion(&text).await,
        };
        debug!(?outcome, "chat submission finished");
    });
}

async fn run_app(terminal: &mut PortalTerminal, app: &mut App, tick: Duration) -> Result<()> {
    while app.running {
        terminal.draw(|f| render_ui(f, app))?;

        if event::poll(tick)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let action = map_key(key, app.section);
                    if let Some(request) = app.apply(action, Instant::now()) {
                        spawn_chat(app.portal.chat().clone(), request);
                    }
                }
            }
        }

        app.tick(Instant::now());

        // Let spawned submissions make progress between frames
        tokio::task::yield_now().await;
    }

    Ok(())
}

fn notice_loop(terminal: &mut PortalTerminal, message: &str) -> Result<()> {
    loop {
        terminal.draw(|f| render_notice(f, message))?;
        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(());
                }
            }
        }
    }
}

/// Show a blocking notice until any key is pressed
pub fn run_notice(message: &str) -> Result<()> {
    ensure_tty()?;
    let mut terminal = setup_terminal()?;
    let res = notice_loop(&mut terminal, message);
    restore_terminal(&mut terminal)?;
    res
}
