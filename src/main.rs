//! Headlines - Terminal News Demo
//!
//! A home page with a refreshable timestamp, a topic picker, a gated TV Guide
//! and a simulated breaking-news error, plus a placeholder content page per
//! topic. Works with the keyboard or the mouse.

use std::io;
use std::path::PathBuf;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::{error, info};

use headlines::application::ViewStateController;
use headlines::domain::{AppResult, Topic};
use headlines::infrastructure::{init_logging, Settings, SettingsRepository};
use headlines::presentation::{render_ui, InputHandler, InputOutcome, UiSession};

#[derive(Parser)]
#[command(name = "headlines", about = "Terminal news demo with a home page and content pages")]
struct Cli {
    /// JSON settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// How long the loader stays up after a refresh
    #[arg(long)]
    refresh_delay_ms: Option<u64>,

    /// Topic selected at startup, e.g. "Technology" or "tv-guide"
    #[arg(short, long)]
    topic: Option<Topic>,

    /// File to write logs to
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Write the resolved settings to this file and exit
    #[arg(long)]
    write_config: Option<PathBuf>,
}

impl Cli {
    /// Loads the settings file, if any, then applies command-line overrides.
    fn resolve_settings(&self) -> AppResult<Settings> {
        let mut settings = match &self.config {
            Some(path) => SettingsRepository::load(path)?,
            None => Settings::default(),
        };
        if let Some(delay) = self.refresh_delay_ms {
            settings.refresh_delay_ms = delay;
        }
        if let Some(topic) = self.topic {
            settings.initial_topic = topic;
        }
        if let Some(path) = &self.log_file {
            settings.log_file = Some(path.clone());
        }
        Ok(settings)
    }
}

/// Entry point for the headlines terminal app.
///
/// Resolves settings, sets up logging and the terminal, and runs the event
/// loop until the user quits. The terminal is restored before any error
/// from the loop is reported.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let settings = cli.resolve_settings()?;

    if let Some(path) = &cli.write_config {
        SettingsRepository::save(&settings, path)?;
        println!("Wrote settings to {}", path.display());
        return Ok(());
    }

    init_logging(settings.log_file.as_deref())?;
    info!(?settings, "starting headlines");

    let controller = ViewStateController::new(settings.initial_topic, settings.refresh_delay())?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &controller).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(%err, "event loop failed");
        println!("{err:?}");
    }

    Ok(())
}

/// Main application event loop.
///
/// Redraws whenever the view state changes (including refresh completions
/// fired by the timer) or a terminal event arrives.
///
/// # Errors
///
/// Returns an IO error if terminal operations fail.
async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    controller: &ViewStateController,
) -> io::Result<()> {
    let mut session = UiSession::default();
    let mut states = controller.subscribe();
    let mut events = EventStream::new();

    loop {
        let state = states.borrow_and_update().clone();
        terminal.draw(|f| render_ui(f, &state, &mut session))?;

        tokio::select! {
            changed = states.changed() => {
                if changed.is_err() {
                    return Ok(());
                }
            }
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    let outcome = InputHandler::handle_key_event(
                        controller,
                        &mut session,
                        key.code,
                        key.modifiers,
                    );
                    if outcome == InputOutcome::Quit {
                        info!("quit requested");
                        return Ok(());
                    }
                }
                Some(Ok(Event::Mouse(mouse))) => {
                    InputHandler::handle_mouse_event(controller, &mut session, mouse);
                }
                Some(Ok(_)) => {}
                Some(Err(err)) => return Err(err),
                None => return Ok(()),
            },
        }
    }
}
