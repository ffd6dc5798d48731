//! prephub - Interview Prep Question Browser
//!
//! Terminal client for browsing interview-preparation questions served by
//! a remote HTTP API. Configuration comes from `PREPHUB_*` environment
//! variables; logs are written to a file while the UI owns the terminal.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use prephub::application::{App, AppMode};
use prephub::infrastructure::{init_logging, Config, HttpQuestionService, LogSettings};
use prephub::presentation::{render_ui, InputHandler};

/// How long to wait for a key before checking for fetched data again.
const TICK: Duration = Duration::from_millis(100);

/// Entry point for the prephub terminal client.
///
/// Loads configuration, installs logging, sets up the terminal interface,
/// and runs the main event loop until the user quits.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the log file cannot be
/// opened, or terminal setup fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(&LogSettings::load())?;
    let config = Config::load()?;
    tracing::info!(backend = %config.backend_url, timeout = ?config.request_timeout, "starting");

    let service = HttpQuestionService::new(&config)?;
    let mut app = App::new(Arc::new(service));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "terminal error");
        println!("{err:?}");
    }

    tracing::info!("exiting");
    Ok(())
}

/// Main application event loop.
///
/// Applies fetched data, redraws, and waits up to one tick for a key.
/// Continues running until the user presses 'q' in normal mode.
///
/// # Errors
///
/// Returns an IO error if terminal operations fail.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        app.pump();
        terminal.draw(|f| render_ui(f, app))?;

        if !event::poll(TICK)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('q') if matches!(app.mode, AppMode::Normal) => return Ok(()),
                    _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
                }
            }
        }
    }
}
