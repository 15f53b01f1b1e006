//! Terminal session driver.
//!
//! Waits on whichever comes first: a terminal event or the next scheduled
//! reveal. Elapsed wall time is fed to `AppState::advance` after every wake-up.

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures_util::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::app::AppState;
use crate::input::handle_key_event;
use crate::render::draw_ui;

/// Upper bound on a sleep when nothing is scheduled.
const IDLE_WAKEUP: Duration = Duration::from_millis(500);

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Runs the session until the visitor quits. The terminal is restored even
/// when the loop fails.
pub async fn run(mut app: AppState) -> Result<()> {
    let mut terminal = setup_terminal()?;
    info!(session_id = app.session_id(), "Session started");

    let result = drive(&mut terminal, &mut app).await;

    restore_terminal(&mut terminal)?;
    info!(session_id = app.session_id(), "Session ended");
    result
}

fn setup_terminal() -> Result<CrosstermTerminal> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")
}

fn restore_terminal(terminal: &mut CrosstermTerminal) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

async fn drive(terminal: &mut CrosstermTerminal, app: &mut AppState) -> Result<()> {
    let mut events = EventStream::new();
    let mut last = Instant::now();

    loop {
        terminal.draw(|f| draw_ui(f, app))?;
        if app.should_quit {
            return Ok(());
        }

        let wait = app.time_until_next().map_or(IDLE_WAKEUP, |d| d.min(IDLE_WAKEUP));
        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) => handle_key_event(key, app),
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e).context("Failed to read terminal event"),
                None => {
                    debug!("Terminal event stream closed");
                    return Ok(());
                }
            },
            _ = tokio::time::sleep(wait) => {}
        }

        let now = Instant::now();
        app.advance(now - last);
        last = now;
    }
}
