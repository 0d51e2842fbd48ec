//! Main event loop for the terminal UI.
//!
//! Sets up the terminal in raw mode with an alternate screen, runs the
//! draw-and-poll loop, and restores the terminal on exit.

use std::io;

use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use limone_session::SessionManager;
use limone_store::{Database, KvStore, MenuStore};

use crate::app::{App, AppAction};
use crate::error::Result;
use crate::ui;

/// Run the terminal UI event loop.
///
/// Enables raw mode and switches to an alternate screen buffer so the
/// user's existing terminal content is preserved. The stores are
/// constructed by the caller and injected here; this function owns them
/// only for the duration of the session.
pub async fn run_tui(
    db: Database,
    kv: KvStore,
    store: MenuStore,
    session: SessionManager,
) -> Result<()> {
    // An existing session skips onboarding. A failed read is treated as
    // logged out; onboarding will rewrite the flag.
    let logged_in = match session.is_logged_in().await {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(%err, "failed to read login state, assuming logged out");
            false
        }
    };

    crossterm::terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(db, kv, store, session, logged_in);

    tracing::info!(logged_in, "TUI event loop started");

    let result = event_loop(&mut terminal, &mut app).await;

    // Restore the terminal regardless of whether the loop succeeded.
    app.abort_background_tasks();
    crossterm::terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("TUI event loop ended");

    result
}

/// The inner event loop, separated so terminal cleanup always runs.
async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Draw the current state.
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Poll for crossterm events with a short timeout so background
        // events are still picked up promptly.
        if event::poll(std::time::Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
            && key.kind == crossterm::event::KeyEventKind::Press
            && app.handle_key(key) == AppAction::Quit
        {
            break;
        }

        // Apply results from background storage tasks.
        app.poll_events();
    }

    Ok(())
}
