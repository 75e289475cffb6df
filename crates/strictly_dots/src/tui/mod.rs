//! Terminal UI for Strictly Dots.

mod app;
mod input;
mod ui;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info, instrument, warn};

use crate::config::DotsConfig;
use crate::db::{KeyValueStore, MemoryStore, SqliteStore};
use crate::scheduler::ThinkDelay;
use crate::session::{ComputerTurn, GameSession};

pub use app::{App, Flow};

type Tty = Terminal<CrosstermBackend<io::Stdout>>;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Log file used while the terminal is in raw mode.
pub const LOG_FILE: &str = "strictly_dots.log";

/// Runs the interactive game until the user quits.
pub async fn run_tui(config: DotsConfig) -> Result<()> {
    // Log to a file so output doesn't tear the screen
    let log_file = std::fs::File::create(LOG_FILE)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(?config, "Starting Strictly Dots TUI");

    let store = open_store(config.db_path());
    let session = GameSession::new(*config.mode(), *config.grid_size(), store);
    let (min, max) = config.think_range();
    let (mut app, mut turns) = App::new(session, ThinkDelay::new(min, max), *config.seed());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let res = run_app(&mut terminal, &mut app, &mut turns).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    info!("Strictly Dots TUI exited");
    res
}

/// Opens the SQLite store, falling back to memory so play never depends on disk.
fn open_store(db_path: &str) -> Box<dyn KeyValueStore + Send> {
    match SqliteStore::open(db_path) {
        Ok(store) => Box::new(store),
        Err(e) => {
            warn!(error = %e, "Stats database unavailable, stats will not persist");
            Box::new(MemoryStore::new())
        }
    }
}

#[instrument(skip_all)]
async fn run_app<S: KeyValueStore>(
    terminal: &mut Tty,
    app: &mut App<S>,
    turns: &mut mpsc::UnboundedReceiver<ComputerTurn>,
) -> Result<()> {
    loop {
        app.sync_computer();
        terminal.draw(|frame| ui::draw(frame, app))?;

        while let Ok(ticket) = turns.try_recv() {
            app.on_computer_ready(ticket);
        }

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key(key.code) == Flow::Quit {
                    info!("User quit");
                    return Ok(());
                }
            }
        }

        // Let the timer tasks run between polls.
        tokio::task::yield_now().await;
    }
}
