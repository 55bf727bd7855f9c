// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! # Tartil.
//!
//! A terminal Quran reader with verse-by-verse recitation.
//!
//! This application coordinates a TUI frontend built with `ratatui` and a
//! background processing layer.
//!
//! It uses an event-driven architecture where:
//!
//! * The **Main Thread** manages the terminal lifecycle and UI rendering.
//! * **Background Workers** fetch text from the network or the offline cache
//!   and run the playback engine.
//! * **Event Loops** capture user input and system ticks to drive the UI
//!   state.
//!
//! ## Architecture
//!
//! The application follows a strict setup-run-teardown pattern to ensure the
//! terminal state is preserved even in the event of a crash. Communication
//! between the UI and background workers is handled via `std::sync::mpsc`
//! channels.

mod api;
mod audio;
mod bookmarks;
mod commander;
mod config;
mod db;
mod events;
mod logging;
mod model;
mod offline;
mod player;
mod reader;
mod render;
mod tasks;
mod theme;
mod util;

use std::{
    fs, io,
    path::Path,
    sync::mpsc::{self, Receiver, Sender},
    thread,
    time::Duration,
};

use anyhow::{Context, Result};
use crossterm::{
    event::{self},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::{
    audio::status::PlaybackStatus,
    bookmarks::Bookmarks,
    commander::Commander,
    config::AppConfig,
    events::{AppEvent, process_events},
    model::DailyAyah,
    offline::OfflineStore,
    player::AudioPlayer,
    reader::Reader,
    tasks::AppTask,
    theme::Theme,
};

const DATABASE_FILE: &str = "tartil.db";
const TICK_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MainView {
    Surahs,
    Reader,
    Bookmarks,
}

/// Application state.
pub(crate) struct App {
    pub(crate) config: AppConfig,

    pub(crate) theme: Theme,
    pub(crate) main_view: MainView,

    pub(crate) event_tx: Sender<AppEvent>,
    pub(crate) event_rx: Receiver<AppEvent>,

    pub(crate) task_tx: Sender<AppTask>,

    pub(crate) audio_player: AudioPlayer,

    pub(crate) reader: Reader,
    pub(crate) bookmarks: Bookmarks,
    pub(crate) commander: Commander,

    pub(crate) playback: PlaybackStatus,
    pub(crate) daily: Option<DailyAyah>,
    pub(crate) storage_bytes: Option<u64>,
    pub(crate) message: Option<String>,
}

impl App {
    /// Create a new instance of application state.
    pub(crate) fn new(
        config: AppConfig,
        bookmarks: Bookmarks,
        task_tx: Sender<AppTask>,
    ) -> Result<Self> {
        let (event_tx, event_rx) = mpsc::channel();

        let audio_player = AudioPlayer::new(config.load_timeout(), event_tx.clone())?;

        Ok(Self {
            config,
            theme: Theme::default(),
            main_view: MainView::Surahs,
            event_tx,
            event_rx,
            task_tx,
            audio_player,
            reader: Reader::new(),
            bookmarks,
            commander: Commander::new(),
            playback: PlaybackStatus::default(),
            daily: None,
            storage_bytes: None,
            message: None,
        })
    }
}

/// The entry point of the application.
///
/// Sets up the communication channels, initializes the application state,
/// manages the terminal lifecycle, and returns an error if any part of the
/// execution fails.
fn main() -> Result<()> {
    let config = config::load_config();

    let data_dir = config
        .data_dir()
        .context("No suitable data directory available")?;
    fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create {}", data_dir.display()))?;

    if let Err(e) = logging::init(&data_dir.join("logs"), &config.log_level) {
        eprintln!("Logging disabled: {e}");
    }
    info!(data_dir = %data_dir.display(), "Starting");

    let bookmarks = Bookmarks::open(open_database(&data_dir));

    let (task_tx, task_rx) = mpsc::channel();

    let mut app =
        App::new(config, bookmarks, task_tx).context("Failed to initialise application")?;

    let store = OfflineStore::new(&data_dir);
    tasks::spawn_task_worker(&app.config, store, task_rx, app.event_tx.clone())?;

    let mut terminal = setup_terminal(&app)?;
    let res = run(&mut terminal, &mut app);
    restore_terminal(&mut terminal);

    if let Err(e) = app.audio_player.shutdown() {
        warn!(error = %e, "Playback engine already gone");
    }
    info!("Exiting");

    res.context("Application error occurred")
}

/// Opens the bookmark database, carrying on without persistence if it cannot
/// be opened.
fn open_database(data_dir: &Path) -> Option<rusqlite::Connection> {
    let path = data_dir.join(DATABASE_FILE);
    match db::init_db(&path.to_string_lossy()) {
        Ok(conn) => Some(conn),
        Err(e) => {
            warn!(error = %e, "Bookmarks will not be saved");
            None
        }
    }
}

/// Prepares the terminal for the TUI application.
///
/// This function performs the following side effects:
/// * Sets the terminal background color based on the provided theme.
/// * Enables raw mode to capture all keyboard input.
/// * Switches the terminal to the alternate screen buffer.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate screen
/// cannot be entered.
fn setup_terminal(app: &App) -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    // Set the background of the entire terminal window, without this we'd get
    // a thin black outline
    if let Err(e) = util::term::set_terminal_bg(&mut io::stdout(), app.theme.background_colour) {
        warn!(error = %e, "Failed to set terminal background");
    }

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// This reverses the changes made by [`setup_terminal`], including disabling
/// raw mode, leaving the alternate screen, and resetting the background color.
/// It also ensures the cursor is made visible again.
///
/// This function is "best-effort" and does not return a result, as it is
/// typically called during cleanup.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    util::term::reset_terminal_bg(terminal.backend_mut()).ok();
    terminal.show_cursor().ok();
}

/// Starts the input and tick threads and enters the main event loop.
///
/// This function spawns two long-running background threads:
/// * An input thread to poll for system keyboard events.
/// * A tick thread to trigger periodic UI refreshes.
///
/// After spawning the workers, it hands control to [`process_events`] to
/// manage the UI and state updates.
///
/// # Errors
///
/// Returns an error if the event processing loop encounters an unrecoverable
/// application error.
fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Spawn a thread to translate raw key events to application events.
    let tx_keys = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(event::Event::Key(key)) => {
                    if tx_keys.send(AppEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    let message = format!("Terminal input failed: {e}");
                    let _ = tx_keys.send(AppEvent::FatalError(message));
                    break;
                }
            }
        }
    });

    // Spawn a thread to send a periodic tick application event, this is
    // effectively the minimum "frame rate" for rendering the TUI application.
    let tx_tick = app.event_tx.clone();
    thread::spawn(move || {
        while tx_tick.send(AppEvent::Tick).is_ok() {
            thread::sleep(TICK_INTERVAL);
        }
    });

    // Initial trigger to populate the chapter list
    app.task_tx.send(AppTask::LoadSurahs)?;

    // Application event loop, process events until the user quits
    process_events(terminal, app)
}
