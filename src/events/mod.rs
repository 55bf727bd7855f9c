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

//! Application logic, event handling, and command dispatching.
//!
//! This module acts as the central hub for the "Controller" logic of the
//! application. It organizes how various inputs are translated into internal
//! state changes.
//!
//! # Organization
//!
//! * [`handlers`]: One function per [`AppEvent`] variant.
//! * [`key_handlers`]: Keyboard routing for each view.

mod handlers;
mod key_handlers;

use std::io::Stdout;

use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{Terminal, prelude::CrosstermBackend};
use tracing::error;

use crate::{
    App, MainView,
    audio::status::PlaybackStatus,
    model::{Ayah, DailyAyah, Surah},
    render::draw,
};
use handlers::*;
use key_handlers::process_key_event;

/// Playback controls that can be issued from keys or the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Transport {
    TogglePause,
    Next,
    Previous,
    Stop,
}

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),

    SetMainView(MainView),

    SurahsLoaded(Vec<Surah>),
    SurahLoaded { surah: u32, ayahs: Vec<Ayah> },
    DailyAyahLoaded(DailyAyah),
    StorageMeasured(u64),

    OpenSurah(u32),
    FilterSurahs(String),
    PlaySelection,
    PlayDailyAyah,
    ShowDailyAyah,
    ToggleBookmark,
    Transport(Transport),

    PlaybackStatusChanged(PlaybackStatus),

    Tick,

    ExitApplication,

    Error(String),
    FatalError(String),
}

/// Runs the main application loop, handling events and rendering the UI in the
/// terminal.
///
/// This function loops until a 'quit' event is received or the event channel
/// is closed.
pub(crate) fn process_events(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    terminal.draw(|f| draw(f, app))?;

    while let Ok(event) = app.event_rx.recv() {
        match event {
            AppEvent::ExitApplication => break,
            AppEvent::FatalError(message) => {
                error!(%message, "Fatal error");
                anyhow::bail!(message);
            }
            event => handle_event(app, event)?,
        }

        terminal.draw(|f| draw(f, app))?;
    }
    Ok(())
}

/// Applies a single event to the application state.
pub(crate) fn handle_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => process_key_event(app, key)?,
        AppEvent::SetMainView(view) => handle_set_main_view(app, view)?,
        AppEvent::SurahsLoaded(surahs) => handle_surahs_loaded(app, surahs),
        AppEvent::SurahLoaded { surah, ayahs } => handle_surah_loaded(app, surah, ayahs),
        AppEvent::DailyAyahLoaded(daily) => handle_daily_ayah_loaded(app, daily),
        AppEvent::StorageMeasured(bytes) => handle_storage_measured(app, bytes),
        AppEvent::OpenSurah(number) => handle_open_surah(app, number)?,
        AppEvent::FilterSurahs(query) => handle_filter_surahs(app, &query),
        AppEvent::PlaySelection => handle_play_selection(app)?,
        AppEvent::PlayDailyAyah => handle_play_daily_ayah(app)?,
        AppEvent::ShowDailyAyah => handle_show_daily_ayah(app)?,
        AppEvent::ToggleBookmark => handle_toggle_bookmark(app),
        AppEvent::Transport(transport) => handle_transport(app, transport)?,
        AppEvent::PlaybackStatusChanged(status) => handle_playback_status_changed(app, status),
        AppEvent::Error(message) => handle_error(app, message),
        AppEvent::Tick | AppEvent::ExitApplication | AppEvent::FatalError(_) => {}
    }

    Ok(())
}
