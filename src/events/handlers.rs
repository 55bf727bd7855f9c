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

use anyhow::Result;
use tracing::{info, warn};

use crate::{
    App, MainView,
    audio::status::PlaybackStatus,
    events::Transport,
    model::{Ayah, DailyAyah, SURAH_COUNT, Surah},
    tasks::AppTask,
};

pub(super) fn handle_set_main_view(app: &mut App, main_view: MainView) -> Result<()> {
    if main_view == MainView::Bookmarks {
        app.task_tx.send(AppTask::MeasureStorage)?;
        if app.reader.bookmarks_state.selected().is_none() && !app.bookmarks.entries().is_empty() {
            app.reader.bookmarks_state.select(Some(0));
        }
    }
    app.main_view = main_view;

    Ok(())
}

pub(super) fn handle_surahs_loaded(app: &mut App, surahs: Vec<Surah>) {
    app.reader.set_surahs(surahs);
}

pub(super) fn handle_surah_loaded(app: &mut App, number: u32, ayahs: Vec<Ayah>) {
    if app.reader.open_surah(number, ayahs) {
        if app.config.follow_playback {
            app.reader.follow(&app.playback);
        }
        app.main_view = MainView::Reader;
    }
}

pub(super) fn handle_daily_ayah_loaded(app: &mut App, daily: DailyAyah) {
    app.daily = Some(daily);
}

pub(super) fn handle_storage_measured(app: &mut App, bytes: u64) {
    app.storage_bytes = Some(bytes);
}

pub(super) fn handle_open_surah(app: &mut App, number: u32) -> Result<()> {
    if !(1..=SURAH_COUNT).contains(&number) {
        app.message = Some(format!("There is no surah {number}"));
        return Ok(());
    }

    app.task_tx.send(AppTask::LoadSurah(number))?;

    Ok(())
}

pub(super) fn handle_filter_surahs(app: &mut App, query: &str) {
    app.reader.set_filter(query);
    app.main_view = MainView::Surahs;

    if app.reader.visible_surahs().next().is_none() && !app.reader.surahs.is_empty() {
        app.message = Some(format!("No surah matches \"{query}\""));
    }
}

/// Plays the open chapter from the selected verse onwards.
pub(super) fn handle_play_selection(app: &mut App) -> Result<()> {
    match app.reader.queue_from_selection() {
        Some(queue) => {
            info!(
                tracks = queue.len(),
                start = queue.current().id(),
                "Playing chapter"
            );
            app.audio_player.play_queue(queue)?;
        }
        None => app.message = Some("Nothing to recite from here".to_string()),
    }

    Ok(())
}

pub(super) fn handle_play_daily_ayah(app: &mut App) -> Result<()> {
    let audio = app
        .daily
        .as_ref()
        .and_then(|daily| daily.arabic.audio.clone());

    match audio {
        Some(uri) => app.audio_player.play_single(&uri)?,
        None => app.message = Some("No recitation for the verse of the day".to_string()),
    }

    Ok(())
}

pub(super) fn handle_show_daily_ayah(app: &mut App) -> Result<()> {
    app.task_tx.send(AppTask::LoadDailyAyah)?;
    app.main_view = MainView::Surahs;

    Ok(())
}

pub(super) fn handle_toggle_bookmark(app: &mut App) {
    match app.main_view {
        MainView::Reader => {
            let Some((surah, ayah)) = app.reader.selected_ayah() else {
                return;
            };
            let reference = format!("{}:{}", surah.number, ayah.number_in_surah);
            let (surah, ayah) = (surah.clone(), ayah.clone());

            let added = app.bookmarks.toggle(&surah, &ayah);
            app.message = Some(if added {
                format!("Bookmarked {reference}")
            } else {
                format!("Removed bookmark {reference}")
            });
        }
        MainView::Bookmarks => {
            let Some(index) = app.reader.bookmarks_state.selected() else {
                return;
            };
            if let Some(removed) = app.bookmarks.remove_at(index) {
                app.message = Some(format!(
                    "Removed bookmark {}:{}",
                    removed.surah_number, removed.number_in_surah
                ));
            }
            let len = app.bookmarks.entries().len();
            app.reader
                .bookmarks_state
                .select((len > 0).then(|| index.min(len - 1)));
        }
        MainView::Surahs => {}
    }
}

pub(super) fn handle_transport(app: &mut App, transport: Transport) -> Result<()> {
    match transport {
        Transport::TogglePause => app.audio_player.toggle_pause(&app.playback),
        Transport::Next => app.audio_player.skip_next(),
        Transport::Previous => app.audio_player.skip_prev(),
        Transport::Stop => app.audio_player.stop(),
    }
}

pub(super) fn handle_playback_status_changed(app: &mut App, status: PlaybackStatus) {
    if app.config.follow_playback {
        app.reader.follow(&status);
    }
    app.playback = status;
}

pub(super) fn handle_error(app: &mut App, message: String) {
    warn!(%message, "Reported to user");
    app.message = Some(message);
}
