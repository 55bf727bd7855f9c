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
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};

use crate::{
    App, MainView,
    events::{AppEvent, Transport},
    tasks::AppTask,
};

/// Maps keyboard input to application actions and playback commands.
///
/// This function acts as the primary input router for the TUI, translating
/// low-level [`KeyEvent`]s into high-level domain logic. It handles:
///
/// * **Command Line**: While active, the command line consumes every key.
/// * **Application Control**: Life-cycle events like exiting the program.
/// * **Navigation**: Moving through chapters, verses and bookmarks, and
///   clearing the chapter search.
/// * **Playback**: Controlling recitation (play, pause, skip, stop).
///
/// # Errors
///
/// Returns an error if a command fails to send to a background worker or if
/// a requested action cannot be executed.
pub(super) fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.kind != KeyEventKind::Press {
        return Ok(());
    }

    if app.commander.handle_event(&Event::Key(key), &app.event_tx) {
        return Ok(());
    }

    app.message = None;

    process_global_key_event(app, key)
}

fn process_global_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('q') => app.event_tx.send(AppEvent::ExitApplication)?,

        KeyCode::Char('1') => app.event_tx.send(AppEvent::SetMainView(MainView::Surahs))?,
        KeyCode::Char('2') => app.event_tx.send(AppEvent::SetMainView(MainView::Reader))?,
        KeyCode::Char('3') => app
            .event_tx
            .send(AppEvent::SetMainView(MainView::Bookmarks))?,

        // Navigation: Down / j
        KeyCode::Char('j') | KeyCode::Down => match app.main_view {
            MainView::Surahs => app.reader.next_surah(),
            MainView::Reader => app.reader.next_ayah(),
            MainView::Bookmarks => app.reader.next_bookmark(app.bookmarks.entries().len()),
        },

        // Navigation: Up / k
        KeyCode::Char('k') | KeyCode::Up => match app.main_view {
            MainView::Surahs => app.reader.previous_surah(),
            MainView::Reader => app.reader.previous_ayah(),
            MainView::Bookmarks => app.reader.previous_bookmark(app.bookmarks.entries().len()),
        },

        KeyCode::Enter => match app.main_view {
            MainView::Surahs => {
                if let Some(number) = app.reader.selected_surah_number() {
                    app.task_tx.send(AppTask::LoadSurah(number))?;
                }
            }
            MainView::Reader => app.event_tx.send(AppEvent::PlaySelection)?,
            MainView::Bookmarks => open_selected_bookmark(app)?,
        },

        KeyCode::Esc if app.main_view == MainView::Surahs && !app.reader.filter().is_empty() => {
            app.event_tx.send(AppEvent::FilterSurahs(String::new()))?
        }

        KeyCode::Char('d') => app.event_tx.send(AppEvent::PlayDailyAyah)?,

        KeyCode::Char(' ') => app
            .event_tx
            .send(AppEvent::Transport(Transport::TogglePause))?,
        KeyCode::Char('n') => app.event_tx.send(AppEvent::Transport(Transport::Next))?,
        KeyCode::Char('p') => app
            .event_tx
            .send(AppEvent::Transport(Transport::Previous))?,
        KeyCode::Char('s') => app.event_tx.send(AppEvent::Transport(Transport::Stop))?,

        KeyCode::Char('b') => app.event_tx.send(AppEvent::ToggleBookmark)?,

        _ => {}
    }

    Ok(())
}

fn open_selected_bookmark(app: &mut App) -> Result<()> {
    let Some(index) = app.reader.bookmarks_state.selected() else {
        return Ok(());
    };
    let Some(bookmark) = app.bookmarks.entries().get(index) else {
        return Ok(());
    };

    app.reader.select_on_open(bookmark.number_in_surah);
    app.task_tx.send(AppTask::LoadSurah(bookmark.surah_number))?;

    Ok(())
}
