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

//! Command-line input logic and state management.
//!
//! This module implements the logic for a command-line processing component,
//! handling a text input component, and dispatching a corresponding
//! application event when typing is finished and a command is submitted.
//!
//! # Commands
//!
//! * `q` - Quit.
//! * `s <n>` - Open chapter `n`.
//! * `find <text>` - Filter the chapter list by name or number; `find` alone
//!   clears the filter.
//! * `play` - Recite the open chapter from the selected verse.
//! * `n`, `p` - Skip to the next or previous verse.
//! * `stop` - Stop recitation.
//! * `bm` - Toggle a bookmark on the selected verse.
//! * `daily` - Show the verse of the day.

use std::sync::mpsc::Sender;

use crossterm::event::{Event, KeyCode};
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::events::{AppEvent, Transport};

/// Command line contents when chapter search is started with `/`.
const FIND_PREFIX: &str = "find ";

pub(crate) struct Commander {
    active: bool,
    pub(crate) input: Input,
}

impl Commander {
    pub(crate) fn new() -> Self {
        Self {
            active: false,
            input: Input::default(),
        }
    }

    pub(crate) fn active(&self) -> bool {
        self.active
    }

    /// Offers a terminal event to the command line.
    ///
    /// Returns `true` if the event was consumed.
    pub(crate) fn handle_event(&mut self, event: &Event, event_tx: &Sender<AppEvent>) -> bool {
        let Event::Key(key_event) = event else {
            return false;
        };

        if !self.active {
            match key_event.code {
                KeyCode::Char(':') => self.input.reset(),
                KeyCode::Char('/') => self.input = Input::new(FIND_PREFIX.to_string()),
                _ => return false,
            }
            self.active = true;
            return true;
        }

        match key_event.code {
            KeyCode::Esc => {
                self.input.reset();
                self.active = false;
            }

            KeyCode::Enter => {
                let event = parse_command(self.input.value());
                self.input.reset();
                self.active = false;

                if let Some(event) = event {
                    let _ = event_tx.send(event);
                }
            }

            _ => {
                // Delegate all other keys to the managed input component.
                self.input.handle_event(event);
            }
        }

        true
    }
}

/// Translates a submitted command line into an application event.
///
/// Returns `None` for an empty line.
pub(crate) fn parse_command(buffer: &str) -> Option<AppEvent> {
    let parts: Vec<&str> = buffer.split_whitespace().collect();

    let event = match parts.as_slice() {
        [] => return None,

        ["q"] => AppEvent::ExitApplication,

        ["s", number] => match number.parse::<u32>() {
            Ok(number) => AppEvent::OpenSurah(number),
            Err(_) => AppEvent::Error(format!("Not a surah number: {number}")),
        },
        ["s"] => AppEvent::Error("Usage: s <number>".to_string()),

        ["find", query @ ..] => AppEvent::FilterSurahs(query.join(" ")),

        ["play"] => AppEvent::PlaySelection,
        ["n"] => AppEvent::Transport(Transport::Next),
        ["p"] => AppEvent::Transport(Transport::Previous),
        ["stop"] => AppEvent::Transport(Transport::Stop),

        ["bm"] => AppEvent::ToggleBookmark,
        ["daily"] => AppEvent::ShowDailyAyah,

        [cmd, ..] => AppEvent::Error(format!("Unknown command: {cmd}")),
    };

    Some(event)
}
