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

//! Read-only playback state published to the UI.

/// Represents the current playback status of the audio engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum PlayerState {
    Playing,
    Paused,
    Loading,
    #[default]
    Stopped,
}

/// Snapshot of the engine derived after every message it processes.
///
/// `queue_position` is the zero-based cursor; it is zero when the queue is
/// empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct PlaybackStatus {
    pub(crate) state: PlayerState,
    pub(crate) current_track_id: Option<String>,
    pub(crate) current_ordinal: Option<u32>,
    pub(crate) queue_length: usize,
    pub(crate) queue_position: usize,
}

impl PlaybackStatus {
    pub(crate) fn is_playing(&self) -> bool {
        self.state == PlayerState::Playing
    }

    pub(crate) fn is_loading(&self) -> bool {
        self.state == PlayerState::Loading
    }

    /// Whether the row identified by `track_id` is the one currently sounding
    /// (or about to).
    pub(crate) fn is_current(&self, track_id: &str) -> bool {
        self.current_track_id.as_deref() == Some(track_id)
    }
}
