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

//! Reader state management.
//!
//! This module provides state for the chapter list and the reader widgets,
//! managing the selected chapter and verse, and turning the open chapter into
//! a playback queue.

use ratatui::widgets::ListState;
use tracing::warn;

use crate::{
    audio::{
        status::PlaybackStatus,
        track::{Queue, Track},
    },
    model::{Ayah, Surah},
};

pub(crate) struct OpenSurah {
    pub(crate) surah: Surah,
    pub(crate) ayahs: Vec<Ayah>,
}

#[derive(Default)]
pub(crate) struct Reader {
    pub(crate) surahs: Vec<Surah>,
    /// Chapter list filter; empty shows every chapter.
    filter: String,
    /// Indices into `surahs` of the chapters passing the filter.
    visible: Vec<usize>,
    pub(crate) open: Option<OpenSurah>,
    /// Verse (number within its chapter) to select once its chapter opens.
    pending_ayah: Option<u32>,

    pub(crate) surahs_state: ListState,
    pub(crate) ayahs_state: ListState,
    pub(crate) bookmarks_state: ListState,
}

impl Reader {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set_surahs(&mut self, surahs: Vec<Surah>) {
        self.surahs = surahs;
        self.apply_filter();
    }

    pub(crate) fn filter(&self) -> &str {
        &self.filter
    }

    /// Narrows the chapter list to chapters matching `query`. A blank query
    /// shows every chapter again.
    pub(crate) fn set_filter(&mut self, query: &str) {
        self.filter = query.trim().to_string();
        self.apply_filter();
    }

    fn apply_filter(&mut self) {
        self.visible = self
            .surahs
            .iter()
            .enumerate()
            .filter(|(_, surah)| surah_matches(surah, &self.filter))
            .map(|(index, _)| index)
            .collect();
        self.surahs_state
            .select((!self.visible.is_empty()).then_some(0));
    }

    /// The chapters shown in the chapter list, in order.
    pub(crate) fn visible_surahs(&self) -> impl Iterator<Item = &Surah> {
        self.visible.iter().filter_map(|index| self.surahs.get(*index))
    }

    pub(crate) fn surah(&self, number: u32) -> Option<&Surah> {
        self.surahs.iter().find(|s| s.number == number)
    }

    pub(crate) fn selected_surah_number(&self) -> Option<u32> {
        let index = self.surahs_state.selected()?;
        self.visible_surahs().nth(index).map(|surah| surah.number)
    }

    /// Makes `ayahs` the open chapter. Ignored if the chapter list does not
    /// know `number`.
    pub(crate) fn open_surah(&mut self, number: u32, ayahs: Vec<Ayah>) -> bool {
        let Some(surah) = self.surah(number).cloned() else {
            warn!(surah = number, "Loaded a chapter missing from the chapter list");
            return false;
        };

        if self.visible_surahs().all(|s| s.number != number) {
            self.set_filter("");
        }
        let shown_at = self.visible_surahs().position(|s| s.number == number);
        if shown_at.is_some() {
            self.surahs_state.select(shown_at);
        }
        let selected = match self.pending_ayah.take() {
            Some(in_surah) => ayahs.iter().position(|a| a.number_in_surah == in_surah),
            None => None,
        };
        self.ayahs_state
            .select(selected.or((!ayahs.is_empty()).then_some(0)));
        self.open = Some(OpenSurah { surah, ayahs });
        true
    }

    pub(crate) fn select_on_open(&mut self, number_in_surah: u32) {
        self.pending_ayah = Some(number_in_surah);
    }

    pub(crate) fn selected_ayah(&self) -> Option<(&Surah, &Ayah)> {
        let open = self.open.as_ref()?;
        let index = self.ayahs_state.selected()?;
        open.ayahs.get(index).map(|ayah| (&open.surah, ayah))
    }

    pub(crate) fn next_surah(&mut self) {
        Self::next(&mut self.surahs_state, self.visible.len());
    }

    pub(crate) fn previous_surah(&mut self) {
        Self::previous(&mut self.surahs_state, self.visible.len());
    }

    pub(crate) fn next_ayah(&mut self) {
        let len = self.ayah_count();
        Self::next(&mut self.ayahs_state, len);
    }

    pub(crate) fn previous_ayah(&mut self) {
        let len = self.ayah_count();
        Self::previous(&mut self.ayahs_state, len);
    }

    pub(crate) fn next_bookmark(&mut self, len: usize) {
        Self::next(&mut self.bookmarks_state, len);
    }

    pub(crate) fn previous_bookmark(&mut self, len: usize) {
        Self::previous(&mut self.bookmarks_state, len);
    }

    fn ayah_count(&self) -> usize {
        self.open.as_ref().map_or(0, |open| open.ayahs.len())
    }

    /// Moves the verse selection onto the verse being recited, if it belongs
    /// to the open chapter.
    pub(crate) fn follow(&mut self, status: &PlaybackStatus) {
        let Some(open) = &self.open else {
            return;
        };

        if let Some(index) = open
            .ayahs
            .iter()
            .position(|ayah| status.is_current(&ayah.track_id()))
        {
            self.ayahs_state.select(Some(index));
        }
    }

    /// Builds a queue from the open chapter, starting at the selected verse.
    pub(crate) fn queue_from_selection(&self) -> Option<Queue> {
        let open = self.open.as_ref()?;
        build_queue(&open.ayahs, self.ayahs_state.selected().unwrap_or(0))
    }

    fn next(state: &mut ListState, len: usize) {
        if len == 0 {
            return;
        }
        let i = match state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        state.select(Some(i));
    }

    fn previous(state: &mut ListState, len: usize) {
        if len == 0 {
            return;
        }
        let i = match state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        state.select(Some(i));
    }
}

/// Whether a chapter matches a chapter list query.
///
/// The English name matches case-insensitively on any substring, the Arabic
/// name on any exact substring, and the chapter number only in full.
pub(crate) fn surah_matches(surah: &Surah, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    surah
        .english_name
        .to_lowercase()
        .contains(&query.to_lowercase())
        || surah.name.contains(query)
        || surah.number.to_string() == query
}

/// Builds a queue of every verse with audio, positioned at `selected`.
///
/// Verses without audio are left out. If the selected verse has none, playback
/// starts at the next verse that does. Returns `None` when nothing from the
/// selection onwards is playable.
pub(crate) fn build_queue(ayahs: &[Ayah], selected: usize) -> Option<Queue> {
    let mut tracks = Vec::new();
    let mut start = None;

    for (index, ayah) in ayahs.iter().enumerate() {
        let Some(uri) = ayah.audio.as_deref() else {
            continue;
        };

        match Track::new(ayah.track_id(), uri, ayah.number_in_surah) {
            Ok(track) => {
                if start.is_none() && index >= selected {
                    start = Some(tracks.len());
                }
                tracks.push(track);
            }
            Err(e) => warn!(ayah = ayah.number, error = %e, "Skipping unplayable verse"),
        }
    }

    let start = start?;
    match Queue::new(tracks, start) {
        Ok(queue) => Some(queue),
        Err(e) => {
            warn!(error = %e, "Cannot build playback queue");
            None
        }
    }
}
