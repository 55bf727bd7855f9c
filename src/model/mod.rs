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

//! Domain models and core data structures.
//!
//! This module defines the central entities of the application, chapters
//! (surahs) and verses (ayahs), in the shape the text API delivers them, plus
//! the merged verse used by the reader.

use serde::{Deserialize, Serialize};

/// Number of chapters in the text.
pub(crate) const SURAH_COUNT: u32 = 114;

/// Number of verses in the text, across all chapters.
pub(crate) const AYAH_COUNT: u32 = 6236;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Surah {
    pub(crate) number: u32,
    pub(crate) name: String,
    pub(crate) english_name: String,
    pub(crate) english_name_translation: String,
    pub(crate) number_of_ayahs: u32,
    pub(crate) revelation_type: String,
}

/// One verse in one edition (recitation or translation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AyahEdition {
    pub(crate) number: u32,
    pub(crate) text: String,
    pub(crate) number_in_surah: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) audio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) surah: Option<Surah>,
}

/// A verse as shown in the reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Ayah {
    /// Global verse number, unique across the whole text.
    pub(crate) number: u32,
    pub(crate) number_in_surah: u32,
    pub(crate) surah_number: u32,
    pub(crate) arabic: String,
    pub(crate) translation: String,
    /// Local file path when downloaded, otherwise the remote recitation URL.
    pub(crate) audio: Option<String>,
}

impl Ayah {
    /// Identity used to match this verse against the sounding track.
    pub(crate) fn track_id(&self) -> String {
        track_id(self.surah_number, self.number_in_surah)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DailyAyah {
    pub(crate) arabic: AyahEdition,
    pub(crate) translation: AyahEdition,
}

/// A saved verse. Carries enough text to be shown without a network fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Bookmark {
    pub(crate) ayah_number: u32,
    pub(crate) surah_number: u32,
    pub(crate) surah_name: String,
    pub(crate) surah_english_name: String,
    pub(crate) number_in_surah: u32,
    pub(crate) arabic_text: String,
    pub(crate) translation_text: String,
}

impl Bookmark {
    pub(crate) fn new(surah: &Surah, ayah: &Ayah) -> Self {
        Self {
            ayah_number: ayah.number,
            surah_number: surah.number,
            surah_name: surah.name.clone(),
            surah_english_name: surah.english_name.clone(),
            number_in_surah: ayah.number_in_surah,
            arabic_text: ayah.arabic.clone(),
            translation_text: ayah.translation.clone(),
        }
    }
}

pub(crate) fn track_id(surah_number: u32, number_in_surah: u32) -> String {
    format!("{surah_number}_{number_in_surah}")
}

/// Zips a chapter's Arabic and translated verses together by position.
///
/// A missing translation leaves the verse with empty translation text.
pub(crate) fn merge_editions(
    surah_number: u32,
    arabic: Vec<AyahEdition>,
    translation: Vec<AyahEdition>,
) -> Vec<Ayah> {
    let mut translation = translation.into_iter();

    arabic
        .into_iter()
        .map(|verse| Ayah {
            number: verse.number,
            number_in_surah: verse.number_in_surah,
            surah_number,
            arabic: verse.text,
            translation: translation.next().map(|t| t.text).unwrap_or_default(),
            audio: verse.audio.filter(|uri| !uri.trim().is_empty()),
        })
        .collect()
}
