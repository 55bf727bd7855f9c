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

//! Offline content.
//!
//! Text fetched from the API is cached as JSON files so chapters open without
//! a network round trip after the first visit. Recitation audio that has been
//! downloaded to disk is preferred over the remote URL.
//!
//! # Layout
//!
//! * `<root>/text/surahs.json` - The chapter list.
//! * `<root>/text/<surah>_<edition>.json` - One chapter in one edition.
//! * `<root>/audio/<surah>_<ayah>.mp3` - Downloaded recitation audio.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::model::{AyahEdition, Surah};

const SURAHS_FILE: &str = "surahs.json";

pub(crate) struct OfflineStore {
    root: PathBuf,
}

impl OfflineStore {
    pub(crate) fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn text_dir(&self) -> PathBuf {
        self.root.join("text")
    }

    fn audio_dir(&self) -> PathBuf {
        self.root.join("audio")
    }

    pub(crate) fn cached_surahs(&self) -> Option<Vec<Surah>> {
        self.read_json(&self.text_dir().join(SURAHS_FILE))
    }

    pub(crate) fn store_surahs(&self, surahs: &[Surah]) {
        self.write_json(&self.text_dir().join(SURAHS_FILE), surahs);
    }

    pub(crate) fn cached_edition(&self, surah: u32, edition: &str) -> Option<Vec<AyahEdition>> {
        self.read_json(&self.edition_path(surah, edition))
    }

    pub(crate) fn store_edition(&self, surah: u32, edition: &str, verses: &[AyahEdition]) {
        self.write_json(&self.edition_path(surah, edition), verses);
    }

    fn edition_path(&self, surah: u32, edition: &str) -> PathBuf {
        self.text_dir().join(format!("{surah}_{edition}.json"))
    }

    pub(crate) fn audio_file_path(&self, surah: u32, number_in_surah: u32) -> PathBuf {
        self.audio_dir()
            .join(format!("{surah}_{number_in_surah}.mp3"))
    }

    /// Returns the local audio path if the verse has been downloaded,
    /// otherwise the remote URI unchanged.
    pub(crate) fn resolve_audio(
        &self,
        surah: u32,
        number_in_surah: u32,
        remote: Option<String>,
    ) -> Option<String> {
        let local = self.audio_file_path(surah, number_in_surah);
        if local.is_file() {
            return Some(local.to_string_lossy().into_owned());
        }
        remote
    }

    /// Total size of cached text and downloaded audio, in bytes.
    ///
    /// Anything else sharing the data directory, such as logs or the bookmark
    /// database, is not offline content and is not counted.
    pub(crate) fn storage_size(&self) -> u64 {
        [self.text_dir(), self.audio_dir()]
            .iter()
            .flat_map(WalkDir::new)
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| e.metadata().ok())
            .map(|meta| meta.len())
            .sum()
    }

    fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Option<T> {
        let contents = fs::read_to_string(path).ok()?;
        match serde_json::from_str(&contents) {
            Ok(value) => {
                debug!(path = %path.display(), "Cache hit");
                Some(value)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Ignoring unreadable cache file");
                None
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, path: &Path, value: &T) {
        if let Err(e) = write_json_file(path, value) {
            warn!(path = %path.display(), error = %e, "Failed to write cache file");
        }
    }
}

fn write_json_file<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let json = serde_json::to_string(value)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

/// Formats a byte count using the largest unit that keeps the value above one.
pub(crate) fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes < KB {
        format!("{bytes} B")
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    }
}
