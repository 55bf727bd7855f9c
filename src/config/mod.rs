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

//! Application configuration.
//!
//! This module manages the application configuration file.

use std::{path::PathBuf, time::Duration};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

pub(crate) const CONFIG_NAME: &str = "tartil";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub(crate) version: u32,
    pub(crate) api_base_url: String,
    /// Recitation edition; supplies the Arabic text and the verse audio.
    pub(crate) arabic_edition: String,
    pub(crate) translation_edition: String,
    /// Overrides the platform data directory when set.
    pub(crate) data_dir: Option<PathBuf>,
    pub(crate) log_level: String,
    pub(crate) load_timeout_secs: u64,
    /// Keep the reader scrolled to the verse being recited.
    pub(crate) follow_playback: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            api_base_url: "https://api.alquran.cloud/v1".to_string(),
            arabic_edition: "ar.alafasy".to_string(),
            translation_edition: "en.asad".to_string(),
            data_dir: None,
            log_level: "info".to_string(),
            load_timeout_secs: 20,
            follow_playback: true,
        }
    }
}

impl AppConfig {
    pub(crate) fn load_timeout(&self) -> Duration {
        Duration::from_secs(self.load_timeout_secs.max(1))
    }

    /// Directory for logs, the bookmark database and offline content.
    pub(crate) fn data_dir(&self) -> Option<PathBuf> {
        self.data_dir.clone().or_else(|| {
            ProjectDirs::from("", "", CONFIG_NAME).map(|dirs| dirs.data_dir().to_path_buf())
        })
    }
}

/// Loads the configuration file, creating it with defaults on first run.
///
/// An unreadable file falls back to the defaults.
pub(crate) fn load_config() -> AppConfig {
    confy::load(CONFIG_NAME, None).unwrap_or_default()
}
