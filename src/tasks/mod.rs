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

//! Background application task processing.
//!
//! This module implements the command pattern used to offload network and
//! disk access from the main UI thread. It provides a dedicated worker loop
//! that translates [`AppTask`] requests into API calls and cache reads, and
//! broadcasts the results back to the application via [`AppEvent`]s.
//!
//! Only actions that may block, or may take more than a trivial amount of time
//! to process, should be implemented as tasks. Other actions are likely more
//! suited to events.

mod handlers;

use std::{
    sync::mpsc::{Receiver, Sender},
    thread,
};

use anyhow::{Context, Result};
use tracing::{debug, error};

use crate::{api::QuranApi, config::AppConfig, events::AppEvent, offline::OfflineStore};

#[derive(Debug)]
pub(crate) enum AppTask {
    LoadSurahs,
    LoadSurah(u32),
    LoadDailyAyah,
    MeasureStorage,
}

/// Spawns a background thread to process application tasks.
///
/// # Arguments
///
/// * `config` - The application configuration.
/// * `store` - Offline text and audio storage.
/// * `task_rx` - The receiving end of the task channel.
/// * `event_tx` - The sending end of the channel for broadcasting results.
pub(crate) fn spawn_task_worker(
    config: &AppConfig,
    store: OfflineStore,
    task_rx: Receiver<AppTask>,
    event_tx: Sender<AppEvent>,
) -> Result<()> {
    let config = config.clone();

    thread::Builder::new()
        .name("task-worker".to_string())
        .spawn(move || {
            let api = QuranApi::new(&config);
            let ctx = TaskContext {
                config: &config,
                api: &api,
                store: &store,
                event_tx: &event_tx,
            };

            while let Ok(task) = task_rx.recv() {
                debug!(?task, "Running task");
                if let Err(e) = handle_task(task, &ctx) {
                    error!(error = %e, "Task failed");
                    let _ = event_tx.send(AppEvent::Error(e.to_string()));
                }
            }
        })
        .context("Failed to spawn task worker")?;

    Ok(())
}

/// Bundles shared resources required by task handlers to simplify resource
/// passing when invoking those handler functions.
pub(crate) struct TaskContext<'a> {
    config: &'a AppConfig,
    api: &'a QuranApi,
    store: &'a OfflineStore,
    event_tx: &'a Sender<AppEvent>,
}

/// Orchestrates the execution of a single task.
fn handle_task(task: AppTask, ctx: &TaskContext) -> Result<()> {
    match task {
        AppTask::LoadSurahs => handlers::load_surahs(ctx),
        AppTask::LoadSurah(number) => handlers::load_surah(ctx, number),
        AppTask::LoadDailyAyah => handlers::load_daily_ayah(ctx),
        AppTask::MeasureStorage => handlers::measure_storage(ctx),
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, sync::mpsc};

    use tempfile::tempdir;

    use super::*;
    use crate::model::{AyahEdition, Surah};

    fn offline_config() -> AppConfig {
        AppConfig {
            api_base_url: "http://127.0.0.1:9".to_string(),
            ..AppConfig::default()
        }
    }

    fn verse(number: u32, text: &str, audio: Option<&str>) -> AyahEdition {
        AyahEdition {
            number,
            text: text.to_string(),
            number_in_surah: number,
            audio: audio.map(str::to_string),
            surah: None,
        }
    }

    fn run(task: AppTask, config: &AppConfig, store: &OfflineStore) -> (Result<()>, Vec<AppEvent>) {
        let (event_tx, event_rx) = mpsc::channel();
        let api = QuranApi::new(config);
        let ctx = TaskContext {
            config,
            api: &api,
            store,
            event_tx: &event_tx,
        };

        let result = handle_task(task, &ctx);
        drop(event_tx);
        (result, event_rx.iter().collect())
    }

    #[test]
    fn cached_chapter_list_needs_no_network() {
        let dir = tempdir().unwrap();
        let store = OfflineStore::new(dir.path());
        store.store_surahs(&[Surah {
            number: 1,
            name: "الفاتحة".to_string(),
            english_name: "Al-Faatiha".to_string(),
            english_name_translation: "The Opening".to_string(),
            number_of_ayahs: 7,
            revelation_type: "Meccan".to_string(),
        }]);

        let (result, events) = run(AppTask::LoadSurahs, &offline_config(), &store);

        assert!(result.is_ok());
        assert!(matches!(&events[..], [AppEvent::SurahsLoaded(list)] if list.len() == 1));
    }

    #[test]
    fn cached_chapter_prefers_downloaded_audio() {
        let dir = tempdir().unwrap();
        let config = offline_config();
        let store = OfflineStore::new(dir.path());
        store.store_edition(
            1,
            &config.arabic_edition,
            &[
                verse(1, "ar-1", Some("https://cdn.test/1.mp3")),
                verse(2, "ar-2", Some("https://cdn.test/2.mp3")),
            ],
        );
        store.store_edition(1, &config.translation_edition, &[verse(1, "en-1", None)]);

        let local = store.audio_file_path(1, 2);
        fs::create_dir_all(local.parent().unwrap()).unwrap();
        fs::write(&local, [0u8; 8]).unwrap();

        let (result, events) = run(AppTask::LoadSurah(1), &config, &store);
        assert!(result.is_ok());

        let [AppEvent::SurahLoaded { surah, ayahs }] = &events[..] else {
            panic!("unexpected events: {events:?}");
        };
        assert_eq!(*surah, 1);
        assert_eq!(ayahs[0].audio.as_deref(), Some("https://cdn.test/1.mp3"));
        assert_eq!(ayahs[1].audio, Some(local.to_string_lossy().into_owned()));
        assert_eq!(ayahs[1].translation, "");
    }

    #[test]
    fn unreachable_api_surfaces_as_error() {
        let dir = tempdir().unwrap();
        let store = OfflineStore::new(dir.path());

        let (result, events) = run(AppTask::LoadSurah(2), &offline_config(), &store);

        assert!(result.is_err());
        assert!(events.is_empty());
    }

    #[test]
    fn storage_is_measured() {
        let dir = tempdir().unwrap();
        let store = OfflineStore::new(dir.path());
        let local = store.audio_file_path(1, 1);
        fs::create_dir_all(local.parent().unwrap()).unwrap();
        fs::write(&local, [0u8; 10]).unwrap();

        let (_, events) = run(AppTask::MeasureStorage, &offline_config(), &store);
        assert!(matches!(&events[..], [AppEvent::StorageMeasured(10)]));
    }
}
