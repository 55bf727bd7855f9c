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

//! The playback engine thread.
//!
//! A single worker thread owns the [`PlaybackEngine`]. Commands from the UI,
//! load results from media workers, and end-of-file notifications all arrive
//! on the same channel and are processed strictly in order.

use std::{
    sync::mpsc::{self, Receiver, Sender},
    thread::{self, JoinHandle},
    time::Duration,
};

use anyhow::{Context, Result};
use tracing::info;

use crate::{
    audio::{
        backend::{MpvBackend, MpvHandle},
        engine::PlaybackEngine,
        media::EngineMessage,
    },
    events::AppEvent,
};

/// Spawns the engine worker thread and returns the sending end of its
/// message channel together with the thread's handle.
///
/// # Arguments
///
/// * `load_timeout` - How long a media load may take before the track is
///   treated as unplayable.
/// * `event_tx` - The channel used to broadcast playback status changes.
///
/// # Errors
///
/// Returns an error if the worker thread cannot be spawned.
pub(crate) fn spawn_player_worker(
    load_timeout: Duration,
    event_tx: Sender<AppEvent>,
) -> Result<(Sender<EngineMessage<MpvHandle>>, JoinHandle<()>)> {
    let (engine_tx, engine_rx) = mpsc::channel();
    let backend = MpvBackend::new(engine_tx.clone(), load_timeout);

    let worker = thread::Builder::new()
        .name("playback-engine".to_string())
        .spawn(move || run_engine(backend, engine_rx, event_tx))
        .context("Failed to spawn playback engine")?;

    Ok((engine_tx, worker))
}

/// Processes engine messages until shutdown, forwarding each new status to
/// the UI.
fn run_engine(
    backend: MpvBackend,
    engine_rx: Receiver<EngineMessage<MpvHandle>>,
    event_tx: Sender<AppEvent>,
) {
    let mut engine = PlaybackEngine::new(backend).with_status_sink(Box::new(move |status| {
        let _ = event_tx.send(AppEvent::PlaybackStatusChanged(status.clone()));
    }));

    while let Ok(message) = engine_rx.recv() {
        if !engine.handle(message) {
            break;
        }
    }

    info!("Playback engine stopped");
}
