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

//! Audio playback control.
//!
//! This module provides the high-level [`AudioPlayer`] interface used by the
//! UI to control recitation playback. It manages a background worker thread
//! that owns the playback engine, ensuring that media loading never blocks
//! the main application thread.

mod worker;

use std::{sync::mpsc, thread::JoinHandle, time::Duration};

use anyhow::{Result, anyhow};

use crate::{
    audio::{
        backend::MpvHandle,
        media::{EngineMessage, PlayerCommand},
        status::PlaybackStatus,
        track::Queue,
    },
    events::AppEvent,
};

/// A handle to the audio playback engine.
///
/// This struct acts as a command proxy; it does not perform audio processing
/// itself but instead sends instructions to a background worker thread.
pub(crate) struct AudioPlayer {
    /// Channel for sending commands to the background worker thread.
    command_tx: mpsc::Sender<EngineMessage<MpvHandle>>,
    /// The worker thread, until it has been shut down.
    worker: Option<JoinHandle<()>>,
}

impl AudioPlayer {
    /// Spawns the engine worker thread and returns a new player handle.
    ///
    /// # Arguments
    ///
    /// * `load_timeout` - Upper bound on a single media load.
    /// * `event_tx` - A channel to send playback status updates back to the
    ///   main event loop.
    pub(crate) fn new(load_timeout: Duration, event_tx: mpsc::Sender<AppEvent>) -> Result<Self> {
        let (command_tx, worker) = worker::spawn_player_worker(load_timeout, event_tx)?;

        Ok(Self {
            command_tx,
            worker: Some(worker),
        })
    }

    fn send(&self, command: PlayerCommand) -> Result<()> {
        self.command_tx
            .send(EngineMessage::Command(command))
            .map_err(|_| anyhow!("Playback engine is not running"))
    }

    /// Replaces the queue and starts playing at its cursor.
    pub(crate) fn play_queue(&self, queue: Queue) -> Result<()> {
        self.send(PlayerCommand::PlayQueue(queue))
    }

    /// Plays a single audio URI on its own.
    pub(crate) fn play_single(&self, uri: &str) -> Result<()> {
        self.send(PlayerCommand::PlaySingle(uri.to_string()))
    }

    pub(crate) fn pause(&self) -> Result<()> {
        self.send(PlayerCommand::Pause)
    }

    pub(crate) fn resume(&self) -> Result<()> {
        self.send(PlayerCommand::Resume)
    }

    /// Pauses if playing, otherwise resumes.
    pub(crate) fn toggle_pause(&self, status: &PlaybackStatus) -> Result<()> {
        if status.is_playing() {
            self.pause()
        } else {
            self.resume()
        }
    }

    /// Stop playback.
    pub(crate) fn stop(&self) -> Result<()> {
        self.send(PlayerCommand::Stop)
    }

    pub(crate) fn skip_next(&self) -> Result<()> {
        self.send(PlayerCommand::SkipNext)
    }

    pub(crate) fn skip_prev(&self) -> Result<()> {
        self.send(PlayerCommand::SkipPrev)
    }

    /// Stops playback and waits for the engine thread to release its media
    /// and exit. Does nothing once the engine has been shut down.
    pub(crate) fn shutdown(&mut self) -> Result<()> {
        let Some(worker) = self.worker.take() else {
            return Ok(());
        };

        self.send(PlayerCommand::Shutdown)?;
        worker
            .join()
            .map_err(|_| anyhow!("Playback engine panicked"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shutdown_waits_for_the_engine_thread() {
        let (event_tx, _event_rx) = mpsc::channel();
        let mut player = AudioPlayer::new(Duration::from_secs(1), event_tx).unwrap();

        player.shutdown().unwrap();

        assert!(player.worker.is_none());
        assert!(player.stop().is_err(), "engine thread has exited");
        assert!(player.shutdown().is_ok());
    }
}
