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

//! MPV-backed media handles.
//!
//! Every handle gets its own `libmpv` context running on a dedicated worker
//! thread, which lets the next verse be decoded and buffered while the current
//! one is still sounding.
//!
//! # Architecture
//!
//! Each worker moves through two phases:
//! 1. **Loading**: the file is opened paused and the worker waits for MPV to
//!    report it loaded (or fail, or time out). The outcome is posted to the
//!    engine as [`EngineMessage::Loaded`].
//! 2. **Serving**: the worker drains [`HandleCommand`]s from the owning
//!    [`MpvHandle`] and forwards natural end-of-file as
//!    [`EngineMessage::Completed`] until it is detached.
//!
//! Dropping or unloading the [`MpvHandle`] closes the command channel, which
//! ends the worker and destroys its MPV context.

use std::{
    sync::mpsc::{self, Receiver, Sender, TryRecvError},
    thread,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::audio::media::{
    EngineMessage, HandleId, LoadTicket, MediaBackend, MediaError, MediaHandle,
};

// How long a single wait for MPV events may block, in seconds.
const EVENT_WAIT: f64 = 0.05;

#[derive(Debug)]
enum HandleCommand {
    Play,
    Pause,
    Stop,
    Detach,
    Unload,
}

pub(crate) struct MpvBackend {
    engine_tx: Sender<EngineMessage<MpvHandle>>,
    load_timeout: Duration,
    next_id: HandleId,
}

impl MpvBackend {
    /// # Arguments
    ///
    /// * `engine_tx` - The engine's message channel; load results and
    ///   completions are posted here.
    /// * `load_timeout` - How long a load may take before it counts as
    ///   failed.
    pub(crate) fn new(engine_tx: Sender<EngineMessage<MpvHandle>>, load_timeout: Duration) -> Self {
        Self {
            engine_tx,
            load_timeout,
            next_id: 0,
        }
    }
}

impl MediaBackend for MpvBackend {
    type Handle = MpvHandle;

    fn load(&mut self, uri: &str, ticket: LoadTicket) {
        self.next_id += 1;
        let id = self.next_id;

        let (command_tx, command_rx) = mpsc::channel();
        let handle = MpvHandle { id, command_tx };

        let engine_tx = self.engine_tx.clone();
        let worker_tx = self.engine_tx.clone();
        let load_timeout = self.load_timeout;
        let worker_uri = uri.to_string();

        let spawned = thread::Builder::new()
            .name(format!("mpv-handle-{id}"))
            .spawn(move || {
                handle_worker(worker_uri, ticket, handle, command_rx, worker_tx, load_timeout)
            });

        if let Err(e) = spawned {
            let _ = engine_tx.send(EngineMessage::Loaded {
                ticket,
                result: Err(MediaError::Load {
                    uri: uri.to_string(),
                    reason: format!("failed to spawn media worker: {e}"),
                }),
            });
        }
    }
}

/// Control side of one MPV worker.
pub(crate) struct MpvHandle {
    id: HandleId,
    command_tx: Sender<HandleCommand>,
}

impl MpvHandle {
    fn send(&self, command: HandleCommand) -> Result<(), MediaError> {
        self.command_tx
            .send(command)
            .map_err(|_| MediaError::Disconnected(self.id))
    }
}

impl MediaHandle for MpvHandle {
    fn id(&self) -> HandleId {
        self.id
    }

    fn play(&mut self) -> Result<(), MediaError> {
        self.send(HandleCommand::Play)
    }

    fn pause(&mut self) -> Result<(), MediaError> {
        self.send(HandleCommand::Pause)
    }

    fn stop(&mut self) -> Result<(), MediaError> {
        self.send(HandleCommand::Stop)
    }

    fn detach(&mut self) {
        let _ = self.send(HandleCommand::Detach);
    }

    fn unload(self) -> Result<(), MediaError> {
        self.send(HandleCommand::Unload)
    }
}

/// Body of a handle worker thread: load, report, then serve commands.
fn handle_worker(
    uri: String,
    ticket: LoadTicket,
    handle: MpvHandle,
    command_rx: Receiver<HandleCommand>,
    engine_tx: Sender<EngineMessage<MpvHandle>>,
    load_timeout: Duration,
) {
    let id = handle.id;

    let loaded = open_paused(&uri)
        .map_err(|e| MediaError::Load {
            uri: uri.clone(),
            reason: format!("{e:#}"),
        })
        .and_then(|mut handler| {
            wait_until_loaded(&mut handler, &uri, load_timeout).map(|_| handler)
        });

    let mut handler = match loaded {
        Ok(handler) => handler,
        Err(e) => {
            debug!(handle = id, error = %e, "Media load failed");
            let _ = engine_tx.send(EngineMessage::Loaded {
                ticket,
                result: Err(e),
            });
            return;
        }
    };

    debug!(handle = id, %uri, "Media loaded");
    if engine_tx
        .send(EngineMessage::Loaded {
            ticket,
            result: Ok(handle),
        })
        .is_err()
    {
        return;
    }

    if let Err(e) = serve_commands(&mut handler, id, &command_rx, &engine_tx) {
        warn!(handle = id, error = %format!("{e:#}"), "MPV worker failure");
    }
}

/// Creates an MPV context with the file queued but paused.
fn open_paused(uri: &str) -> Result<mpv::MpvHandler> {
    let mut builder = mpv::MpvHandlerBuilder::new().context("Failed to create MPV builder")?;
    builder
        .set_option("vo", "null")
        .context("Failed to set no video output")?;
    builder
        .set_option("pause", true)
        .context("Failed to start paused")?;

    let mut handler = builder.build().context("Failed to build MPV handler")?;
    handler
        .command(&["loadfile", uri])
        .context(format!("Failed to load file: {}", uri))?;

    Ok(handler)
}

fn wait_until_loaded(
    handler: &mut mpv::MpvHandler,
    uri: &str,
    timeout: Duration,
) -> Result<(), MediaError> {
    let deadline = Instant::now() + timeout;

    while Instant::now() < deadline {
        match handler.wait_event(EVENT_WAIT) {
            Some(mpv::Event::FileLoaded) => return Ok(()),
            Some(mpv::Event::EndFile(_)) => {
                return Err(MediaError::Load {
                    uri: uri.to_string(),
                    reason: "media ended before it finished loading".to_string(),
                });
            }
            _ => {}
        }
    }

    Err(MediaError::Timeout(uri.to_string()))
}

/// Applies handle commands and reports natural end of file until the handle
/// is unloaded or dropped.
fn serve_commands(
    handler: &mut mpv::MpvHandler,
    id: HandleId,
    command_rx: &Receiver<HandleCommand>,
    engine_tx: &Sender<EngineMessage<MpvHandle>>,
) -> Result<()> {
    let mut notify = true;

    loop {
        loop {
            match command_rx.try_recv() {
                Ok(HandleCommand::Play) => handler
                    .set_property("pause", false)
                    .context("Failed to unpause")?,
                Ok(HandleCommand::Pause) => handler
                    .set_property("pause", true)
                    .context("Failed to pause")?,
                Ok(HandleCommand::Stop) => handler.command(&["stop"]).context("Failed to stop")?,
                Ok(HandleCommand::Detach) => notify = false,
                Ok(HandleCommand::Unload) | Err(TryRecvError::Disconnected) => return Ok(()),
                Err(TryRecvError::Empty) => break,
            }
        }

        if let Some(mpv::Event::EndFile(Ok(mpv::EndFileReason::MPV_END_FILE_REASON_EOF))) =
            handler.wait_event(EVENT_WAIT)
        {
            if notify && engine_tx.send(EngineMessage::Completed(id)).is_err() {
                return Ok(());
            }
        }
    }
}
