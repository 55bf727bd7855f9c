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

//! Media handle contract and engine messages.
//!
//! The playback engine never touches an audio library directly. It asks a
//! [`MediaBackend`] to load a URI, and the backend answers later by posting an
//! [`EngineMessage::Loaded`] carrying the same [`LoadTicket`]. End of media is
//! reported the same way, as [`EngineMessage::Completed`].
//!
//! Loaded handles never start playing on their own; only an explicit
//! [`MediaHandle::play`] produces sound.

use thiserror::Error;

use crate::audio::track::Queue;

/// Identity of a loaded media handle, unique for the life of a backend.
pub(crate) type HandleId = u64;

/// Correlates a load request with its eventual result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct LoadTicket(pub(crate) u64);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub(crate) enum MediaError {
    #[error("failed to load {uri}: {reason}")]
    Load { uri: String, reason: String },
    #[error("timed out loading {0}")]
    Timeout(String),
    #[error("media handle {0} is no longer available")]
    Disconnected(HandleId),
    #[error("media command failed: {0}")]
    Command(String),
}

/// A loaded, playable audio resource.
pub(crate) trait MediaHandle {
    fn id(&self) -> HandleId;

    fn play(&mut self) -> Result<(), MediaError>;

    fn pause(&mut self) -> Result<(), MediaError>;

    fn stop(&mut self) -> Result<(), MediaError>;

    /// Stops end-of-media notifications for this handle.
    fn detach(&mut self);

    fn unload(self) -> Result<(), MediaError>;
}

/// Source of media handles.
pub(crate) trait MediaBackend {
    type Handle: MediaHandle;

    /// Starts loading `uri` without playing it. The outcome must eventually be
    /// delivered to the engine as `EngineMessage::Loaded` with `ticket`.
    fn load(&mut self, uri: &str, ticket: LoadTicket);
}

/// Consumer-facing transport commands.
#[derive(Debug)]
pub(crate) enum PlayerCommand {
    PlayQueue(Queue),
    PlaySingle(String),
    Pause,
    Resume,
    Stop,
    SkipNext,
    SkipPrev,
    Shutdown,
}

/// Everything the engine reacts to, funnelled through one channel.
#[derive(Debug)]
pub(crate) enum EngineMessage<H> {
    Command(PlayerCommand),
    Loaded {
        ticket: LoadTicket,
        result: Result<H, MediaError>,
    },
    Completed(HandleId),
}

/// Tears a handle down completely: notifications first, then stop, then
/// unload. Failures are logged and otherwise ignored.
pub(crate) fn release<H: MediaHandle>(mut handle: H) {
    let id = handle.id();

    handle.detach();
    if let Err(e) = handle.stop() {
        tracing::debug!(handle = id, error = %e, "Ignoring stop failure during release");
    }
    if let Err(e) = handle.unload() {
        tracing::debug!(handle = id, error = %e, "Ignoring unload failure during release");
    }
}
