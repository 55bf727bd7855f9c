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

//! Recitation playback.
//!
//! # Organization
//!
//! * [`track`]: Tracks and the immutable playback queue.
//! * [`media`]: The media handle contract and the engine's message type.
//! * [`engine`]: The queue manager and gapless transition logic.
//! * [`status`]: The read-only status projection consumed by the UI.
//! * [`backend`]: The `libmpv` implementation of the media handle contract.

pub(crate) mod backend;
pub(crate) mod engine;
pub(crate) mod media;
pub(crate) mod status;
pub(crate) mod track;

#[cfg(test)]
pub(crate) mod testing;
