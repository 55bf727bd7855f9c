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

//! Playable tracks and playback queues.
//!
//! A [`Track`] is one verse recitation. A [`Queue`] is an immutable, ordered
//! list of tracks plus the cursor of the track currently selected for
//! playback. Queues are only ever replaced as a whole, never edited in place.

use std::{collections::HashSet, sync::Arc};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum TrackError {
    #[error("track id must not be empty")]
    EmptyId,
    #[error("track {0} has no audio uri")]
    EmptyUri(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum QueueError {
    #[error("cannot build a queue without tracks")]
    Empty,
    #[error("start index {index} is out of range for a queue of {len} tracks")]
    StartOutOfRange { index: usize, len: usize },
    #[error("duplicate track id {0} in queue")]
    DuplicateId(String),
}

/// One playable unit of audio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Track {
    id: String,
    uri: String,
    ordinal: u32,
}

impl Track {
    pub(crate) fn new(
        id: impl Into<String>,
        uri: impl Into<String>,
        ordinal: u32,
    ) -> Result<Self, TrackError> {
        let id = id.into();
        let uri = uri.into();

        if id.trim().is_empty() {
            return Err(TrackError::EmptyId);
        }
        if uri.trim().is_empty() {
            return Err(TrackError::EmptyUri(id));
        }

        Ok(Self { id, uri, ordinal })
    }

    /// Builds the synthetic track used to play a lone URI.
    pub(crate) fn single(uri: impl Into<String>) -> Result<Self, TrackError> {
        let uri = uri.into();
        Self::new(uri.clone(), uri, 0)
    }

    pub(crate) fn id(&self) -> &str {
        &self.id
    }

    pub(crate) fn uri(&self) -> &str {
        &self.uri
    }

    /// Position of the track within its source, e.g. the verse number.
    pub(crate) fn ordinal(&self) -> u32 {
        self.ordinal
    }
}

/// An ordered list of tracks with a cursor that always points at a valid
/// track.
#[derive(Debug, Clone)]
pub(crate) struct Queue {
    tracks: Arc<[Track]>,
    cursor: usize,
}

impl Queue {
    pub(crate) fn new(tracks: Vec<Track>, start: usize) -> Result<Self, QueueError> {
        if tracks.is_empty() {
            return Err(QueueError::Empty);
        }
        if start >= tracks.len() {
            return Err(QueueError::StartOutOfRange {
                index: start,
                len: tracks.len(),
            });
        }

        let mut seen = HashSet::with_capacity(tracks.len());
        for track in &tracks {
            if !seen.insert(track.id()) {
                return Err(QueueError::DuplicateId(track.id().to_string()));
            }
        }

        Ok(Self {
            tracks: tracks.into(),
            cursor: start,
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.tracks.len()
    }

    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    pub(crate) fn current(&self) -> &Track {
        &self.tracks[self.cursor]
    }

    pub(crate) fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Moves the cursor, refusing indices past the end of the queue.
    pub(crate) fn seek(&mut self, index: usize) -> bool {
        if index < self.tracks.len() {
            self.cursor = index;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(n: u32) -> Track {
        Track::new(format!("1_{n}"), format!("https://cdn.test/{n}.mp3"), n).unwrap()
    }

    #[test]
    fn track_rejects_blank_fields() {
        assert_eq!(Track::new("", "uri", 1), Err(TrackError::EmptyId));
        assert_eq!(
            Track::new("1_1", "  ", 1),
            Err(TrackError::EmptyUri("1_1".to_string()))
        );
    }

    #[test]
    fn single_track_uses_uri_as_id() {
        let track = Track::single("file:///tmp/a.mp3").unwrap();
        assert_eq!(track.id(), "file:///tmp/a.mp3");
        assert_eq!(track.uri(), "file:///tmp/a.mp3");
        assert_eq!(track.ordinal(), 0);
    }

    #[test]
    fn queue_validates_start_and_contents() {
        assert_eq!(Queue::new(vec![], 0).unwrap_err(), QueueError::Empty);
        assert_eq!(
            Queue::new(vec![track(1), track(2)], 2).unwrap_err(),
            QueueError::StartOutOfRange { index: 2, len: 2 }
        );
        assert_eq!(
            Queue::new(vec![track(1), track(1)], 0).unwrap_err(),
            QueueError::DuplicateId("1_1".to_string())
        );
    }

    #[test]
    fn queue_seek_stays_in_bounds() {
        let mut queue = Queue::new(vec![track(1), track(2), track(3)], 1).unwrap();
        assert_eq!(queue.current().id(), "1_2");

        assert!(queue.seek(2));
        assert_eq!(queue.current().id(), "1_3");

        assert!(!queue.seek(3));
        assert_eq!(queue.cursor(), 2);
    }
}
