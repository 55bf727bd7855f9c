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

//! Scripted media backend for engine tests.
//!
//! Loads are recorded rather than performed; a test decides when, in which
//! order, and with what outcome each load resolves. Every call made on a
//! handle is logged so tests can assert on ordering.

use std::{
    cell::RefCell,
    collections::{HashMap, HashSet},
    rc::Rc,
};

use crate::audio::{
    engine::{PlaybackEngine, StatusSink},
    media::{
        EngineMessage, HandleId, LoadTicket, MediaBackend, MediaError, MediaHandle, PlayerCommand,
    },
    status::PlaybackStatus,
    track::{Queue, Track},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FakeState {
    Loaded,
    Playing,
    Paused,
    Stopped,
    Finished,
    Unloaded,
}

struct LoadRequest {
    uri: String,
    ticket: LoadTicket,
    resolved: bool,
}

struct FakeRecord {
    uri: String,
    state: FakeState,
    calls: Vec<&'static str>,
}

#[derive(Default)]
struct FakeMedia {
    loads: Vec<LoadRequest>,
    handles: HashMap<HandleId, FakeRecord>,
    refuse_play: HashSet<String>,
    next_id: HandleId,
}

pub(crate) struct FakeBackend {
    media: Rc<RefCell<FakeMedia>>,
}

impl MediaBackend for FakeBackend {
    type Handle = FakeHandle;

    fn load(&mut self, uri: &str, ticket: LoadTicket) {
        self.media.borrow_mut().loads.push(LoadRequest {
            uri: uri.to_string(),
            ticket,
            resolved: false,
        });
    }
}

pub(crate) struct FakeHandle {
    id: HandleId,
    media: Rc<RefCell<FakeMedia>>,
}

impl FakeHandle {
    fn record(&self, call: &'static str, state: Option<FakeState>) -> Result<(), MediaError> {
        let mut media = self.media.borrow_mut();
        let refuse = media.refuse_play.clone();
        let record = media
            .handles
            .get_mut(&self.id)
            .ok_or(MediaError::Disconnected(self.id))?;

        record.calls.push(call);
        if record.state == FakeState::Unloaded {
            return Err(MediaError::Disconnected(self.id));
        }
        if call == "play" && refuse.contains(&record.uri) {
            return Err(MediaError::Command(format!("cannot play {}", record.uri)));
        }
        if let Some(state) = state {
            record.state = state;
        }

        Ok(())
    }
}

impl MediaHandle for FakeHandle {
    fn id(&self) -> HandleId {
        self.id
    }

    fn play(&mut self) -> Result<(), MediaError> {
        self.record("play", Some(FakeState::Playing))
    }

    fn pause(&mut self) -> Result<(), MediaError> {
        self.record("pause", Some(FakeState::Paused))
    }

    fn stop(&mut self) -> Result<(), MediaError> {
        self.record("stop", Some(FakeState::Stopped))
    }

    fn detach(&mut self) {
        let _ = self.record("detach", None);
    }

    fn unload(self) -> Result<(), MediaError> {
        self.record("unload", Some(FakeState::Unloaded))
    }
}

pub(crate) fn uri(n: u32) -> String {
    format!("https://cdn.test/audio/{n}.mp3")
}

pub(crate) struct Harness {
    pub(crate) engine: PlaybackEngine<FakeBackend>,
    media: Rc<RefCell<FakeMedia>>,
}

impl Harness {
    pub(crate) fn new() -> Self {
        let media = Rc::new(RefCell::new(FakeMedia::default()));
        let backend = FakeBackend {
            media: Rc::clone(&media),
        };

        Self {
            engine: PlaybackEngine::new(backend),
            media,
        }
    }

    pub(crate) fn with_sink(sink: StatusSink) -> Self {
        let media = Rc::new(RefCell::new(FakeMedia::default()));
        let backend = FakeBackend {
            media: Rc::clone(&media),
        };

        Self {
            engine: PlaybackEngine::new(backend).with_status_sink(sink),
            media,
        }
    }

    fn queue(ordinals: &[u32], start: usize) -> Queue {
        let tracks = ordinals
            .iter()
            .map(|n| Track::new(format!("1_{n}"), uri(*n), *n).unwrap())
            .collect();
        Queue::new(tracks, start).unwrap()
    }

    /// Calls the engine directly.
    pub(crate) fn play(&mut self, ordinals: &[u32], start: usize) {
        self.engine.play_queue(Self::queue(ordinals, start));
        self.assert_single_playing();
    }

    /// Goes through the message path, which also publishes status.
    pub(crate) fn send_play(&mut self, ordinals: &[u32], start: usize) {
        let queue = Self::queue(ordinals, start);
        self.engine
            .handle(EngineMessage::Command(PlayerCommand::PlayQueue(queue)));
        self.assert_single_playing();
    }

    pub(crate) fn status(&self) -> PlaybackStatus {
        self.engine.status()
    }

    pub(crate) fn load_count(&self, uri: &str) -> usize {
        self.media
            .borrow()
            .loads
            .iter()
            .filter(|load| load.uri == uri)
            .count()
    }

    pub(crate) fn total_loads(&self) -> usize {
        self.media.borrow().loads.len()
    }

    pub(crate) fn tickets_for(&self, uri: &str) -> Vec<LoadTicket> {
        self.media
            .borrow()
            .loads
            .iter()
            .filter(|load| load.uri == uri)
            .map(|load| load.ticket)
            .collect()
    }

    pub(crate) fn refuse_play(&mut self, uri: &str) {
        self.media.borrow_mut().refuse_play.insert(uri.to_string());
    }

    /// Resolves the most recent outstanding load of `uri` successfully.
    pub(crate) fn resolve(&mut self, uri: &str) -> HandleId {
        let ticket = self.pending_ticket(uri);
        self.resolve_ticket(ticket)
    }

    pub(crate) fn resolve_ticket(&mut self, ticket: LoadTicket) -> HandleId {
        let handle = {
            let mut media = self.media.borrow_mut();
            let load = media
                .loads
                .iter_mut()
                .find(|load| load.ticket == ticket && !load.resolved)
                .expect("no outstanding load for ticket");
            load.resolved = true;
            let uri = load.uri.clone();

            media.next_id += 1;
            let id = media.next_id;
            media.handles.insert(
                id,
                FakeRecord {
                    uri,
                    state: FakeState::Loaded,
                    calls: Vec::new(),
                },
            );

            FakeHandle {
                id,
                media: Rc::clone(&self.media),
            }
        };

        let id = handle.id;
        self.engine.handle(EngineMessage::Loaded {
            ticket,
            result: Ok(handle),
        });
        self.assert_single_playing();
        id
    }

    /// Fails the most recent outstanding load of `uri`.
    pub(crate) fn fail(&mut self, uri: &str) {
        let ticket = self.pending_ticket(uri);
        {
            let mut media = self.media.borrow_mut();
            if let Some(load) = media.loads.iter_mut().find(|load| load.ticket == ticket) {
                load.resolved = true;
            }
        }

        self.engine.handle(EngineMessage::Loaded {
            ticket,
            result: Err(MediaError::Load {
                uri: uri.to_string(),
                reason: "unreachable".to_string(),
            }),
        });
        self.assert_single_playing();
    }

    /// Simulates the handle reaching the end of its media.
    pub(crate) fn finish(&mut self, id: HandleId) {
        if let Some(record) = self.media.borrow_mut().handles.get_mut(&id) {
            if record.state == FakeState::Playing {
                record.state = FakeState::Finished;
            }
        }

        self.engine.handle(EngineMessage::Completed(id));
        self.assert_single_playing();
    }

    pub(crate) fn state_of(&self, id: HandleId) -> FakeState {
        self.media.borrow().handles[&id].state
    }

    pub(crate) fn calls(&self, id: HandleId) -> Vec<&'static str> {
        self.media.borrow().handles[&id].calls.clone()
    }

    fn pending_ticket(&self, uri: &str) -> LoadTicket {
        self.media
            .borrow()
            .loads
            .iter()
            .rev()
            .find(|load| load.uri == uri && !load.resolved)
            .map(|load| load.ticket)
            .expect("no outstanding load for uri")
    }

    fn assert_single_playing(&self) {
        let playing = self
            .media
            .borrow()
            .handles
            .values()
            .filter(|record| record.state == FakeState::Playing)
            .count();
        assert!(playing <= 1, "{playing} handles playing at once");
    }
}
