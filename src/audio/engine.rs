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

//! Sequential queue playback with background pre-fetch.
//!
//! [`PlaybackEngine`] owns the playback queue, the primary media handle and
//! at most one pre-fetched handle for the track after the current one. It is
//! driven entirely by [`EngineMessage`]s processed one at a time, so the only
//! interleaving hazards are between messages:
//!
//! * a load result may arrive after the command that requested it has been
//!   overridden, in which case its ticket no longer matches and the handle is
//!   unloaded unseen;
//! * an end-of-media notification may arrive for a handle that is no longer
//!   the playing primary, in which case it is ignored.
//!
//! When a track finishes naturally the engine promotes the pre-fetched handle
//! if it was loaded for exactly the next index, otherwise it loads the next
//! track fresh while still holding the finished one. Unplayable tracks are
//! skipped rather than reported.

use std::mem;

use tracing::{debug, info, warn};

use crate::audio::{
    media::{
        EngineMessage, HandleId, LoadTicket, MediaBackend, MediaError, MediaHandle, PlayerCommand,
        release,
    },
    status::{PlaybackStatus, PlayerState},
    track::{Queue, Track},
};

/// Receives every distinct status the engine settles into.
pub(crate) type StatusSink = Box<dyn FnMut(&PlaybackStatus) + Send>;

enum Session<H> {
    Idle,
    /// Loading a track chosen by a command; there is no previous primary.
    Loading { ticket: LoadTicket },
    /// Loading the next track after a natural completion. The finished
    /// primary is kept until its successor is playing.
    Transitioning { ticket: LoadTicket, outgoing: H },
    Playing(H),
    Paused(H),
}

struct PrefetchRequest {
    ticket: LoadTicket,
    index: usize,
    epoch: u64,
    cursor: usize,
}

enum Prefetch<H> {
    Empty,
    InFlight(PrefetchRequest),
    Ready { index: usize, handle: H },
}

#[derive(Clone, Copy, Debug)]
enum Skip {
    Next,
    Previous,
}

pub(crate) struct PlaybackEngine<B: MediaBackend> {
    backend: B,
    queue: Option<Queue>,
    session: Session<B::Handle>,
    prefetch: Prefetch<B::Handle>,
    // Bumped by every command that replaces or moves the queue.
    epoch: u64,
    next_ticket: u64,
    published: PlaybackStatus,
    sink: Option<StatusSink>,
}

impl<B: MediaBackend> PlaybackEngine<B> {
    pub(crate) fn new(backend: B) -> Self {
        Self {
            backend,
            queue: None,
            session: Session::Idle,
            prefetch: Prefetch::Empty,
            epoch: 0,
            next_ticket: 0,
            published: PlaybackStatus::default(),
            sink: None,
        }
    }

    pub(crate) fn with_status_sink(mut self, sink: StatusSink) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Processes a single message and publishes the resulting status if it
    /// changed.
    ///
    /// Returns `false` once the engine has been asked to shut down.
    pub(crate) fn handle(&mut self, message: EngineMessage<B::Handle>) -> bool {
        let running = match message {
            EngineMessage::Command(command) => self.handle_command(command),
            EngineMessage::Loaded { ticket, result } => {
                self.on_loaded(ticket, result);
                true
            }
            EngineMessage::Completed(id) => {
                self.on_completed(id);
                true
            }
        };

        self.publish();
        running
    }

    fn handle_command(&mut self, command: PlayerCommand) -> bool {
        match command {
            PlayerCommand::PlayQueue(queue) => self.play_queue(queue),
            PlayerCommand::PlaySingle(uri) => self.play_single(&uri),
            PlayerCommand::Pause => self.pause(),
            PlayerCommand::Resume => self.resume(),
            PlayerCommand::Stop => self.stop(),
            PlayerCommand::SkipNext => self.skip_next(),
            PlayerCommand::SkipPrev => self.skip_prev(),
            PlayerCommand::Shutdown => {
                self.stop();
                return false;
            }
        }

        true
    }

    /// Current status, derived from the session and queue.
    pub(crate) fn status(&self) -> PlaybackStatus {
        let state = match &self.session {
            Session::Idle => PlayerState::Stopped,
            Session::Loading { .. } | Session::Transitioning { .. } => PlayerState::Loading,
            Session::Playing(_) => PlayerState::Playing,
            Session::Paused(_) => PlayerState::Paused,
        };

        match &self.queue {
            Some(queue) => {
                let track = queue.current();
                PlaybackStatus {
                    state,
                    current_track_id: Some(track.id().to_string()),
                    current_ordinal: Some(track.ordinal()),
                    queue_length: queue.len(),
                    queue_position: queue.cursor(),
                }
            }
            None => PlaybackStatus {
                state,
                ..PlaybackStatus::default()
            },
        }
    }

    /// Replaces the queue and starts playing at its cursor.
    pub(crate) fn play_queue(&mut self, queue: Queue) {
        info!(
            tracks = queue.len(),
            start = queue.cursor(),
            "Starting playback queue"
        );

        self.teardown();
        self.epoch += 1;

        let start = queue.cursor();
        self.queue = Some(queue);
        self.start_load(start, None);
    }

    pub(crate) fn play_single(&mut self, uri: &str) {
        let queue = Track::single(uri)
            .map_err(|e| e.to_string())
            .and_then(|track| Queue::new(vec![track], 0).map_err(|e| e.to_string()));

        match queue {
            Ok(queue) => self.play_queue(queue),
            Err(reason) => warn!(uri, %reason, "Ignoring request to play invalid uri"),
        }
    }

    pub(crate) fn pause(&mut self) {
        self.session = match mem::replace(&mut self.session, Session::Idle) {
            Session::Playing(mut handle) => match handle.pause() {
                Ok(()) => Session::Paused(handle),
                Err(e) => {
                    warn!(error = %e, "Failed to pause playback");
                    Session::Playing(handle)
                }
            },
            other => other,
        };
    }

    pub(crate) fn resume(&mut self) {
        self.session = match mem::replace(&mut self.session, Session::Idle) {
            Session::Paused(mut handle) => match handle.play() {
                Ok(()) => Session::Playing(handle),
                Err(e) => {
                    warn!(error = %e, "Failed to resume playback");
                    Session::Paused(handle)
                }
            },
            other => other,
        };
    }

    /// Tears everything down and forgets the queue. Safe to call repeatedly.
    pub(crate) fn stop(&mut self) {
        if self.queue.is_some() {
            info!("Stopping playback");
        }

        self.teardown();
        self.queue = None;
        self.epoch += 1;
    }

    pub(crate) fn skip_next(&mut self) {
        self.skip(Skip::Next);
    }

    pub(crate) fn skip_prev(&mut self) {
        self.skip(Skip::Previous);
    }

    fn skip(&mut self, direction: Skip) {
        let Some(cursor) = self.queue.as_ref().map(Queue::cursor) else {
            debug!(?direction, "Nothing queued to skip");
            return;
        };

        let target = match direction {
            Skip::Next => cursor + 1,
            Skip::Previous => cursor.saturating_sub(1),
        };

        debug!(?direction, from = cursor, to = target, "Skipping");

        // The pre-fetched handle is discarded too: a skip is a discontinuity.
        self.teardown();
        self.epoch += 1;
        self.start_load(target, None);
    }

    fn on_completed(&mut self, id: HandleId) {
        let is_primary = matches!(&self.session, Session::Playing(handle) if handle.id() == id);
        if !is_primary {
            debug!(handle = id, "Ignoring completion from inactive handle");
            return;
        }

        let Session::Playing(outgoing) = mem::replace(&mut self.session, Session::Idle) else {
            return;
        };

        match self.queue.as_ref().map(Queue::cursor) {
            Some(cursor) => self.advance_to(cursor + 1, outgoing),
            None => release(outgoing),
        }
    }

    /// Moves to `next` after `outgoing` has finished, preferring the
    /// pre-fetched handle.
    fn advance_to(&mut self, mut next: usize, outgoing: B::Handle) {
        loop {
            let in_range = self.queue.as_mut().is_some_and(|queue| queue.seek(next));
            if !in_range {
                self.finish_queue(Some(outgoing));
                return;
            }

            let Some(mut handle) = self.take_prefetched(next) else {
                self.start_load(next, Some(outgoing));
                return;
            };

            match handle.play() {
                Ok(()) => {
                    debug!(index = next, handle = handle.id(), "Gapless handoff");
                    self.session = Session::Playing(handle);
                    release(outgoing);
                    self.prefetch_after(next);
                    return;
                }
                Err(e) => {
                    warn!(index = next, error = %e, "Pre-fetched track failed to play, skipping");
                    release(handle);
                    next += 1;
                }
            }
        }
    }

    /// Requests a load for `index`; the session must already be idle.
    fn start_load(&mut self, index: usize, outgoing: Option<B::Handle>) {
        let uri = match self.queue.as_mut().filter(|queue| index < queue.len()) {
            Some(queue) => {
                queue.seek(index);
                queue.current().uri().to_string()
            }
            None => {
                self.finish_queue(outgoing);
                return;
            }
        };

        let ticket = self.issue_ticket();
        debug!(index, %uri, ?ticket, "Loading track");
        self.backend.load(&uri, ticket);

        self.session = match outgoing {
            Some(outgoing) => Session::Transitioning { ticket, outgoing },
            None => Session::Loading { ticket },
        };
    }

    fn on_loaded(&mut self, ticket: LoadTicket, result: Result<B::Handle, MediaError>) {
        if matches!(&self.prefetch, Prefetch::InFlight(request) if request.ticket == ticket) {
            self.on_prefetched(result);
            return;
        }

        let awaited = match &self.session {
            Session::Loading { ticket: expected }
            | Session::Transitioning {
                ticket: expected, ..
            } => *expected == ticket,
            _ => false,
        };

        if !awaited {
            if let Ok(handle) = result {
                debug!(?ticket, handle = handle.id(), "Discarding stale load");
                release(handle);
            }
            return;
        }

        let outgoing = match mem::replace(&mut self.session, Session::Idle) {
            Session::Transitioning { outgoing, .. } => Some(outgoing),
            _ => None,
        };

        let Some(index) = self.queue.as_ref().map(Queue::cursor) else {
            if let Ok(handle) = result {
                release(handle);
            }
            if let Some(outgoing) = outgoing {
                release(outgoing);
            }
            return;
        };

        let started = result.and_then(|mut handle| match handle.play() {
            Ok(()) => Ok(handle),
            Err(e) => {
                release(handle);
                Err(e)
            }
        });

        match started {
            Ok(handle) => {
                debug!(index, handle = handle.id(), "Track playing");
                self.session = Session::Playing(handle);
                if let Some(outgoing) = outgoing {
                    release(outgoing);
                }
                self.prefetch_after(index);
            }
            Err(e) => {
                warn!(index, error = %e, "Skipping unplayable track");
                match outgoing {
                    Some(outgoing) => self.advance_to(index + 1, outgoing),
                    None => self.start_load(index + 1, None),
                }
            }
        }
    }

    /// Begins loading the track after `after` in the background, unless it is
    /// already loaded or loading.
    fn prefetch_after(&mut self, after: usize) {
        let target = after + 1;

        let next = self.queue.as_ref().and_then(|queue| {
            queue
                .get(target)
                .map(|track| (track.uri().to_string(), queue.cursor()))
        });

        let Some((uri, cursor)) = next else {
            self.discard_prefetch();
            return;
        };

        match &self.prefetch {
            Prefetch::Ready { index, .. } if *index == target => return,
            Prefetch::InFlight(request)
                if request.index == target
                    && request.epoch == self.epoch
                    && request.cursor == cursor =>
            {
                return;
            }
            _ => {}
        }

        self.discard_prefetch();

        let ticket = self.issue_ticket();
        debug!(index = target, %uri, ?ticket, "Pre-fetching track");
        self.backend.load(&uri, ticket);

        self.prefetch = Prefetch::InFlight(PrefetchRequest {
            ticket,
            index: target,
            epoch: self.epoch,
            cursor,
        });
    }

    fn on_prefetched(&mut self, result: Result<B::Handle, MediaError>) {
        let Prefetch::InFlight(request) = mem::replace(&mut self.prefetch, Prefetch::Empty) else {
            return;
        };

        let handle = match result {
            Ok(handle) => handle,
            Err(e) => {
                debug!(index = request.index, error = %e, "Pre-fetch failed");
                return;
            }
        };

        let cursor = self.queue.as_ref().map(Queue::cursor);
        let still_next = request.epoch == self.epoch
            && cursor == Some(request.cursor)
            && request.index == request.cursor + 1;

        if still_next {
            debug!(index = request.index, handle = handle.id(), "Pre-fetch ready");
            self.prefetch = Prefetch::Ready {
                index: request.index,
                handle,
            };
        } else {
            debug!(index = request.index, "Discarding outdated pre-fetch");
            release(handle);
        }
    }

    /// Takes the pre-fetched handle if it belongs to `index`; any other
    /// pre-fetch state is discarded.
    fn take_prefetched(&mut self, index: usize) -> Option<B::Handle> {
        match mem::replace(&mut self.prefetch, Prefetch::Empty) {
            Prefetch::Ready { index: ready, handle } if ready == index => Some(handle),
            Prefetch::Ready { handle, .. } => {
                release(handle);
                None
            }
            Prefetch::InFlight(_) | Prefetch::Empty => None,
        }
    }

    fn discard_prefetch(&mut self) {
        if let Prefetch::Ready { handle, .. } = mem::replace(&mut self.prefetch, Prefetch::Empty) {
            release(handle);
        }
    }

    /// Releases every handle the engine owns, keeping the queue.
    fn teardown(&mut self) {
        match mem::replace(&mut self.session, Session::Idle) {
            Session::Playing(handle)
            | Session::Paused(handle)
            | Session::Transitioning {
                outgoing: handle, ..
            } => release(handle),
            Session::Loading { .. } | Session::Idle => {}
        }

        self.discard_prefetch();
    }

    fn finish_queue(&mut self, outgoing: Option<B::Handle>) {
        info!("Reached end of playback queue");

        if let Some(outgoing) = outgoing {
            release(outgoing);
        }
        self.teardown();
        self.queue = None;
        self.epoch += 1;
    }

    fn issue_ticket(&mut self) -> LoadTicket {
        self.next_ticket += 1;
        LoadTicket(self.next_ticket)
    }

    fn publish(&mut self) {
        let status = self.status();
        if status == self.published {
            return;
        }

        if let Some(sink) = self.sink.as_mut() {
            sink(&status);
        }
        self.published = status;
    }
}

impl<B: MediaBackend> Drop for PlaybackEngine<B> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::audio::testing::{FakeState, Harness, uri};

    #[test]
    fn plays_whole_queue_with_gapless_handoffs() {
        let mut h = Harness::new();
        h.play(&[1, 2, 3], 0);

        let status = h.status();
        assert_eq!(status.state, PlayerState::Loading);
        assert_eq!(status.current_track_id.as_deref(), Some("1_1"));

        let first = h.resolve(&uri(1));
        assert!(h.status().is_playing());
        assert_eq!(h.load_count(&uri(2)), 1, "next track is pre-fetched");

        let second = h.resolve(&uri(2));
        assert_eq!(h.state_of(second), FakeState::Loaded, "pre-fetch must not play");

        h.finish(first);
        let status = h.status();
        assert_eq!(status.current_track_id.as_deref(), Some("1_2"));
        assert_eq!(status.current_ordinal, Some(2));
        assert_eq!(status.queue_position, 1);
        assert!(status.is_playing());
        assert_eq!(h.load_count(&uri(2)), 1, "pre-fetched handle is reused");
        assert_eq!(h.state_of(first), FakeState::Unloaded);
        assert_eq!(h.state_of(second), FakeState::Playing);

        let third = h.resolve(&uri(3));
        h.finish(second);
        assert_eq!(h.status().current_track_id.as_deref(), Some("1_3"));
        assert_eq!(h.load_count(&uri(3)), 1);

        h.finish(third);
        let status = h.status();
        assert_eq!(status.current_track_id, None);
        assert_eq!(status.current_ordinal, None);
        assert_eq!(status.state, PlayerState::Stopped);
        assert_eq!(status.queue_length, 0);
        assert_eq!(h.state_of(third), FakeState::Unloaded);
        assert_eq!(h.total_loads(), 3);
    }

    #[test]
    fn falls_back_to_fresh_load_when_prefetch_is_pending() {
        let mut h = Harness::new();
        h.play(&[1, 2], 0);
        let first = h.resolve(&uri(1));
        let prefetch_ticket = h.tickets_for(&uri(2))[0];

        h.finish(first);
        let status = h.status();
        assert_eq!(status.state, PlayerState::Loading);
        assert_eq!(status.current_track_id.as_deref(), Some("1_2"));
        assert_eq!(h.load_count(&uri(2)), 2);
        assert_eq!(
            h.state_of(first),
            FakeState::Finished,
            "finished primary is held until its successor is ready"
        );

        let fresh = *h.tickets_for(&uri(2)).last().unwrap();
        let second = h.resolve_ticket(fresh);
        assert!(h.status().is_playing());
        assert_eq!(h.state_of(first), FakeState::Unloaded);

        let late = h.resolve_ticket(prefetch_ticket);
        assert_eq!(h.state_of(late), FakeState::Unloaded);
        assert_eq!(h.state_of(second), FakeState::Playing);
    }

    #[test]
    fn stop_before_load_resolves_discards_the_handle() {
        let mut h = Harness::new();
        h.play(&[1, 2], 0);
        h.engine.stop();

        let handle = h.resolve(&uri(1));
        assert_eq!(h.state_of(handle), FakeState::Unloaded);
        assert!(h.calls(handle).iter().all(|call| *call != "play"));

        let status = h.status();
        assert_eq!(status.current_track_id, None);
        assert_eq!(status.state, PlayerState::Stopped);
    }

    #[test]
    fn skip_previous_clamps_at_first_track() {
        let mut h = Harness::new();
        h.play(&[1, 2, 3], 1);
        assert_eq!(h.status().current_track_id.as_deref(), Some("1_2"));
        let second = h.resolve(&uri(2));

        h.engine.skip_prev();
        assert_eq!(h.state_of(second), FakeState::Unloaded);
        assert_eq!(h.status().current_track_id.as_deref(), Some("1_1"));
        h.resolve(&uri(1));

        h.engine.skip_prev();
        let status = h.status();
        assert_eq!(status.current_track_id.as_deref(), Some("1_1"));
        assert_eq!(status.queue_position, 0);
        assert_eq!(h.load_count(&uri(1)), 2, "first track restarts");

        h.resolve(&uri(1));
        assert!(h.status().is_playing());
    }

    #[test]
    fn unplayable_track_is_skipped_during_advance() {
        let mut h = Harness::new();
        h.play(&[1, 2, 3], 0);
        let first = h.resolve(&uri(1));
        h.fail(&uri(2));

        h.finish(first);
        assert_eq!(h.status().current_track_id.as_deref(), Some("1_2"));

        h.fail(&uri(2));
        let status = h.status();
        assert_eq!(status.current_track_id.as_deref(), Some("1_3"));
        assert_eq!(status.state, PlayerState::Loading);

        let third = h.resolve(&uri(3));
        assert!(h.status().is_playing());
        assert_eq!(h.state_of(third), FakeState::Playing);
        assert_eq!(h.state_of(first), FakeState::Unloaded);
    }

    #[test]
    fn unplayable_first_track_moves_on() {
        let mut h = Harness::new();
        h.play(&[1, 2], 0);
        h.fail(&uri(1));
        assert_eq!(h.status().current_track_id.as_deref(), Some("1_2"));

        h.fail(&uri(2));
        let status = h.status();
        assert_eq!(status.current_track_id, None);
        assert_eq!(status.state, PlayerState::Stopped);
    }

    #[test]
    fn skip_next_on_last_track_ends_the_queue() {
        let mut h = Harness::new();
        h.play(&[1, 2], 1);
        let last = h.resolve(&uri(2));

        h.engine.skip_next();
        let status = h.status();
        assert_eq!(status.current_track_id, None);
        assert_eq!(status.state, PlayerState::Stopped);
        assert_eq!(h.state_of(last), FakeState::Unloaded);
        assert_eq!(h.total_loads(), 1);
    }

    #[test]
    fn prefetch_resolving_after_skip_is_never_adopted() {
        let mut h = Harness::new();
        h.play(&[1, 2, 3], 0);
        h.resolve(&uri(1));
        let prefetch_ticket = h.tickets_for(&uri(2))[0];

        h.engine.skip_next();
        assert_eq!(h.load_count(&uri(2)), 2, "skip loads fresh");

        let stale = h.resolve_ticket(prefetch_ticket);
        assert_eq!(h.state_of(stale), FakeState::Unloaded);
        assert_eq!(h.status().state, PlayerState::Loading);

        let fresh = *h.tickets_for(&uri(2)).last().unwrap();
        let second = h.resolve_ticket(fresh);
        assert_eq!(h.state_of(second), FakeState::Playing);
        assert_eq!(h.load_count(&uri(3)), 1);
    }

    #[test]
    fn prefetch_resolving_after_stop_is_unloaded() {
        let mut h = Harness::new();
        h.play(&[1, 2, 3], 0);
        let first = h.resolve(&uri(1));

        h.engine.stop();
        assert_eq!(h.state_of(first), FakeState::Unloaded);

        let stale = h.resolve(&uri(2));
        assert_eq!(h.state_of(stale), FakeState::Unloaded);
        assert_eq!(h.status(), PlaybackStatus::default());
    }

    #[test]
    fn skip_there_and_back_does_not_reuse_old_prefetch() {
        let mut h = Harness::new();
        h.play(&[1, 2, 3], 0);
        h.resolve(&uri(1));
        let prefetch_ticket = h.tickets_for(&uri(2))[0];

        h.engine.skip_next();
        h.engine.skip_prev();
        assert_eq!(h.status().current_track_id.as_deref(), Some("1_1"));

        let stale = h.resolve_ticket(prefetch_ticket);
        assert_eq!(h.state_of(stale), FakeState::Unloaded);

        h.resolve(&uri(1));
        assert_eq!(h.load_count(&uri(2)), 3, "pre-fetch is requested again");
    }

    #[test]
    fn duplicate_completion_during_fresh_load_advances_once() {
        let mut h = Harness::new();
        h.play(&[1, 2, 3], 0);
        let first = h.resolve(&uri(1));

        h.finish(first);
        h.finish(first);

        let status = h.status();
        assert_eq!(status.current_track_id.as_deref(), Some("1_2"));
        assert_eq!(h.load_count(&uri(2)), 2);
        assert_eq!(h.load_count(&uri(3)), 0);
    }

    #[test]
    fn duplicate_completion_after_gapless_handoff_is_ignored() {
        let mut h = Harness::new();
        h.play(&[1, 2, 3], 0);
        let first = h.resolve(&uri(1));
        let second = h.resolve(&uri(2));

        h.finish(first);
        h.finish(first);

        assert_eq!(h.status().current_track_id.as_deref(), Some("1_2"));
        assert_eq!(h.state_of(second), FakeState::Playing);
    }

    #[test]
    fn pause_and_resume_only_affect_a_loaded_primary() {
        let mut h = Harness::new();
        h.engine.pause();
        h.engine.resume();
        assert_eq!(h.status(), PlaybackStatus::default());

        h.play(&[1, 2], 0);
        h.engine.pause();
        assert_eq!(h.status().state, PlayerState::Loading);

        let first = h.resolve(&uri(1));
        h.engine.pause();
        assert_eq!(h.status().state, PlayerState::Paused);
        assert_eq!(h.state_of(first), FakeState::Paused);

        h.engine.resume();
        assert!(h.status().is_playing());
        assert_eq!(h.state_of(first), FakeState::Playing);
    }

    #[test]
    fn completion_from_paused_or_unknown_handle_is_ignored() {
        let mut h = Harness::new();
        h.play(&[1, 2], 0);
        let first = h.resolve(&uri(1));

        h.engine.handle(EngineMessage::Completed(999));
        assert_eq!(h.status().current_track_id.as_deref(), Some("1_1"));

        h.engine.pause();
        h.engine.handle(EngineMessage::Completed(first));
        assert_eq!(h.status().state, PlayerState::Paused);
        assert_eq!(h.status().current_track_id.as_deref(), Some("1_1"));
    }

    #[test]
    fn play_queue_tears_down_primary_and_prefetch() {
        let mut h = Harness::new();
        h.play(&[1, 2], 0);
        let first = h.resolve(&uri(1));
        let prefetched = h.resolve(&uri(2));

        h.play(&[4, 5], 0);
        assert_eq!(h.state_of(first), FakeState::Unloaded);
        assert_eq!(h.state_of(prefetched), FakeState::Unloaded);
        assert_eq!(h.status().current_track_id.as_deref(), Some("1_4"));
        assert_eq!(h.status().queue_length, 2);
    }

    #[test]
    fn release_detaches_before_unloading() {
        let mut h = Harness::new();
        h.play(&[1], 0);
        let only = h.resolve(&uri(1));

        h.engine.stop();
        h.engine.stop();

        assert_eq!(h.calls(only), vec!["play", "detach", "stop", "unload"]);
    }

    #[test]
    fn play_single_builds_a_one_track_queue() {
        let mut h = Harness::new();
        h.engine.play_single("file:///audio/1_1.mp3");

        let status = h.status();
        assert_eq!(status.current_track_id.as_deref(), Some("file:///audio/1_1.mp3"));
        assert_eq!(status.current_ordinal, Some(0));
        assert_eq!(status.queue_length, 1);

        h.engine.play_single("");
        assert_eq!(h.status().current_track_id.as_deref(), Some("file:///audio/1_1.mp3"));
    }

    #[test]
    fn failed_play_of_loaded_handle_skips_track() {
        let mut h = Harness::new();
        h.play(&[1, 2], 0);
        h.refuse_play(&uri(1));

        let first = h.resolve(&uri(1));
        assert_eq!(h.state_of(first), FakeState::Unloaded);
        assert_eq!(h.status().current_track_id.as_deref(), Some("1_2"));
    }

    #[test]
    fn status_sink_sees_each_change_once() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink_seen = Arc::clone(&seen);

        let mut h = Harness::with_sink(Box::new(move |status: &PlaybackStatus| {
            sink_seen.lock().unwrap().push(status.state);
        }));

        h.send_play(&[1], 0);
        h.resolve(&uri(1));
        h.engine.handle(EngineMessage::Command(PlayerCommand::Pause));
        h.engine.handle(EngineMessage::Command(PlayerCommand::Stop));

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                PlayerState::Loading,
                PlayerState::Playing,
                PlayerState::Paused,
                PlayerState::Stopped
            ]
        );
    }

    #[test]
    fn skip_commands_move_the_cursor_and_load_the_target() {
        let mut h = Harness::new();
        h.send_play(&[1, 2, 3], 0);
        let first = h.resolve(&uri(1));

        h.engine.handle(EngineMessage::Command(PlayerCommand::SkipNext));
        let status = h.status();
        assert_eq!(status.queue_position, 1);
        assert_eq!(status.current_track_id.as_deref(), Some("1_2"));
        assert_eq!(status.state, PlayerState::Loading);
        assert_eq!(h.state_of(first), FakeState::Unloaded);

        h.resolve(&uri(2));
        h.engine.handle(EngineMessage::Command(PlayerCommand::SkipPrev));
        assert_eq!(h.status().queue_position, 0);
        assert_eq!(h.load_count(&uri(1)), 2);

        h.resolve(&uri(1));
        assert!(h.status().is_playing());
        assert_eq!(h.status().current_track_id.as_deref(), Some("1_1"));
    }

    #[test]
    fn shutdown_stops_and_ends_the_loop() {
        let mut h = Harness::new();
        h.play(&[1], 0);
        let only = h.resolve(&uri(1));

        assert!(!h.engine.handle(EngineMessage::Command(PlayerCommand::Shutdown)));
        assert_eq!(h.state_of(only), FakeState::Unloaded);
    }

    #[test]
    fn load_errors_never_surface() {
        let mut h = Harness::new();
        h.play(&[1], 0);
        let ticket = h.tickets_for(&uri(1))[0];

        assert!(h.engine.handle(EngineMessage::Loaded {
            ticket,
            result: Err(MediaError::Timeout(uri(1))),
        }));
        assert_eq!(h.status(), PlaybackStatus::default());
    }
}
