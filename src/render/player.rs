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

//! Render the recitation player bar.
//!
//! This module renders the transport state, the verse being recited and the
//! position within the playback queue.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Padding, Paragraph},
};

use crate::{
    App,
    audio::status::{PlaybackStatus, PlayerState},
    reader::Reader,
    render::icons::{ICON_LOADING, ICON_PAUSE, ICON_PLAY, ICON_STOP},
};

/// Renders the player widget including verse info and queue progress.
pub(crate) fn draw_player(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(Style::default().fg(app.theme.border_colour))
        .padding(Padding::horizontal(1));

    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner_area);

    let info_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(16)])
        .split(chunks[0]);

    let status = &app.playback;
    let icon = match status.state {
        PlayerState::Playing => ICON_PLAY,
        PlayerState::Paused => ICON_PAUSE,
        PlayerState::Loading => ICON_LOADING,
        PlayerState::Stopped => ICON_STOP,
    };

    let mut spans = vec![Span::styled(
        format!(" {} ", icon),
        Style::default().add_modifier(Modifier::BOLD),
    )
    .fg(app.theme.commander_colour)];

    match describe_track(status, &app.reader) {
        Some(description) => spans.push(
            Span::styled(description, Style::default().add_modifier(Modifier::BOLD))
                .fg(app.theme.accent_colour),
        ),
        None => spans.push(Span::raw("Not reciting").fg(app.theme.muted_fg)),
    }
    f.render_widget(Paragraph::new(Line::from(spans)), info_chunks[0]);

    if status.queue_length > 0 {
        let position = Paragraph::new(format!(
            "{} / {}",
            status.queue_position + 1,
            status.queue_length
        ))
        .alignment(Alignment::Right)
        .fg(app.theme.commander_colour);
        f.render_widget(position, info_chunks[1]);
    }

    let gauge = Gauge::default()
        .gauge_style(
            Style::default()
                .fg(app.theme.accent_colour)
                .bg(app.theme.gauge_track_colour),
        )
        .ratio(queue_progress(status))
        .label("")
        .use_unicode(true);
    f.render_widget(gauge, chunks[1]);
}

/// Names the sounding verse, e.g. "Al-Baqara 2:255".
///
/// Tracks that are not verses of a chapter are shown by their id.
fn describe_track(status: &PlaybackStatus, reader: &Reader) -> Option<String> {
    let id = status.current_track_id.as_deref()?;

    let surah = id
        .split_once('_')
        .and_then(|(surah, _)| surah.parse::<u32>().ok());
    let (Some(surah), Some(verse)) = (surah, status.current_ordinal.filter(|n| *n > 0)) else {
        return Some(id.to_string());
    };

    let name = reader
        .surah(surah)
        .map(|s| format!("{} ", s.english_name))
        .unwrap_or_default();

    Some(format!("{name}{surah}:{verse}"))
}

fn queue_progress(status: &PlaybackStatus) -> f64 {
    if status.queue_length == 0 {
        return 0.0;
    }
    ((status.queue_position + 1) as f64 / status.queue_length as f64).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(id: &str, position: usize, length: usize) -> PlaybackStatus {
        let ordinal = id
            .rsplit_once('_')
            .and_then(|(_, verse)| verse.parse().ok())
            .unwrap_or(0);

        PlaybackStatus {
            state: PlayerState::Playing,
            current_track_id: Some(id.to_string()),
            current_ordinal: Some(ordinal),
            queue_length: length,
            queue_position: position,
        }
    }

    #[test]
    fn describes_verse_tracks_by_reference() {
        let reader = Reader::new();
        assert_eq!(
            describe_track(&status("2_255", 0, 1), &reader).as_deref(),
            Some("2:255")
        );
    }

    #[test]
    fn single_uri_tracks_are_shown_verbatim() {
        let reader = Reader::new();
        assert_eq!(
            describe_track(&status("https://cdn.test/1.mp3", 0, 1), &reader).as_deref(),
            Some("https://cdn.test/1.mp3")
        );
        assert_eq!(
            describe_track(&status("/data/audio/2_255.mp3", 0, 1), &reader).as_deref(),
            Some("/data/audio/2_255.mp3")
        );
        assert_eq!(describe_track(&PlaybackStatus::default(), &reader), None);
    }

    #[test]
    fn progress_counts_the_current_track() {
        assert_eq!(queue_progress(&PlaybackStatus::default()), 0.0);
        assert_eq!(queue_progress(&status("1_1", 0, 4)), 0.25);
        assert_eq!(queue_progress(&status("1_4", 3, 4)), 1.0);
    }
}
