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

//! Render the reader.
//!
//! Each verse is shown as its Arabic text, right aligned and closed with an
//! Arabic-Indic verse marker, followed by its translation. The verse being
//! recited is highlighted; bookmarked verses carry a marker.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem},
};

use crate::{
    App,
    render::icons::{ICON_BOOKMARK, ICON_LOADING, ICON_RECITING},
    util::format::{arabic_numerals, wrap},
};

pub(crate) fn draw_reader(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_colour));

    let Some(open) = &app.reader.open else {
        let hint = List::new([ListItem::new(Span::styled(
            "Open a surah from the list (1) or with :s <number>",
            Style::default().fg(theme.muted_fg),
        ))])
        .block(block.title(" Reader "));
        f.render_widget(hint, area);
        return;
    };

    // Leave room for the border and the highlight symbol.
    let text_width = area.width.saturating_sub(6) as usize;

    let items: Vec<ListItem> = open
        .ayahs
        .iter()
        .map(|ayah| {
            let reciting = app.playback.is_current(&ayah.track_id());
            let bookmarked = app.bookmarks.is_bookmarked(ayah.number);

            let mut lines: Vec<Line> = Vec::new();

            let marker = match (reciting, bookmarked) {
                (true, _) => Span::styled(
                    if app.playback.is_loading() { ICON_LOADING } else { ICON_RECITING },
                    Style::default().fg(theme.accent_colour),
                ),
                (false, true) => {
                    Span::styled(ICON_BOOKMARK, Style::default().fg(theme.bookmark_fg))
                }
                (false, false) => Span::raw(" "),
            };
            lines.push(Line::from(vec![
                marker,
                Span::styled(
                    format!(" {}:{}", ayah.surah_number, ayah.number_in_surah),
                    Style::default().fg(theme.muted_fg),
                ),
            ]));

            let arabic = format!(
                "{} ﴿{}﴾",
                ayah.arabic,
                arabic_numerals(ayah.number_in_surah)
            );
            lines.extend(wrap(&arabic, text_width).into_iter().map(|line| {
                Line::from(Span::styled(line, Style::default().fg(theme.arabic_fg)))
                    .alignment(Alignment::Right)
            }));

            lines.extend(wrap(&ayah.translation, text_width).into_iter().map(|line| {
                Line::from(Span::styled(line, Style::default().fg(theme.translation_fg)))
            }));
            lines.push(Line::from(""));

            let item = ListItem::new(Text::from(lines));
            if reciting {
                item.style(Style::default().bg(theme.reciting_bg))
            } else {
                item
            }
        })
        .collect();

    let title = format!(
        " {} {} · {} ",
        open.surah.number, open.surah.english_name, open.surah.name
    );

    let list = List::new(items)
        .block(block.title(title))
        .highlight_style(
            Style::default()
                .bg(theme.selection_bg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");

    f.render_stateful_widget(list, area, &mut app.reader.ayahs_state);
}
