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

//! Render the bookmark list.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem},
};

use crate::{App, offline::format_size, render::icons::ICON_BOOKMARK};

pub(crate) fn draw_bookmarks(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;

    let items: Vec<ListItem> = app
        .bookmarks
        .entries()
        .iter()
        .map(|bookmark| {
            ListItem::new(Text::from(vec![
                Line::from(vec![
                    Span::styled(ICON_BOOKMARK, Style::default().fg(theme.bookmark_fg)),
                    Span::styled(
                        format!(
                            " {} {}:{}",
                            bookmark.surah_english_name,
                            bookmark.surah_number,
                            bookmark.number_in_surah
                        ),
                        Style::default().fg(theme.accent_colour),
                    ),
                    Span::styled(
                        format!("  {}", bookmark.surah_name),
                        Style::default().fg(theme.muted_fg),
                    ),
                ]),
                Line::from(Span::styled(
                    bookmark.arabic_text.as_str(),
                    Style::default().fg(theme.arabic_fg),
                ))
                .alignment(Alignment::Right),
                Line::from(Span::styled(
                    bookmark.translation_text.as_str(),
                    Style::default().fg(theme.translation_fg),
                )),
                Line::from(""),
            ]))
        })
        .collect();

    let storage = app
        .storage_bytes
        .map(|bytes| format!(" Offline storage: {} ", format_size(bytes)))
        .unwrap_or_default();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Bookmarks ({}) ", app.bookmarks.entries().len()))
                .title_bottom(Line::from(storage).alignment(Alignment::Right))
                .border_style(Style::default().fg(theme.border_colour)),
        )
        .highlight_style(Style::default().bg(theme.selection_bg))
        .highlight_symbol(">> ");

    f.render_stateful_widget(list, area, &mut app.reader.bookmarks_state);
}
