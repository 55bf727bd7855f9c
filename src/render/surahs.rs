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

//! Render the chapter list, with the verse of the day above it once loaded.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph, Wrap},
};

use crate::{App, model::DailyAyah, theme::Theme, util::format::arabic_numerals};

pub(crate) fn draw_surahs(f: &mut Frame, area: Rect, app: &mut App) {
    let list_area = match &app.daily {
        Some(daily) => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(8), Constraint::Min(0)])
                .split(area);
            draw_daily_ayah(f, chunks[0], daily, &app.theme);
            chunks[1]
        }
        None => area,
    };

    let theme = &app.theme;
    let items: Vec<ListItem> = app
        .reader
        .visible_surahs()
        .map(|surah| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:>3}  ", surah.number),
                    Style::default().fg(theme.numeral_fg),
                ),
                Span::styled(
                    surah.english_name.clone(),
                    Style::default().fg(theme.arabic_fg).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {}", surah.english_name_translation),
                    Style::default().fg(theme.translation_fg),
                ),
                Span::styled(
                    format!("  {} verses, {}", surah.number_of_ayahs, surah.revelation_type),
                    Style::default().fg(theme.muted_fg),
                ),
                Span::styled(format!("  {}", surah.name), Style::default().fg(theme.arabic_fg)),
            ]))
        })
        .collect();

    let title = if app.reader.surahs.is_empty() {
        " Surahs (loading) ".to_string()
    } else if app.reader.filter().is_empty() {
        " Surahs ".to_string()
    } else {
        format!(" Surahs matching \"{}\" ", app.reader.filter())
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(theme.border_colour)),
        )
        .highlight_style(Style::default().bg(theme.selection_bg))
        .highlight_symbol(">> ");

    f.render_stateful_widget(list, list_area, &mut app.reader.surahs_state);
}

fn draw_daily_ayah(f: &mut Frame, area: Rect, daily: &DailyAyah, theme: &Theme) {
    let reference = match &daily.arabic.surah {
        Some(surah) => format!(
            " Verse of the day: {} {}:{} ",
            surah.english_name, surah.number, daily.arabic.number_in_surah
        ),
        None => " Verse of the day ".to_string(),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(reference)
        .title_bottom(Line::from(" d: recite ").alignment(Alignment::Right))
        .border_style(Style::default().fg(theme.accent_colour))
        .padding(Padding::horizontal(1));

    let text = vec![
        Line::from(vec![
            Span::styled(daily.arabic.text.as_str(), Style::default().fg(theme.arabic_fg)),
            Span::styled(
                format!(" ﴿{}﴾", arabic_numerals(daily.arabic.number_in_surah)),
                Style::default().fg(theme.numeral_fg),
            ),
        ])
        .alignment(Alignment::Right),
        Line::from(""),
        Line::from(Span::styled(
            daily.translation.text.as_str(),
            Style::default().fg(theme.translation_fg),
        )),
    ];

    f.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: true }),
        area,
    );
}
