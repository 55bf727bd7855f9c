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

//! Visual styling and color configuration for the TUI.
//!
//! This module defines the application's color palette and provides utilities
//! for converting colors between Ratatui's internal representation and external
//! formats (such as hexadecimal strings) used for terminal emulator styling.

use ratatui::style::Color;

#[derive(Clone, Copy)]
pub(crate) struct Theme {
    pub(crate) background_colour: Color,
    pub(crate) accent_colour: Color,
    pub(crate) border_colour: Color,
    pub(crate) gauge_track_colour: Color,
    pub(crate) commander_colour: Color,
    pub(crate) message_colour: Color,

    pub(crate) arabic_fg: Color,
    pub(crate) translation_fg: Color,
    pub(crate) numeral_fg: Color,
    pub(crate) bookmark_fg: Color,
    pub(crate) muted_fg: Color,
    pub(crate) reciting_bg: Color,
    pub(crate) selection_bg: Color,
}

impl Default for Theme {
    // Returns the standard application theme.
    fn default() -> Self {
        Self::default_theme()
    }
}

impl Theme {
    // Constructs the default theme.
    pub(crate) const fn default_theme() -> Self {
        Self {
            background_colour: Color::Rgb(18, 32, 30),
            accent_colour: Color::Rgb(212, 175, 55),
            border_colour: Color::Rgb(90, 110, 104),
            gauge_track_colour: Color::Rgb(30, 48, 45),
            commander_colour: Color::Rgb(230, 230, 230),
            message_colour: Color::Rgb(240, 150, 110),

            arabic_fg: Color::Rgb(255, 255, 255),
            translation_fg: Color::Rgb(170, 190, 185),
            numeral_fg: Color::Rgb(212, 175, 55),
            bookmark_fg: Color::Rgb(230, 120, 120),
            muted_fg: Color::Rgb(120, 135, 130),
            reciting_bg: Color::Rgb(40, 70, 62),
            selection_bg: Color::Rgb(55, 60, 90),
        }
    }

    /// Converts a [`ratatui::style::Color`] into a CSS-style hexadecimal
    /// string.
    ///
    /// This is primarily used to set the terminal emulator's background color
    /// via escape sequences.
    ///
    /// # Arguments
    ///
    /// * `colour` - The Ratatui color to convert.
    ///
    /// Returns `None` for anything other than a [`Color::Rgb`] variant.
    pub(crate) fn to_hex(colour: Color) -> Option<String> {
        match colour {
            Color::Rgb(r, g, b) => Some(format!("#{:02x}{:02x}{:02x}", r, g, b)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_conversion() {
        assert_eq!(Theme::to_hex(Color::Rgb(18, 32, 255)).as_deref(), Some("#1220ff"));
        assert_eq!(Theme::to_hex(Color::Reset), None);
    }
}
