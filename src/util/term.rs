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

//! Terminal emulator background control.
//!
//! The window background outside the drawn area is painted with the OSC 11
//! sequence so the theme reaches the edges of the terminal, and handed back
//! to the emulator with OSC 111 on exit. Emulators without OSC support
//! ignore both sequences.

use std::io::{self, Write};

use ratatui::style::Color;

use crate::theme::Theme;

const OSC_SET_BACKGROUND: &str = "\x1b]11;";
const OSC_RESET_BACKGROUND: &str = "\x1b]111";
const BEL: char = '\x07';

/// Paints the terminal background with `colour`.
///
/// Returns `Ok(false)`, writing nothing, when `colour` is not an RGB value.
pub(crate) fn set_terminal_bg(out: &mut impl Write, colour: Color) -> io::Result<bool> {
    let Some(hex) = Theme::to_hex(colour) else {
        return Ok(false);
    };

    write!(out, "{OSC_SET_BACKGROUND}{hex}{BEL}")?;
    out.flush()?;

    Ok(true)
}

/// Restores the emulator's own background colour.
pub(crate) fn reset_terminal_bg(out: &mut impl Write) -> io::Result<()> {
    write!(out, "{OSC_RESET_BACKGROUND}{BEL}")?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_background_sequences() {
        let mut out = Vec::new();

        assert!(set_terminal_bg(&mut out, Color::Rgb(0x12, 0x20, 0xff)).unwrap());
        reset_terminal_bg(&mut out).unwrap();

        assert_eq!(out, b"\x1b]11;#1220ff\x07\x1b]111\x07");
    }

    #[test]
    fn named_colours_are_left_to_the_terminal() {
        let mut out = Vec::new();

        assert!(!set_terminal_bg(&mut out, Color::Reset).unwrap());
        assert!(out.is_empty());
    }
}
