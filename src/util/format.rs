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

const ARABIC_INDIC_DIGITS: [char; 10] = ['٠', '١', '٢', '٣', '٤', '٥', '٦', '٧', '٨', '٩'];

/// Writes a number using Arabic-Indic digits, as used for verse markers.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(arabic_numerals(255), "٢٥٥");
/// ```
pub(crate) fn arabic_numerals(number: u32) -> String {
    number
        .to_string()
        .chars()
        .map(|c| c.to_digit(10).map_or(c, |d| ARABIC_INDIC_DIGITS[d as usize]))
        .collect()
}

/// Greedily wraps `text` on whitespace into lines of at most `width`
/// characters. Words longer than `width` get a line of their own.
pub(crate) fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if line_len > 0 && line_len + 1 + word_len > width {
            lines.push(std::mem::take(&mut line));
            line_len = 0;
        }
        if line_len > 0 {
            line.push(' ');
            line_len += 1;
        }
        line.push_str(word);
        line_len += word_len;
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_to_arabic_indic_digits() {
        assert_eq!(arabic_numerals(0), "٠");
        assert_eq!(arabic_numerals(255), "٢٥٥");
        assert_eq!(arabic_numerals(6236), "٦٢٣٦");
    }

    #[test]
    fn wraps_on_word_boundaries() {
        assert_eq!(
            wrap("In the name of God, the Most Gracious", 12),
            vec!["In the name", "of God, the", "Most", "Gracious"]
        );
        assert_eq!(wrap("   ", 10), Vec::<String>::new());
        assert_eq!(wrap("overlongword ok", 4), vec!["overlongword", "ok"]);
    }
}
