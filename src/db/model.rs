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

//! Database row mapping for domain models.

use rusqlite::Row;

use crate::model::Bookmark;

impl Bookmark {
    /// Maps an SQLite row to a [`Bookmark`] instance.
    ///
    /// This is a helper function designed to be used with [`rusqlite::Statement::query_map`].
    pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            ayah_number: row.get(0)?,
            surah_number: row.get(1)?,
            surah_name: row.get(2)?,
            surah_english_name: row.get(3)?,
            number_in_surah: row.get(4)?,
            arabic_text: row.get(5)?,
            translation_text: row.get(6)?,
        })
    }
}
