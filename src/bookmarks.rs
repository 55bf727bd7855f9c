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

//! The user's saved verses.

use rusqlite::Connection;
use tracing::warn;

use crate::{
    db,
    model::{Ayah, Bookmark, Surah},
};

/// In-memory bookmark list, written through to the database on every change.
///
/// Persistence failures are logged and otherwise ignored; the in-memory list
/// stays authoritative for the rest of the session.
pub(crate) struct Bookmarks {
    entries: Vec<Bookmark>,
    conn: Option<Connection>,
}

impl Bookmarks {
    pub(crate) fn open(conn: Option<Connection>) -> Self {
        let entries = match &conn {
            Some(conn) => db::load_bookmarks(conn).unwrap_or_else(|e| {
                warn!(error = %e, "Failed to load bookmarks");
                Vec::new()
            }),
            None => Vec::new(),
        };

        Self { entries, conn }
    }

    pub(crate) fn entries(&self) -> &[Bookmark] {
        &self.entries
    }

    pub(crate) fn is_bookmarked(&self, ayah_number: u32) -> bool {
        self.entries.iter().any(|b| b.ayah_number == ayah_number)
    }

    /// Adds the verse if absent, otherwise removes it.
    ///
    /// Returns `true` when the verse is bookmarked afterwards.
    pub(crate) fn toggle(&mut self, surah: &Surah, ayah: &Ayah) -> bool {
        let added = match self
            .entries
            .iter()
            .position(|b| b.ayah_number == ayah.number)
        {
            Some(index) => {
                self.entries.remove(index);
                false
            }
            None => {
                self.entries.push(Bookmark::new(surah, ayah));
                true
            }
        };

        self.persist();
        added
    }

    /// Removes the entry at `index` in the displayed list.
    pub(crate) fn remove_at(&mut self, index: usize) -> Option<Bookmark> {
        if index >= self.entries.len() {
            return None;
        }

        let removed = self.entries.remove(index);
        self.persist();
        Some(removed)
    }

    fn persist(&mut self) {
        if let Some(conn) = self.conn.as_mut()
            && let Err(e) = db::replace_bookmarks(conn, &self.entries)
        {
            warn!(error = %e, "Failed to save bookmarks");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surah() -> Surah {
        Surah {
            number: 2,
            name: "البقرة".to_string(),
            english_name: "Al-Baqara".to_string(),
            english_name_translation: "The Cow".to_string(),
            number_of_ayahs: 286,
            revelation_type: "Medinan".to_string(),
        }
    }

    fn ayah(number: u32, in_surah: u32) -> Ayah {
        Ayah {
            number,
            number_in_surah: in_surah,
            surah_number: 2,
            arabic: "ar".to_string(),
            translation: "en".to_string(),
            audio: None,
        }
    }

    #[test]
    fn toggling_twice_restores_the_original_list() {
        let mut bookmarks = Bookmarks::open(Some(db::open_in_memory()));

        assert!(bookmarks.toggle(&surah(), &ayah(8, 1)));
        assert!(bookmarks.is_bookmarked(8));
        assert!(!bookmarks.toggle(&surah(), &ayah(8, 1)));
        assert!(!bookmarks.is_bookmarked(8));
        assert!(bookmarks.entries().is_empty());
    }

    #[test]
    fn changes_are_written_through() {
        let mut bookmarks = Bookmarks::open(Some(db::open_in_memory()));
        bookmarks.toggle(&surah(), &ayah(8, 1));
        bookmarks.toggle(&surah(), &ayah(9, 2));
        bookmarks.remove_at(0);

        let conn = bookmarks.conn.take().unwrap();
        let reopened = Bookmarks::open(Some(conn));
        let numbers: Vec<u32> = reopened.entries().iter().map(|b| b.ayah_number).collect();
        assert_eq!(numbers, vec![9]);
    }

    #[test]
    fn works_without_a_database() {
        let mut bookmarks = Bookmarks::open(None);
        assert!(bookmarks.toggle(&surah(), &ayah(8, 1)));
        assert_eq!(bookmarks.entries()[0].surah_english_name, "Al-Baqara");
        assert!(bookmarks.remove_at(5).is_none());
    }
}
