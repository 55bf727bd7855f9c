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

//! Data access layer.
//!
//! This module handles all interactions with the SQLite database, which
//! holds the user's bookmarks.
//!
//! # Tables
//!
//! * `bookmarks` - Saved verses, keyed by global verse number.

mod model;

use anyhow::{Context, Result};
use rusqlite::{Connection, params};

use crate::model::Bookmark;

/// Opens a connection to the SQLite database and configures it.
///
/// This function performs the following setup:
/// * **WAL Mode**: Enables Write-Ahead Logging so a crash mid-write cannot
///   corrupt the file.
/// * **Schema**: Executes [`create_schema`] to ensure all tables exist.
///
/// # Arguments
///
/// * `path` - The file system path to the SQLite database file.
///
/// # Errors
///
/// Returns an error if:
/// * The database file cannot be opened.
/// * The initial PRAGMA configurations fail.
/// * The schema initialization fails.
pub(crate) fn init_db(path: &str) -> Result<Connection> {
    let conn = Connection::open(path).with_context(|| format!("Failed to open {path}"))?;

    let journal_mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |r| r.get(0))?;
    if journal_mode != "wal" {
        anyhow::bail!(
            "Failed to switch to WAL mode. Current mode: {}",
            journal_mode
        );
    }

    conn.execute_batch("PRAGMA synchronous = NORMAL;")?;

    create_schema(&conn)?;

    Ok(conn)
}

/// Create the database schema.
///
/// # Errors
///
/// Returns an error if the transaction fails, if there are permission issues
/// with the database file, or if the SQL syntax is invalid.
fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "BEGIN;

        CREATE TABLE IF NOT EXISTS bookmarks (
            ayah_number INTEGER PRIMARY KEY,
            surah_number INTEGER NOT NULL,
            surah_name TEXT NOT NULL,
            surah_english_name TEXT NOT NULL,
            number_in_surah INTEGER NOT NULL,
            arabic_text TEXT NOT NULL,
            translation_text TEXT NOT NULL,
            position INTEGER NOT NULL
        );

        COMMIT;",
    )
    .context("Failed to create schema")
}

/// Fetches all bookmarks in the order they were saved.
pub(crate) fn load_bookmarks(conn: &Connection) -> Result<Vec<Bookmark>> {
    let mut stmt = conn.prepare_cached(
        "SELECT ayah_number, surah_number, surah_name, surah_english_name,
                number_in_surah, arabic_text, translation_text
         FROM bookmarks
         ORDER BY position",
    )?;

    let results = stmt
        .query_map([], Bookmark::from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(results)
}

/// Replaces the stored bookmarks with `bookmarks`.
///
/// The whole list is rewritten in a single transaction, so readers never see
/// a partial update.
pub(crate) fn replace_bookmarks(conn: &mut Connection, bookmarks: &[Bookmark]) -> Result<()> {
    let tx = conn.transaction()?;

    tx.execute("DELETE FROM bookmarks", [])?;
    {
        let mut stmt = tx.prepare_cached(
            "INSERT INTO bookmarks (
                ayah_number, surah_number, surah_name, surah_english_name,
                number_in_surah, arabic_text, translation_text, position
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )?;

        for (position, bookmark) in bookmarks.iter().enumerate() {
            stmt.execute(params![
                bookmark.ayah_number,
                bookmark.surah_number,
                bookmark.surah_name,
                bookmark.surah_english_name,
                bookmark.number_in_surah,
                bookmark.arabic_text,
                bookmark.translation_text,
                position as i64,
            ])?;
        }
    }

    tx.commit().context("Failed to save bookmarks")
}

#[cfg(test)]
pub(crate) fn open_in_memory() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    create_schema(&conn).unwrap();
    conn
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bookmark(ayah_number: u32) -> Bookmark {
        Bookmark {
            ayah_number,
            surah_number: 1,
            surah_name: "الفاتحة".to_string(),
            surah_english_name: "Al-Faatiha".to_string(),
            number_in_surah: ayah_number,
            arabic_text: format!("ar-{ayah_number}"),
            translation_text: format!("en-{ayah_number}"),
        }
    }

    #[test]
    fn replace_keeps_order_and_drops_removed_rows() {
        let mut conn = open_in_memory();

        replace_bookmarks(&mut conn, &[bookmark(3), bookmark(1), bookmark(2)]).unwrap();
        replace_bookmarks(&mut conn, &[bookmark(3), bookmark(2)]).unwrap();

        let loaded = load_bookmarks(&conn).unwrap();
        let numbers: Vec<u32> = loaded.iter().map(|b| b.ayah_number).collect();
        assert_eq!(numbers, vec![3, 2]);
        assert_eq!(loaded[0].translation_text, "en-3");
    }

    #[test]
    fn schema_creation_is_idempotent() {
        let conn = open_in_memory();
        create_schema(&conn).unwrap();
        assert!(load_bookmarks(&conn).unwrap().is_empty());
    }

    #[test]
    fn file_database_uses_wal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tartil.db");
        let mut conn = init_db(path.to_str().unwrap()).unwrap();

        replace_bookmarks(&mut conn, &[bookmark(7)]).unwrap();
        drop(conn);

        let conn = init_db(path.to_str().unwrap()).unwrap();
        assert_eq!(load_bookmarks(&conn).unwrap(), vec![bookmark(7)]);
    }
}
