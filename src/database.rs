use crate::error::{Error, Result};
use crate::format::format_minutes;
use crate::timestamp;
use crate::tracker::ElapsedDurationTracker;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use tracing::debug;

/// A logged project time.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub id: i64,
    pub tag: Option<String>,
    pub start: String,
    pub end: String,
    pub elapsed_minutes: f64,
    pub logged_at: String,
}

impl Entry {
    pub fn tracker(&self) -> ElapsedDurationTracker {
        ElapsedDurationTracker::new(self.start.as_str(), self.end.as_str())
    }

    pub fn formatted(&self) -> String {
        format_minutes(self.elapsed_minutes)
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Entry> {
        Ok(Entry {
            id: row.get(0)?,
            tag: row.get(1)?,
            start: row.get(2)?,
            end: row.get(3)?,
            elapsed_minutes: row.get(4)?,
            logged_at: row.get(5)?,
        })
    }
}

const SELECT_ENTRY: &str =
    "SELECT id, tag, start_time, end_time, elapsed_minutes, logged_at FROM project_time";

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (creating if needed) the database file.
    pub fn open(path: &Path) -> Result<Database> {
        debug!(path = %path.display(), "opening database");
        Database::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Database> {
        Database::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Database> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS project_time (
                id                  INTEGER PRIMARY KEY,
                tag                 TEXT,
                start_time          TEXT NOT NULL,
                end_time            TEXT NOT NULL,
                elapsed_minutes     REAL NOT NULL,
                logged_at           TEXT NOT NULL
            )",
            [],
        )?;

        Ok(Database { conn })
    }

    /// Stores the tracker's span. Unavailable spans are refused with their cause.
    pub fn save_entry(&self, tag: Option<&str>, tracker: &ElapsedDurationTracker) -> Result<i64> {
        let minutes = tracker.elapsed().map_err(|e| e.clone())?;

        self.conn.execute(
            "INSERT INTO project_time (tag, start_time, end_time, elapsed_minutes, logged_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![tag, tracker.start(), tracker.end(), minutes, timestamp::now()],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!(id, minutes, "saved entry");
        Ok(id)
    }

    pub fn get_entry(&self, id: i64) -> Result<Entry> {
        let sql = format!("{} WHERE id = ?1", SELECT_ENTRY);
        self.conn
            .query_row(&sql, params![id], Entry::from_row)
            .optional()?
            .ok_or(Error::EntryNotFound(id))
    }

    /// Entries in insertion order, optionally only those with `tag`.
    pub fn get_entries(&self, tag: Option<&str>) -> Result<Vec<Entry>> {
        let sql = format!(
            "{} WHERE (?1 IS NULL OR tag = ?1) ORDER BY id",
            SELECT_ENTRY
        );
        let mut stmt = self.conn.prepare(&sql)?;

        let entries = stmt
            .query_map(params![tag], Entry::from_row)?
            .collect::<rusqlite::Result<Vec<Entry>>>()?;

        Ok(entries)
    }

    /// Rewrites an entry's span from `tracker`.
    pub fn update_entry(&self, id: i64, tracker: &ElapsedDurationTracker) -> Result<()> {
        let minutes = tracker.elapsed().map_err(|e| e.clone())?;

        let changed = self.conn.execute(
            "UPDATE project_time SET start_time = ?1, end_time = ?2, elapsed_minutes = ?3
             WHERE id = ?4",
            params![tracker.start(), tracker.end(), minutes, id],
        )?;

        if changed == 0 {
            return Err(Error::EntryNotFound(id));
        }
        debug!(id, minutes, "updated entry");
        Ok(())
    }

    pub fn remove_entry(&self, id: i64) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM project_time WHERE id = ?1", params![id])?;

        if changed == 0 {
            return Err(Error::EntryNotFound(id));
        }
        debug!(id, "removed entry");
        Ok(())
    }

    pub fn total_minutes(&self, tag: Option<&str>) -> Result<f64> {
        let total = self.conn.query_row(
            "SELECT COALESCE(SUM(elapsed_minutes), 0.0) FROM project_time
             WHERE (?1 IS NULL OR tag = ?1)",
            params![tag],
            |row| row.get(0),
        )?;

        Ok(total)
    }
}
