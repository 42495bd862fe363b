//! # SQLite
//!
//! Single-table store for anonymous submissions.
//!
//! ## Schema
//! - `feedback` table
//! - Fields: id (**integer**, autoincrement primary key), feedback_text
//!   (**text**), created_at (**text**, RFC 3339)
//!
//! Rows are only ever inserted and deleted. `AUTOINCREMENT` keeps deleted
//! ids from being handed out again.
use std::{
    fs::create_dir_all,
    path::Path,
    sync::{Arc, Mutex},
};

use rusqlite::Connection;
use serde::Serialize;

use super::error::AppError;

/// One stored submission, shaped for the wire.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: i64,
    pub feedback_text: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Validated page request for [`Database::list`].
#[derive(Debug, Clone)]
pub struct FeedbackQuery {
    pub search: Option<String>,
    pub sort: SortOrder,
    pub limit: i64,
    pub offset: i64,
}

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self, AppError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }

        Self::init(Connection::open(path)?)
    }

    /// Private per-instance database, used by tests.
    pub fn open_in_memory() -> Result<Self, AppError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, AppError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS feedback (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                feedback_text TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
            "#,
        )?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Inserts a trimmed submission and returns the assigned id.
    pub fn insert(&self, feedback_text: &str, created_at: &str) -> rusqlite::Result<i64> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO feedback (feedback_text, created_at) VALUES (?1, ?2)",
            (feedback_text, created_at),
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Number of rows matching the filter, before pagination.
    pub fn count(&self, search: Option<&str>) -> rusqlite::Result<u64> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT COUNT(*) FROM feedback WHERE feedback_text LIKE ?1",
            [like_pattern(search)],
            |row| row.get(0),
        )
    }

    /// One page of rows: filter, order by creation time (id as tiebreaker
    /// so same-timestamp rows keep insertion order), then offset and limit.
    pub fn list(&self, query: &FeedbackQuery) -> rusqlite::Result<Vec<Feedback>> {
        let direction = query.sort.as_sql();
        let sql = format!(
            "SELECT id, feedback_text, created_at FROM feedback \
             WHERE feedback_text LIKE ?1 \
             ORDER BY created_at {direction}, id {direction} \
             LIMIT ?2 OFFSET ?3"
        );

        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&sql)?;

        let rows = stmt.query_map(
            (like_pattern(query.search.as_deref()), query.limit, query.offset),
            |row| {
                Ok(Feedback {
                    id: row.get(0)?,
                    feedback_text: row.get(1)?,
                    created_at: row.get(2)?,
                })
            },
        )?;

        rows.collect()
    }

    /// Removes the row with the given id, returning the affected-row count.
    /// A missing id is not an error.
    pub fn delete(&self, id: i64) -> rusqlite::Result<usize> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM feedback WHERE id = ?1", [id])
    }
}

/// `LIKE` pattern for a contains match; no filter matches everything.
/// Wildcards in the needle are passed through as the frontend sends them.
fn like_pattern(search: Option<&str>) -> String {
    format!("%{}%", search.unwrap_or(""))
}
