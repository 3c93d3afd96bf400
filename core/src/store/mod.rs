//! SQLite persistence layer — a key-value document store.
//!
//! RULE: Only the store talks to the database.
//! Everything is a JSON document addressed by (collection, doc_id).
//! Writes are last-write-wins per document; there are no
//! cross-document transactions.

use crate::{
    config::StoreSettings,
    error::{DeskError, DeskResult},
};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

mod planning;
mod roster;
mod rules;
mod schedule;

pub const ORG_COLLECTION: &str = "org";
pub const ORG_CHART_DOC: &str = "chart";
pub const RULE_COLLECTION: &str = "rules";
pub const SCHEDULE_COLLECTION: &str = "schedules";
pub const PLANNING_COLLECTION: &str = "planning";

pub struct DeskStore {
    conn: Connection,
    path: Option<String>, // None for :memory:, Some(path) for file
}

impl DeskStore {
    pub fn open(path: &str) -> DeskResult<Self> {
        Self::open_with(path, &StoreSettings::default())
    }

    pub fn open_with(path: &str, settings: &StoreSettings) -> DeskResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // Shared-memory and :memory: databases ignore the journal mode.
        let _ = conn.execute_batch(&format!("PRAGMA journal_mode={};", settings.journal_mode));
        Ok(Self {
            conn,
            path: Some(path.to_string()),
        })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> DeskResult<Self> {
        let conn = Connection::open(":memory:")?;
        Ok(Self { conn, path: None })
    }

    /// Reopen a new connection to the same database.
    /// For in-memory databases, this returns a new in-memory database (isolated).
    pub fn reopen(&self) -> DeskResult<Self> {
        match &self.path {
            Some(p) => Self::open(p),
            None => Self::in_memory(),
        }
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> DeskResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_documents.sql"))?;
        Ok(())
    }

    // ── Documents ──────────────────────────────────────────────

    pub fn get_raw(&self, collection: &str, doc_id: &str) -> DeskResult<Option<Value>> {
        let body: Option<String> = self
            .conn
            .query_row(
                "SELECT body FROM document WHERE collection = ?1 AND doc_id = ?2",
                params![collection, doc_id],
                |row| row.get(0),
            )
            .optional()?;
        match body {
            Some(b) => Ok(Some(serde_json::from_str(&b)?)),
            None => Ok(None),
        }
    }

    pub fn get_doc<T: DeserializeOwned>(&self, collection: &str, doc_id: &str) -> DeskResult<Option<T>> {
        match self.get_raw(collection, doc_id)? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Fetch a document that must exist.
    pub fn require_doc<T: DeserializeOwned>(&self, collection: &str, doc_id: &str) -> DeskResult<T> {
        self.get_doc(collection, doc_id)?
            .ok_or_else(|| DeskError::DocumentNotFound {
                collection: collection.to_string(),
                doc_id: doc_id.to_string(),
            })
    }

    /// Replace the whole document.
    pub fn set_doc<T: Serialize>(&self, collection: &str, doc_id: &str, doc: &T) -> DeskResult<()> {
        let body = serde_json::to_string(doc)?;
        self.write_body(collection, doc_id, &body)
    }

    /// Merge `patch` into the stored document. Nested objects merge key by
    /// key; any other value (arrays included) replaces what was there.
    /// A missing document is created from the patch.
    pub fn merge_doc(&self, collection: &str, doc_id: &str, patch: Value) -> DeskResult<()> {
        let merged = match self.get_raw(collection, doc_id)? {
            Some(mut current) => {
                merge_json(&mut current, patch);
                current
            }
            None => patch,
        };
        self.write_body(collection, doc_id, &serde_json::to_string(&merged)?)
    }

    /// Returns false when there was nothing to delete.
    pub fn delete_doc(&self, collection: &str, doc_id: &str) -> DeskResult<bool> {
        let n = self.conn.execute(
            "DELETE FROM document WHERE collection = ?1 AND doc_id = ?2",
            params![collection, doc_id],
        )?;
        Ok(n > 0)
    }

    /// All `(doc_id, body)` pairs of a collection in insertion order.
    pub fn list_raw(&self, collection: &str) -> DeskResult<Vec<(String, String)>> {
        let mut stmt = self.conn.prepare(
            "SELECT doc_id, body FROM document WHERE collection = ?1 ORDER BY rowid ASC",
        )?;
        let rows = stmt
            .query_map(params![collection], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn doc_count(&self, collection: &str) -> DeskResult<i64> {
        self.conn
            .query_row(
                "SELECT COUNT(*) FROM document WHERE collection = ?1",
                params![collection],
                |row| row.get(0),
            )
            .map_err(Into::into)
    }

    /// Upsert that keeps the row's position, so edits stay in place.
    fn write_body(&self, collection: &str, doc_id: &str, body: &str) -> DeskResult<()> {
        self.conn.execute(
            "INSERT INTO document (collection, doc_id, body, updated_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(collection, doc_id) DO UPDATE SET
                body = excluded.body,
                updated_at = excluded.updated_at",
            params![collection, doc_id, body, chrono::Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}

fn merge_json(target: &mut Value, patch: Value) {
    match (target, patch) {
        (Value::Object(dst), Value::Object(src)) => {
            for (key, value) in src {
                match dst.get_mut(&key) {
                    Some(existing) => merge_json(existing, value),
                    None => {
                        dst.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
