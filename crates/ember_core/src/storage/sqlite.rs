//! SQLite-backed storage adapter.
//!
//! # Invariants
//! - Rows live in one `records` table keyed by `(kind, id)`.
//! - `seq` is `AUTOINCREMENT`, so insertion order survives deletes and row
//!   ids are never reused.
//! - `update_by_id`, `modify_by_id` and `replace_all` each run inside one
//!   `IMMEDIATE` transaction, so they stay atomic across connections and
//!   processes sharing the file.

use super::{lock_for, StorageAdapter, StorageResult, StoredRecord};
use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::model::entity::EntityKind;
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use std::path::Path;
use std::time::Duration;

/// Durable adapter over a migrated SQLite connection.
pub struct SqliteAdapter {
    conn: Mutex<Connection>,
    timeout: Duration,
}

impl SqliteAdapter {
    /// Opens (and migrates) the database file at `path`.
    pub fn open(path: impl AsRef<Path>, timeout: Duration) -> DbResult<Self> {
        let conn = open_db(path, timeout)?;
        Ok(Self::from_connection(conn, timeout))
    }

    pub fn open_in_memory(timeout: Duration) -> DbResult<Self> {
        let conn = open_db_in_memory(timeout)?;
        Ok(Self::from_connection(conn, timeout))
    }

    /// Wraps a connection that already went through [`open_db`].
    pub fn from_connection(conn: Connection, timeout: Duration) -> Self {
        Self {
            conn: Mutex::new(conn),
            timeout,
        }
    }
}

impl StorageAdapter for SqliteAdapter {
    fn insert(&self, kind: EntityKind, id: &str, record: StoredRecord) -> StorageResult<()> {
        let body = serde_json::to_string(&record)?;
        let conn = lock_for(&self.conn, kind, self.timeout)?;
        conn.execute(
            "INSERT INTO records (kind, id, body) VALUES (?1, ?2, ?3);",
            params![kind.as_str(), id, body],
        )?;
        Ok(())
    }

    fn select_all(&self, kind: EntityKind) -> StorageResult<Vec<StoredRecord>> {
        let conn = lock_for(&self.conn, kind, self.timeout)?;
        let mut stmt =
            conn.prepare("SELECT body FROM records WHERE kind = ?1 ORDER BY seq ASC;")?;
        let mut rows = stmt.query([kind.as_str()])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            let body: String = row.get("body")?;
            records.push(serde_json::from_str(&body)?);
        }
        Ok(records)
    }

    fn select_by_id(&self, kind: EntityKind, id: &str) -> StorageResult<Option<StoredRecord>> {
        let conn = lock_for(&self.conn, kind, self.timeout)?;
        let body: Option<String> = conn
            .query_row(
                "SELECT body FROM records WHERE kind = ?1 AND id = ?2;",
                params![kind.as_str(), id],
                |row| row.get(0),
            )
            .optional()?;
        match body {
            Some(body) => Ok(Some(serde_json::from_str(&body)?)),
            None => Ok(None),
        }
    }

    fn delete_by_id(&self, kind: EntityKind, id: &str) -> StorageResult<bool> {
        let conn = lock_for(&self.conn, kind, self.timeout)?;
        let changed = conn.execute(
            "DELETE FROM records WHERE kind = ?1 AND id = ?2;",
            params![kind.as_str(), id],
        )?;
        Ok(changed > 0)
    }

    fn update_by_id(
        &self,
        kind: EntityKind,
        id: &str,
        fields: StoredRecord,
    ) -> StorageResult<bool> {
        let mut fields = Some(fields);
        self.modify_by_id(kind, id, &mut |_| fields.take())
    }

    fn replace_all(
        &self,
        kind: EntityKind,
        id: &str,
        record: StoredRecord,
    ) -> StorageResult<usize> {
        let body = serde_json::to_string(&record)?;
        let mut conn = lock_for(&self.conn, kind, self.timeout)?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let removed = tx.execute("DELETE FROM records WHERE kind = ?1;", [kind.as_str()])?;
        tx.execute(
            "INSERT INTO records (kind, id, body) VALUES (?1, ?2, ?3);",
            params![kind.as_str(), id, body],
        )?;
        tx.commit()?;
        Ok(removed)
    }

    fn modify_by_id(
        &self,
        kind: EntityKind,
        id: &str,
        apply: &mut dyn FnMut(&StoredRecord) -> Option<StoredRecord>,
    ) -> StorageResult<bool> {
        let mut conn = lock_for(&self.conn, kind, self.timeout)?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let body: Option<String> = tx
            .query_row(
                "SELECT body FROM records WHERE kind = ?1 AND id = ?2;",
                params![kind.as_str(), id],
                |row| row.get(0),
            )
            .optional()?;
        let Some(body) = body else {
            return Ok(false);
        };

        let mut record: StoredRecord = serde_json::from_str(&body)?;
        let Some(fields) = apply(&record) else {
            return Ok(true);
        };
        record.extend(fields);
        tx.execute(
            "UPDATE records SET body = ?3 WHERE kind = ?1 AND id = ?2;",
            params![kind.as_str(), id, serde_json::to_string(&record)?],
        )?;
        tx.commit()?;
        Ok(true)
    }
}
