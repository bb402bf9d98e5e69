//! Storage adapter contract and bundled implementations.
//!
//! # Responsibility
//! - Define the row-level access every repository goes through.
//! - Hide whether records live in process memory or in SQLite.
//!
//! # Invariants
//! - `select_all` returns records in insertion order.
//! - Every call is bounded by the adapter's configured timeout and fails
//!   with [`StorageError::Timeout`] instead of blocking indefinitely.
//! - Adapters never retry.

use crate::db::DbError;
use crate::model::entity::EntityKind;
use parking_lot::{Mutex, MutexGuard};
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

mod memory;
mod sqlite;

pub use memory::MemoryAdapter;
pub use sqlite::SqliteAdapter;

/// One stored row: a JSON object keyed by serialized field name.
pub type StoredRecord = Map<String, Value>;

pub type StorageResult<T> = Result<T, StorageError>;

/// Adapter failure. Callers treat every variant as "storage unavailable".
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    Timeout { kind: EntityKind, waited: Duration },
    Encoding(serde_json::Error),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Timeout { kind, waited } => write!(
                f,
                "storage for `{kind}` did not respond within {}ms",
                waited.as_millis()
            ),
            Self::Encoding(err) => write!(f, "stored record encoding failed: {err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encoding(err) => Some(err),
            Self::Timeout { .. } => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encoding(value)
    }
}

/// Row-level access per entity collection.
pub trait StorageAdapter: Send + Sync {
    /// Appends one record under `id`.
    fn insert(&self, kind: EntityKind, id: &str, record: StoredRecord) -> StorageResult<()>;
    /// Returns every record of `kind` in insertion order.
    fn select_all(&self, kind: EntityKind) -> StorageResult<Vec<StoredRecord>>;
    fn select_by_id(&self, kind: EntityKind, id: &str) -> StorageResult<Option<StoredRecord>>;
    /// Returns `false` when no record with `id` exists.
    fn delete_by_id(&self, kind: EntityKind, id: &str) -> StorageResult<bool>;
    /// Overwrites the given top-level fields in place. Returns `false` when
    /// no record with `id` exists.
    fn update_by_id(&self, kind: EntityKind, id: &str, fields: StoredRecord)
        -> StorageResult<bool>;

    /// Empties the `kind` collection and inserts `record` as its only row.
    /// Returns how many rows were removed.
    ///
    /// The default runs delete-then-insert as separate calls: a crash between
    /// the phases leaves the collection empty, and concurrent callers may
    /// interleave. Both bundled adapters override it with one critical section.
    fn replace_all(
        &self,
        kind: EntityKind,
        id: &str,
        record: StoredRecord,
    ) -> StorageResult<usize> {
        let mut removed = 0;
        for existing in self.select_all(kind)? {
            let Some(existing_id) = existing.get("id").and_then(Value::as_str) else {
                continue;
            };
            if self.delete_by_id(kind, existing_id)? {
                removed += 1;
            }
        }
        self.insert(kind, id, record)?;
        Ok(removed)
    }

    /// Reads the record under `id`, hands it to `apply` and overwrites the
    /// fields `apply` returns. `None` from `apply` leaves the row untouched.
    /// Returns `false` when no record with `id` exists.
    ///
    /// The default is a plain read followed by [`StorageAdapter::update_by_id`]
    /// and is not atomic; both bundled adapters override it.
    fn modify_by_id(
        &self,
        kind: EntityKind,
        id: &str,
        apply: &mut dyn FnMut(&StoredRecord) -> Option<StoredRecord>,
    ) -> StorageResult<bool> {
        let Some(current) = self.select_by_id(kind, id)? else {
            return Ok(false);
        };
        match apply(&current) {
            Some(fields) => self.update_by_id(kind, id, fields),
            None => Ok(true),
        }
    }
}

/// Acquires `mutex` or gives up once `timeout` elapses.
pub(crate) fn lock_for<T>(
    mutex: &Mutex<T>,
    kind: EntityKind,
    timeout: Duration,
) -> StorageResult<MutexGuard<'_, T>> {
    mutex.try_lock_for(timeout).ok_or(StorageError::Timeout {
        kind,
        waited: timeout,
    })
}
