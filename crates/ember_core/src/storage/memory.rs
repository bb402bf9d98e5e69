//! In-process storage adapter.
//!
//! Each entity kind has its own lock, so writes to one collection never
//! wait on another.

use super::{lock_for, StorageAdapter, StorageResult, StoredRecord};
use crate::model::entity::EntityKind;
use parking_lot::Mutex;
use std::time::Duration;

type Collection = Vec<(String, StoredRecord)>;

/// Volatile adapter, one isolated instance per store.
pub struct MemoryAdapter {
    collections: [Mutex<Collection>; EntityKind::COUNT],
    lock_timeout: Duration,
}

impl MemoryAdapter {
    pub fn new(lock_timeout: Duration) -> Self {
        Self {
            collections: std::array::from_fn(|_| Mutex::new(Vec::new())),
            lock_timeout,
        }
    }

    fn collection(&self, kind: EntityKind) -> &Mutex<Collection> {
        &self.collections[kind as usize]
    }
}

impl StorageAdapter for MemoryAdapter {
    fn insert(&self, kind: EntityKind, id: &str, record: StoredRecord) -> StorageResult<()> {
        let mut rows = lock_for(self.collection(kind), kind, self.lock_timeout)?;
        rows.push((id.to_string(), record));
        Ok(())
    }

    fn select_all(&self, kind: EntityKind) -> StorageResult<Vec<StoredRecord>> {
        let rows = lock_for(self.collection(kind), kind, self.lock_timeout)?;
        Ok(rows.iter().map(|(_, record)| record.clone()).collect())
    }

    fn select_by_id(&self, kind: EntityKind, id: &str) -> StorageResult<Option<StoredRecord>> {
        let rows = lock_for(self.collection(kind), kind, self.lock_timeout)?;
        Ok(rows
            .iter()
            .find(|(row_id, _)| row_id == id)
            .map(|(_, record)| record.clone()))
    }

    fn delete_by_id(&self, kind: EntityKind, id: &str) -> StorageResult<bool> {
        let mut rows = lock_for(self.collection(kind), kind, self.lock_timeout)?;
        let before = rows.len();
        rows.retain(|(row_id, _)| row_id != id);
        Ok(rows.len() != before)
    }

    fn update_by_id(
        &self,
        kind: EntityKind,
        id: &str,
        fields: StoredRecord,
    ) -> StorageResult<bool> {
        let mut rows = lock_for(self.collection(kind), kind, self.lock_timeout)?;
        let Some((_, record)) = rows.iter_mut().find(|(row_id, _)| row_id == id) else {
            return Ok(false);
        };
        record.extend(fields);
        Ok(true)
    }

    fn replace_all(
        &self,
        kind: EntityKind,
        id: &str,
        record: StoredRecord,
    ) -> StorageResult<usize> {
        let mut rows = lock_for(self.collection(kind), kind, self.lock_timeout)?;
        let removed = rows.len();
        rows.clear();
        rows.push((id.to_string(), record));
        Ok(removed)
    }

    fn modify_by_id(
        &self,
        kind: EntityKind,
        id: &str,
        apply: &mut dyn FnMut(&StoredRecord) -> Option<StoredRecord>,
    ) -> StorageResult<bool> {
        let mut rows = lock_for(self.collection(kind), kind, self.lock_timeout)?;
        let Some((_, record)) = rows.iter_mut().find(|(row_id, _)| row_id == id) else {
            return Ok(false);
        };
        if let Some(fields) = apply(record) {
            record.extend(fields);
        }
        Ok(true)
    }
}
