//! Generic entity repository over [`StorageAdapter`].

use crate::model::entity::{Entity, EntityId};
use crate::storage::{StorageAdapter, StorageError, StoredRecord};
use chrono::Utc;
use log::debug;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;
use std::sync::Arc;
use uuid::Uuid;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for record persistence and decoding.
#[derive(Debug)]
pub enum RepoError {
    /// Adapter call failed or timed out. Terminal for this call only.
    StorageUnavailable(StorageError),
    /// A stored row could not be decoded into its record type.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StorageUnavailable(err) => write!(f, "storage unavailable: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted record: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::StorageUnavailable(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<StorageError> for RepoError {
    fn from(value: StorageError) -> Self {
        Self::StorageUnavailable(value)
    }
}

/// Result of a delete-by-id call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

/// Typed CRUD facade for one entity kind.
pub struct EntityRepository<T: Entity> {
    adapter: Arc<dyn StorageAdapter>,
    _kind: PhantomData<fn() -> T>,
}

impl<T: Entity> Clone for EntityRepository<T> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.adapter))
    }
}

impl<T: Entity> EntityRepository<T> {
    pub fn new(adapter: Arc<dyn StorageAdapter>) -> Self {
        Self {
            adapter,
            _kind: PhantomData,
        }
    }

    /// Creates one record with a fresh id and the current instant.
    pub fn create(&self, draft: T::Draft) -> RepoResult<T> {
        let entity = T::from_draft(Uuid::new_v4(), Utc::now(), draft);
        let record = encode(&entity)?;
        let id = entity.id().to_string();

        self.adapter.insert(T::KIND, &id, record)?;
        debug!(
            "event=entity_create module=repo status=ok kind={} id={}",
            T::KIND,
            id
        );
        Ok(entity)
    }

    /// Lists all records in insertion order.
    pub fn list(&self) -> RepoResult<Vec<T>> {
        self.adapter
            .select_all(T::KIND)?
            .into_iter()
            .map(decode)
            .collect()
    }

    /// Lists records newest first, truncated to `limit`.
    ///
    /// Records sharing a timestamp keep insertion order.
    pub fn list_recent(&self, limit: usize) -> RepoResult<Vec<T>> {
        let mut items = self.list()?;
        items.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
        items.truncate(limit);
        Ok(items)
    }

    pub fn get(&self, id: EntityId) -> RepoResult<Option<T>> {
        self.adapter
            .select_by_id(T::KIND, &id.to_string())?
            .map(decode)
            .transpose()
    }

    pub fn delete(&self, id: EntityId) -> RepoResult<DeleteOutcome> {
        let deleted = self.adapter.delete_by_id(T::KIND, &id.to_string())?;
        debug!(
            "event=entity_delete module=repo status=ok kind={} id={} found={}",
            T::KIND,
            id,
            deleted
        );
        Ok(if deleted {
            DeleteOutcome::Deleted
        } else {
            DeleteOutcome::NotFound
        })
    }

    /// Overwrites top-level fields of an existing record in place.
    ///
    /// `id` and `timestamp` are immutable and silently dropped from `fields`.
    /// Returns `false` when the record does not exist.
    pub(crate) fn update_fields(&self, id: EntityId, mut fields: StoredRecord) -> RepoResult<bool> {
        fields.remove("id");
        fields.remove("timestamp");
        let found = self
            .adapter
            .update_by_id(T::KIND, &id.to_string(), fields)?;
        debug!(
            "event=entity_update module=repo status=ok kind={} id={} found={}",
            T::KIND,
            id,
            found
        );
        Ok(found)
    }

    /// Makes a fresh record from `draft` the only one of its kind.
    ///
    /// Returns the new record and how many rows it displaced.
    pub(crate) fn replace_all(&self, draft: T::Draft) -> RepoResult<(T, usize)> {
        let entity = T::from_draft(Uuid::new_v4(), Utc::now(), draft);
        let record = encode(&entity)?;
        let id = entity.id().to_string();

        let removed = self.adapter.replace_all(T::KIND, &id, record)?;
        debug!(
            "event=entity_replace_all module=repo status=ok kind={} id={} removed={}",
            T::KIND,
            id,
            removed
        );
        Ok((entity, removed))
    }

    /// Read-modify-write of one record as a single adapter operation.
    ///
    /// `apply` sees the stored value; changes it makes to `id` or `timestamp`
    /// are not persisted. Returns `None` when the record does not exist.
    pub(crate) fn modify(
        &self,
        id: EntityId,
        mut apply: impl FnMut(T) -> T,
    ) -> RepoResult<Option<T>> {
        let mut outcome: Option<RepoResult<T>> = None;
        self.adapter
            .modify_by_id(T::KIND, &id.to_string(), &mut |record| {
                let staged = decode::<T>(record.clone())
                    .map(&mut apply)
                    .and_then(|entity| {
                        let mut fields = encode(&entity)?;
                        fields.remove("id");
                        fields.remove("timestamp");
                        Ok((entity, fields))
                    });
                match staged {
                    Ok((entity, fields)) => {
                        outcome = Some(Ok(entity));
                        Some(fields)
                    }
                    Err(err) => {
                        outcome = Some(Err(err));
                        None
                    }
                }
            })?;
        outcome.transpose()
    }
}

fn encode<T: Entity>(entity: &T) -> RepoResult<StoredRecord> {
    match serde_json::to_value(entity) {
        Ok(Value::Object(record)) => Ok(record),
        Ok(other) => Err(RepoError::InvalidData(format!(
            "{} record serialized to non-object `{other}`",
            T::KIND
        ))),
        Err(err) => Err(RepoError::InvalidData(format!(
            "{} record could not be serialized: {err}",
            T::KIND
        ))),
    }
}

fn decode<T: Entity>(record: StoredRecord) -> RepoResult<T> {
    serde_json::from_value(Value::Object(record))
        .map_err(|err| RepoError::InvalidData(format!("{} row: {err}", T::KIND)))
}

#[cfg(test)]
mod tests {
    use super::{DeleteOutcome, EntityRepository, RepoError};
    use crate::model::echo::{Echo, EchoDraft};
    use crate::model::entity::EntityKind;
    use crate::storage::{MemoryAdapter, StorageAdapter};
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;
    use uuid::Uuid;

    fn adapter() -> Arc<MemoryAdapter> {
        Arc::new(MemoryAdapter::new(Duration::from_secs(1)))
    }

    #[test]
    fn create_defaults_and_deduplicates_tags() {
        let repo = EntityRepository::<Echo>::new(adapter());
        let echo = repo
            .create(EchoDraft {
                phrase: "still here".to_string(),
                tags: vec!["loss".to_string(), "loss".to_string()],
                ..EchoDraft::default()
            })
            .unwrap();

        assert_eq!(echo.tags, vec!["loss"]);
        assert!(echo.source.is_none());
        assert_eq!(repo.get(echo.id).unwrap(), Some(echo));
    }

    #[test]
    fn delete_missing_returns_not_found() {
        let repo = EntityRepository::<Echo>::new(adapter());
        assert_eq!(
            repo.delete(Uuid::new_v4()).unwrap(),
            DeleteOutcome::NotFound
        );
    }

    #[test]
    fn undecodable_row_is_invalid_data() {
        let adapter = adapter();
        adapter
            .insert(
                EntityKind::Echo,
                "broken",
                json!({"id": "not-a-uuid"}).as_object().cloned().unwrap(),
            )
            .unwrap();

        let repo = EntityRepository::<Echo>::new(adapter);
        assert!(matches!(repo.list(), Err(RepoError::InvalidData(_))));
    }

    #[test]
    fn update_fields_keeps_identity() {
        let repo = EntityRepository::<Echo>::new(adapter());
        let echo = repo.create(EchoDraft::default()).unwrap();

        let fields = json!({"id": Uuid::new_v4().to_string(), "phrase": "renamed"})
            .as_object()
            .cloned()
            .unwrap();
        assert!(repo.update_fields(echo.id, fields).unwrap());

        let loaded = repo.get(echo.id).unwrap().unwrap();
        assert_eq!(loaded.id, echo.id);
        assert_eq!(loaded.phrase, "renamed");
    }

    #[test]
    fn replace_all_displaces_every_existing_row() {
        let repo = EntityRepository::<Echo>::new(adapter());
        repo.create(EchoDraft::default()).unwrap();
        repo.create(EchoDraft::default()).unwrap();

        let (echo, removed) = repo
            .replace_all(EchoDraft {
                phrase: "only one".to_string(),
                ..EchoDraft::default()
            })
            .unwrap();
        assert_eq!(removed, 2);
        assert_eq!(repo.list().unwrap(), vec![echo]);
    }

    #[test]
    fn modify_applies_to_stored_value() {
        let repo = EntityRepository::<Echo>::new(adapter());
        let echo = repo.create(EchoDraft::default()).unwrap();

        let modified = repo
            .modify(echo.id, |mut current| {
                current.phrase.push_str("again");
                current
            })
            .unwrap()
            .unwrap();
        assert_eq!(modified.phrase, "again");
        assert_eq!(repo.get(echo.id).unwrap(), Some(modified));

        assert!(repo.modify(Uuid::new_v4(), |current| current).unwrap().is_none());
    }

    #[test]
    fn modify_of_undecodable_row_leaves_it_untouched() {
        let adapter = adapter();
        let id = Uuid::new_v4();
        adapter
            .insert(
                EntityKind::Echo,
                &id.to_string(),
                json!({"id": id.to_string(), "timestamp": 7})
                    .as_object()
                    .cloned()
                    .unwrap(),
            )
            .unwrap();

        let repo = EntityRepository::<Echo>::new(adapter.clone());
        assert!(matches!(
            repo.modify(id, |current| current),
            Err(RepoError::InvalidData(_))
        ));
        let raw = adapter
            .select_by_id(EntityKind::Echo, &id.to_string())
            .unwrap()
            .unwrap();
        assert_eq!(raw["timestamp"], json!(7));
    }
}
