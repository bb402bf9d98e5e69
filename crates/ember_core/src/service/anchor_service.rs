//! Anchor singleton service.
//!
//! # Responsibility
//! - Keep the anchor collection at zero or one record.
//! - Merge truth/symbol/must-never-forget lists into the current anchor.
//!
//! # Invariants
//! - Both writes are single adapter operations
//!   ([`StorageAdapter::replace_all`], [`StorageAdapter::modify_by_id`]), so
//!   every service sharing one adapter is serialized by that adapter's
//!   per-kind lock or transaction, never by state held here.
//! - An adapter that keeps the default `replace_all` runs it as two phases
//!   (delete, then insert): a crash between them leaves no anchor.
//! - `merge_update` keeps the anchor id and timestamp.

use crate::model::anchor::{Anchor, AnchorDraft, AnchorPatch};
use crate::repo::entity_repo::{EntityRepository, RepoError, RepoResult};
use crate::storage::StorageAdapter;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug)]
pub enum AnchorError {
    /// Merge attempted while no anchor exists.
    AnchorNotFound,
    Repo(RepoError),
}

impl Display for AnchorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AnchorNotFound => write!(f, "anchor not found"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AnchorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::AnchorNotFound => None,
        }
    }
}

impl From<RepoError> for AnchorError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

pub struct AnchorService {
    repo: EntityRepository<Anchor>,
}

impl AnchorService {
    pub fn new(adapter: Arc<dyn StorageAdapter>) -> Self {
        Self {
            repo: EntityRepository::new(adapter),
        }
    }

    /// Returns the anchor, or `None` when absent.
    pub fn get(&self) -> RepoResult<Option<Anchor>> {
        Ok(self.repo.list()?.into_iter().next())
    }

    /// Makes a new anchor from `draft` the only one, dropping any existing.
    pub fn create_or_replace(&self, draft: AnchorDraft) -> Result<Anchor, AnchorError> {
        let started_at = Instant::now();
        // Every row goes, so a store holding stray duplicates is repaired too.
        let (anchor, replaced) = self.repo.replace_all(draft)?;

        info!(
            "event=anchor_replace module=anchor status=ok replaced={} duration_ms={}",
            replaced,
            started_at.elapsed().as_millis()
        );
        Ok(anchor)
    }

    /// Unions the supplied lists into the current anchor, in place.
    pub fn merge_update(&self, patch: &AnchorPatch) -> Result<Anchor, AnchorError> {
        let current = self.get()?.ok_or(AnchorError::AnchorNotFound)?;
        // A concurrent replace may remove `current` before the write lands.
        let merged = self
            .repo
            .modify(current.id, |stored| stored.merged(patch))?
            .ok_or(AnchorError::AnchorNotFound)?;

        info!(
            "event=anchor_merge module=anchor status=ok truths={} symbols={} must_never_forget={}",
            merged.truths.len(),
            merged.symbols.len(),
            merged.must_never_forget.len()
        );
        Ok(merged)
    }
}
