//! Memory store facade.
//!
//! # Responsibility
//! - Own one repository per record kind over a single injected adapter.
//! - Expose filtered listings, tag ranking, reflex recall and anchor
//!   operations.
//! - Derive Echoes from Carves.
//!
//! # Invariants
//! - Listings are filtered in insertion order; "recent" listings sort by
//!   timestamp descending before filtering.
//! - Each call reads the adapter fresh; no results are cached.

use crate::config::CoreConfig;
use crate::db::DbResult;
use crate::filter::{
    EchoQuery, EmberbankQuery, FigureQuery, FilterOptions, ListQuery, SpineQuery,
};
use crate::model::anchor::{Anchor, AnchorDraft, AnchorPatch};
use crate::model::carve::Carve;
use crate::model::echo::{Echo, EchoDraft, DERIVED_PHRASE_MAX_CHARS};
use crate::model::emberbank::EmberbankEntry;
use crate::model::entity::{Entity, EntityId};
use crate::model::figure::Figure;
use crate::model::spine::SpineEntry;
use crate::repo::entity_repo::{EntityRepository, RepoResult};
use crate::search::reflex::{reflex_match, score_echoes, ReflexBundle, ScoredEcho};
use crate::search::tag_index::{rank_tags, top_tags, TagSummary};
use crate::service::anchor_service::{AnchorError, AnchorService};
use crate::storage::{MemoryAdapter, SqliteAdapter, StorageAdapter, StoredRecord};
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Facade over all record kinds sharing one storage adapter.
pub struct MemoryService {
    carves: EntityRepository<Carve>,
    echoes: EntityRepository<Echo>,
    spine: EntityRepository<SpineEntry>,
    figures: EntityRepository<Figure>,
    emberbank: EntityRepository<EmberbankEntry>,
    anchor: AnchorService,
}

impl MemoryService {
    /// Builds the service over an injected adapter.
    pub fn new(adapter: Arc<dyn StorageAdapter>) -> Self {
        Self {
            carves: EntityRepository::new(Arc::clone(&adapter)),
            echoes: EntityRepository::new(Arc::clone(&adapter)),
            spine: EntityRepository::new(Arc::clone(&adapter)),
            figures: EntityRepository::new(Arc::clone(&adapter)),
            emberbank: EntityRepository::new(Arc::clone(&adapter)),
            anchor: AnchorService::new(adapter),
        }
    }

    /// Isolated volatile store.
    pub fn in_memory(timeout: Duration) -> Self {
        Self::new(Arc::new(MemoryAdapter::new(timeout)))
    }

    /// SQLite store when `db_path` is configured, volatile otherwise.
    pub fn open(config: &CoreConfig) -> DbResult<Self> {
        let timeout = config.storage_timeout;
        match config.db_path.as_deref() {
            Some(path) => {
                let adapter = SqliteAdapter::open(path, timeout)?;
                info!("event=store_open module=service status=ok backend=sqlite");
                Ok(Self::new(Arc::new(adapter)))
            }
            None => {
                info!("event=store_open module=service status=ok backend=memory");
                Ok(Self::in_memory(timeout))
            }
        }
    }

    pub fn carves(&self) -> &EntityRepository<Carve> {
        &self.carves
    }

    pub fn echoes(&self) -> &EntityRepository<Echo> {
        &self.echoes
    }

    pub fn spine(&self) -> &EntityRepository<SpineEntry> {
        &self.spine
    }

    pub fn figures(&self) -> &EntityRepository<Figure> {
        &self.figures
    }

    pub fn emberbank(&self) -> &EntityRepository<EmberbankEntry> {
        &self.emberbank
    }

    pub fn list_carves(&self, options: &FilterOptions) -> RepoResult<Vec<Carve>> {
        list_with(&self.carves, options)
    }

    /// Newest Carves first, filtered, then truncated to `limit`.
    pub fn recent_carves(&self, options: &FilterOptions, limit: usize) -> RepoResult<Vec<Carve>> {
        let mut carves = self.carves.list_recent(usize::MAX)?;
        carves = ListQuery::<Carve>::pipeline(options).apply(carves);
        carves.truncate(limit);
        Ok(carves)
    }

    pub fn list_echoes(&self, query: &EchoQuery) -> RepoResult<Vec<Echo>> {
        list_with(&self.echoes, query)
    }

    pub fn list_spine(&self, query: &SpineQuery) -> RepoResult<Vec<SpineEntry>> {
        list_with(&self.spine, query)
    }

    pub fn list_figures(&self, query: &FigureQuery) -> RepoResult<Vec<Figure>> {
        list_with(&self.figures, query)
    }

    pub fn list_questions(&self, query: &EmberbankQuery) -> RepoResult<Vec<EmberbankEntry>> {
        list_with(&self.emberbank, query)
    }

    /// Marks a question resolved in place; `None` when it does not exist.
    pub fn resolve_question(&self, id: EntityId) -> RepoResult<Option<EmberbankEntry>> {
        let mut fields = StoredRecord::new();
        fields.insert("resolved".to_string(), Value::Bool(true));
        if !self.emberbank.update_fields(id, fields)? {
            return Ok(None);
        }
        self.emberbank.get(id)
    }

    /// Creates an Echo quoting the Carve; `None` when the Carve is missing.
    pub fn echo_from_carve(&self, carve_id: EntityId) -> RepoResult<Option<Echo>> {
        match self.carves.get(carve_id)? {
            Some(carve) => self.echoes.create(derive_echo_draft(&carve)).map(Some),
            None => Ok(None),
        }
    }

    /// All Echo tags ranked by occurrence.
    pub fn ranked_tags(&self) -> RepoResult<Vec<TagSummary>> {
        Ok(rank_tags(&self.echoes.list()?))
    }

    pub fn top_tags(&self, limit: usize) -> RepoResult<Vec<TagSummary>> {
        Ok(top_tags(&self.echoes.list()?, limit))
    }

    /// Echoes, Figures and Spine entries recalled by `context`.
    pub fn reflex(&self, context: &str) -> RepoResult<ReflexBundle> {
        if context.trim().is_empty() {
            return Ok(ReflexBundle::default());
        }
        Ok(reflex_match(
            context,
            &self.echoes.list()?,
            &self.figures.list()?,
            &self.spine.list()?,
        ))
    }

    /// Echoes ordered by overlap with `context`.
    pub fn scored_echoes(&self, context: &str) -> RepoResult<Vec<ScoredEcho>> {
        Ok(score_echoes(context, &self.echoes.list()?))
    }

    pub fn anchor(&self) -> RepoResult<Option<Anchor>> {
        self.anchor.get()
    }

    pub fn create_or_replace_anchor(&self, draft: AnchorDraft) -> Result<Anchor, AnchorError> {
        self.anchor.create_or_replace(draft)
    }

    pub fn merge_anchor(&self, patch: &AnchorPatch) -> Result<Anchor, AnchorError> {
        self.anchor.merge_update(patch)
    }
}

fn list_with<T, Q>(repo: &EntityRepository<T>, query: &Q) -> RepoResult<Vec<T>>
where
    T: Entity,
    Q: ListQuery<T>,
{
    Ok(query.pipeline().apply(repo.list()?))
}

/// Builds an Echo draft quoting `carve`.
///
/// Rules:
/// - `phrase`: first non-blank of `what_it_meant`, `what_i_witnessed`,
///   `title`; whitespace collapsed, capped at 140 characters.
/// - `tags`: the Carve tone, when present.
/// - `source`: the Carve id.
pub fn derive_echo_draft(carve: &Carve) -> EchoDraft {
    let source_text = [
        carve.what_it_meant.as_str(),
        carve.what_i_witnessed.as_str(),
        carve.title.as_str(),
    ]
    .into_iter()
    .find(|text| !text.trim().is_empty())
    .unwrap_or("");

    let normalized = WHITESPACE_RE.replace_all(source_text.trim(), " ");
    let phrase = normalized.chars().take(DERIVED_PHRASE_MAX_CHARS).collect();

    let tone = carve.tone.trim();
    let tags = if tone.is_empty() {
        Vec::new()
    } else {
        vec![tone.to_string()]
    };

    EchoDraft {
        phrase,
        tags,
        source: Some(carve.id),
    }
}
