//! Core retrieval and matching engine for Ember memory records.
//!
//! Records of six kinds (Carves, Echoes, Spine entries, the Anchor, Figures
//! and Emberbank questions) are stored through a pluggable
//! [`StorageAdapter`] and queried through the filter pipeline, the tag
//! index and reflex matching.

pub mod config;
pub mod db;
pub mod filter;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod storage;

pub use config::CoreConfig;
pub use filter::{
    parse_timestamp_or_absent, EchoQuery, EmberbankQuery, FigureQuery, FilterOptions,
    FilterPipeline, Filterable, ListQuery, SpineQuery,
};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status};
pub use model::anchor::{Anchor, AnchorDraft, AnchorPatch};
pub use model::carve::{Carve, CarveDraft};
pub use model::echo::{Echo, EchoDraft};
pub use model::emberbank::{EmberbankDraft, EmberbankEntry};
pub use model::entity::{Entity, EntityId, EntityKind, Timestamp};
pub use model::figure::{Figure, FigureDraft};
pub use model::spine::{SpineDraft, SpineEntry};
pub use repo::entity_repo::{DeleteOutcome, EntityRepository, RepoError, RepoResult};
pub use search::reflex::{reflex_match, score_echoes, ReflexBundle, ScoredEcho};
pub use search::tag_index::{rank_tags, top_tags, TagSummary, DEFAULT_TOP_TAGS};
pub use service::anchor_service::{AnchorError, AnchorService};
pub use service::memory_service::{derive_echo_draft, MemoryService};
pub use storage::{MemoryAdapter, SqliteAdapter, StorageAdapter, StorageError, StoredRecord};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
