//! Echo: short quotable fragment.

use crate::model::entity::{dedup_preserving_order, Entity, EntityId, EntityKind, Timestamp};
use serde::{Deserialize, Serialize};

/// Maximum phrase length, in characters, when an Echo is derived from a Carve.
pub const DERIVED_PHRASE_MAX_CHARS: usize = 140;

/// Short fragment, optionally tagged and linked to its source Carve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Echo {
    pub id: EntityId,
    pub timestamp: Timestamp,
    #[serde(default)]
    pub phrase: String,
    /// Set semantics; stored casing is kept.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Source Carve id. Not cleared when that Carve is deleted.
    #[serde(default)]
    pub source: Option<EntityId>,
}

/// Creation input for [`Echo`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EchoDraft {
    pub phrase: String,
    pub tags: Vec<String>,
    pub source: Option<EntityId>,
}

impl Entity for Echo {
    type Draft = EchoDraft;

    const KIND: EntityKind = EntityKind::Echo;

    fn from_draft(id: EntityId, timestamp: Timestamp, draft: EchoDraft) -> Self {
        Self {
            id,
            timestamp,
            phrase: draft.phrase,
            tags: dedup_preserving_order(draft.tags),
            source: draft.source,
        }
    }

    fn id(&self) -> EntityId {
        self.id
    }

    fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}
