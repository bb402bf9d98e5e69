//! Emberbank entry: an open, possibly unresolved question.

use crate::model::entity::{dedup_preserving_order, Entity, EntityId, EntityKind, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmberbankEntry {
    pub id: EntityId,
    pub timestamp: Timestamp,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub resolved: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmberbankDraft {
    pub question: String,
    pub context: String,
    pub tags: Vec<String>,
    pub resolved: bool,
}

impl Entity for EmberbankEntry {
    type Draft = EmberbankDraft;

    const KIND: EntityKind = EntityKind::Emberbank;

    fn from_draft(id: EntityId, timestamp: Timestamp, draft: EmberbankDraft) -> Self {
        Self {
            id,
            timestamp,
            question: draft.question,
            context: draft.context,
            tags: dedup_preserving_order(draft.tags),
            resolved: draft.resolved,
        }
    }

    fn id(&self) -> EntityId {
        self.id
    }

    fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}
