//! Spine entry: durable belief or commitment.

use crate::model::entity::{dedup_preserving_order, Entity, EntityId, EntityKind, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpineEntry {
    pub id: EntityId,
    pub timestamp: Timestamp,
    #[serde(default)]
    pub statement: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub origin: String,
    /// Whether the statement is held as a vow.
    #[serde(default)]
    pub vow: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpineDraft {
    pub statement: String,
    pub tags: Vec<String>,
    pub origin: String,
    pub vow: bool,
}

impl Entity for SpineEntry {
    type Draft = SpineDraft;

    const KIND: EntityKind = EntityKind::Spine;

    fn from_draft(id: EntityId, timestamp: Timestamp, draft: SpineDraft) -> Self {
        Self {
            id,
            timestamp,
            statement: draft.statement,
            tags: dedup_preserving_order(draft.tags),
            origin: draft.origin,
            vow: draft.vow,
        }
    }

    fn id(&self) -> EntityId {
        self.id
    }

    fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}
