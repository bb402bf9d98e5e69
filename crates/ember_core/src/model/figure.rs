//! Figure: a person of significance.

use crate::model::entity::{Entity, EntityId, EntityKind, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Figure {
    pub id: EntityId,
    pub timestamp: Timestamp,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub impact: String,
    /// Ordered, duplicates allowed.
    #[serde(default)]
    pub truths_held: Vec<String>,
    #[serde(default)]
    pub symbolic_object: String,
    #[serde(default)]
    pub relationship_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FigureDraft {
    pub name: String,
    pub impact: String,
    pub truths_held: Vec<String>,
    pub symbolic_object: String,
    pub relationship_type: String,
}

impl Entity for Figure {
    type Draft = FigureDraft;

    const KIND: EntityKind = EntityKind::Figure;

    fn from_draft(id: EntityId, timestamp: Timestamp, draft: FigureDraft) -> Self {
        Self {
            id,
            timestamp,
            name: draft.name,
            impact: draft.impact,
            truths_held: draft.truths_held,
            symbolic_object: draft.symbolic_object,
            relationship_type: draft.relationship_type,
        }
    }

    fn id(&self) -> EntityId {
        self.id
    }

    fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}
