//! Carve: structured narrative memory record.

use crate::model::entity::{Entity, EntityId, EntityKind, Timestamp};
use serde::{Deserialize, Serialize};

/// Free-text narrative record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Carve {
    pub id: EntityId,
    pub timestamp: Timestamp,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub tone: String,
    #[serde(default)]
    pub what_i_witnessed: String,
    #[serde(default)]
    pub what_it_meant: String,
    /// Ordered, duplicates allowed.
    #[serde(default)]
    pub what_i_hold: Vec<String>,
    #[serde(default)]
    pub closing_ritual: String,
}

/// Creation input for [`Carve`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarveDraft {
    pub title: String,
    pub location: String,
    pub tone: String,
    pub what_i_witnessed: String,
    pub what_it_meant: String,
    pub what_i_hold: Vec<String>,
    pub closing_ritual: String,
}

impl Entity for Carve {
    type Draft = CarveDraft;

    const KIND: EntityKind = EntityKind::Carve;

    fn from_draft(id: EntityId, timestamp: Timestamp, draft: CarveDraft) -> Self {
        Self {
            id,
            timestamp,
            title: draft.title,
            location: draft.location,
            tone: draft.tone,
            what_i_witnessed: draft.what_i_witnessed,
            what_it_meant: draft.what_it_meant,
            what_i_hold: draft.what_i_hold,
            closing_ritual: draft.closing_ritual,
        }
    }

    fn id(&self) -> EntityId {
        self.id
    }

    fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}
