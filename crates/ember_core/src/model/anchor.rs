//! Anchor: the singleton identity record.
//!
//! # Invariants
//! - The anchor collection holds zero or one record; see
//!   `service::anchor_service` for the operations that keep it that way.
//! - `truths`, `symbols` and `must_never_forget` have set semantics.

use crate::model::entity::{
    dedup_preserving_order, union_sets, Entity, EntityId, EntityKind, Timestamp,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Anchor {
    pub id: EntityId,
    pub timestamp: Timestamp,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub profession: String,
    #[serde(default)]
    pub truths: Vec<String>,
    #[serde(default)]
    pub symbols: Vec<String>,
    #[serde(default)]
    pub must_never_forget: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnchorDraft {
    pub name: String,
    pub role: String,
    pub profession: String,
    pub truths: Vec<String>,
    pub symbols: Vec<String>,
    pub must_never_forget: Vec<String>,
}

/// Partial list values merged into the existing anchor.
///
/// `None` leaves the field untouched; `Some` is unioned in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnchorPatch {
    #[serde(default)]
    pub truths: Option<Vec<String>>,
    #[serde(default)]
    pub symbols: Option<Vec<String>>,
    #[serde(default)]
    pub must_never_forget: Option<Vec<String>>,
}

impl Anchor {
    /// Returns a copy with the patch lists unioned into this record.
    ///
    /// Identity and scalar fields are unchanged.
    pub fn merged(&self, patch: &AnchorPatch) -> Anchor {
        let merge = |current: &[String], incoming: &Option<Vec<String>>| match incoming {
            Some(values) => union_sets(current, values),
            None => current.to_vec(),
        };

        Anchor {
            truths: merge(&self.truths, &patch.truths),
            symbols: merge(&self.symbols, &patch.symbols),
            must_never_forget: merge(&self.must_never_forget, &patch.must_never_forget),
            ..self.clone()
        }
    }
}

impl Entity for Anchor {
    type Draft = AnchorDraft;

    const KIND: EntityKind = EntityKind::Anchor;

    fn from_draft(id: EntityId, timestamp: Timestamp, draft: AnchorDraft) -> Self {
        Self {
            id,
            timestamp,
            name: draft.name,
            role: draft.role,
            profession: draft.profession,
            truths: dedup_preserving_order(draft.truths),
            symbols: dedup_preserving_order(draft.symbols),
            must_never_forget: dedup_preserving_order(draft.must_never_forget),
        }
    }

    fn id(&self) -> EntityId {
        self.id
    }

    fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}
