//! Shared identity contract for all record kinds.
//!
//! # Responsibility
//! - Name the storage collections ([`EntityKind`]).
//! - Let the generic repository mint ids/timestamps and decode records.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier shared by every record kind.
pub type EntityId = Uuid;

/// Creation instant, serialized as RFC 3339.
pub type Timestamp = DateTime<Utc>;

/// Storage collection for one record kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Carve,
    Echo,
    Spine,
    Anchor,
    Figure,
    Emberbank,
}

impl EntityKind {
    pub const COUNT: usize = 6;

    /// All kinds, in declaration order; `kind as usize` indexes this array.
    pub const ALL: [EntityKind; Self::COUNT] = [
        Self::Carve,
        Self::Echo,
        Self::Spine,
        Self::Anchor,
        Self::Figure,
        Self::Emberbank,
    ];

    /// Collection name used by storage adapters.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Carve => "carves",
            Self::Echo => "echoes",
            Self::Spine => "spine",
            Self::Anchor => "anchor",
            Self::Figure => "figures",
            Self::Emberbank => "emberbank",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted record kind.
///
/// The repository serializes `Self` into an adapter record and back, so the
/// serde shape is the storage shape.
pub trait Entity: Serialize + DeserializeOwned + Clone {
    /// Creation input with defaults for unspecified fields.
    type Draft: Default;

    const KIND: EntityKind;

    /// Builds the record from a draft plus the minted identity.
    fn from_draft(id: EntityId, timestamp: Timestamp, draft: Self::Draft) -> Self;

    fn id(&self) -> EntityId;

    fn timestamp(&self) -> Timestamp;
}

/// Removes duplicate values, keeping the first occurrence of each.
///
/// Comparison is case-sensitive; set fields keep their stored casing.
pub fn dedup_preserving_order(values: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|value| seen.insert(value.clone()))
        .collect()
}

/// Set union of `current` and `incoming`; `current` order is kept and new
/// values are appended in the order they arrive.
pub fn union_sets(current: &[String], incoming: &[String]) -> Vec<String> {
    dedup_preserving_order(current.iter().chain(incoming.iter()).cloned().collect())
}

#[cfg(test)]
mod tests {
    use super::{dedup_preserving_order, union_sets, EntityKind};

    #[test]
    fn kind_names_roundtrip() {
        for kind in EntityKind::ALL {
            assert_eq!(EntityKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(EntityKind::parse("atoms"), None);
    }

    #[test]
    fn dedup_keeps_first_occurrence_and_case() {
        let values = vec!["a".to_string(), "A".to_string(), "a".to_string()];
        assert_eq!(dedup_preserving_order(values), vec!["a", "A"]);
    }

    #[test]
    fn union_drops_duplicates() {
        let current = vec!["a".to_string()];
        let incoming = vec!["a".to_string(), "b".to_string()];
        assert_eq!(union_sets(&current, &incoming), vec!["a", "b"]);
    }
}
