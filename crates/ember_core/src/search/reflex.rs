//! Reflex matching: associative recall from free-text context.
//!
//! This is containment only, not relevance ranking. A record matches when
//! one of its short fields occurs inside the context; results keep
//! collection order and are capped per kind. [`score_echoes`] is a separate
//! overlap-count extension for callers that want an ordering.
//!
//! # Invariants
//! - An empty (or whitespace-only) context matches nothing.
//! - Empty needles never match.

use crate::model::echo::Echo;
use crate::model::figure::Figure;
use crate::model::spine::SpineEntry;
use serde::{Deserialize, Serialize};

pub const MAX_REFLEX_ECHOES: usize = 2;
pub const MAX_REFLEX_FIGURES: usize = 1;
pub const MAX_REFLEX_SPINE: usize = 1;

/// Records recalled for one context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReflexBundle {
    pub echoes: Vec<Echo>,
    pub figures: Vec<Figure>,
    pub spine: Vec<SpineEntry>,
}

impl ReflexBundle {
    pub fn is_empty(&self) -> bool {
        self.echoes.is_empty() && self.figures.is_empty() && self.spine.is_empty()
    }
}

/// Echo with its overlap score against a context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredEcho {
    pub echo: Echo,
    pub score: usize,
}

/// Collects records whose fields occur in `context`.
pub fn reflex_match(
    context: &str,
    echoes: &[Echo],
    figures: &[Figure],
    spine: &[SpineEntry],
) -> ReflexBundle {
    let Some(context) = normalize_context(context) else {
        return ReflexBundle::default();
    };

    ReflexBundle {
        echoes: echoes
            .iter()
            .filter(|echo| echo_score(&context, echo) > 0)
            .take(MAX_REFLEX_ECHOES)
            .cloned()
            .collect(),
        figures: figures
            .iter()
            .filter(|figure| {
                occurs_in(&context, &figure.name) || occurs_in(&context, &figure.impact)
            })
            .take(MAX_REFLEX_FIGURES)
            .cloned()
            .collect(),
        spine: spine
            .iter()
            .filter(|entry| occurs_in(&context, &entry.statement))
            .take(MAX_REFLEX_SPINE)
            .cloned()
            .collect(),
    }
}

/// Scores each Echo by matching tags plus one for phrase containment.
///
/// Returns only positive scores, highest first; ties keep collection order.
pub fn score_echoes(context: &str, echoes: &[Echo]) -> Vec<ScoredEcho> {
    let Some(context) = normalize_context(context) else {
        return Vec::new();
    };

    let mut scored: Vec<ScoredEcho> = echoes
        .iter()
        .filter_map(|echo| {
            let score = echo_score(&context, echo);
            (score > 0).then(|| ScoredEcho {
                echo: echo.clone(),
                score,
            })
        })
        .collect();
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored
}

fn normalize_context(context: &str) -> Option<String> {
    if context.trim().is_empty() {
        None
    } else {
        Some(context.to_lowercase())
    }
}

fn echo_score(context_lower: &str, echo: &Echo) -> usize {
    let tag_hits = echo
        .tags
        .iter()
        .filter(|tag| occurs_in(context_lower, tag))
        .count();
    let phrase_hit = usize::from(occurs_in(context_lower, &echo.phrase));
    tag_hits + phrase_hit
}

/// Whether `needle` (any case) occurs inside the lower-cased context.
fn occurs_in(context_lower: &str, needle: &str) -> bool {
    !needle.trim().is_empty() && context_lower.contains(&needle.to_lowercase())
}
