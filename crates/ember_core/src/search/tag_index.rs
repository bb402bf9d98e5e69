//! Tag occurrence index over Echoes.
//!
//! # Invariants
//! - Tags aggregate by exact stored string.
//! - Sorting is stable by count descending; equal counts keep the order in
//!   which the tag was first seen.
//! - At most [`MAX_TAG_EXAMPLES`] phrases are kept per tag, earliest first.

use crate::model::echo::Echo;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const MAX_TAG_EXAMPLES: usize = 3;

/// Default `N` for top-tag queries.
pub const DEFAULT_TOP_TAGS: usize = 5;

/// Aggregated occurrence of one tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSummary {
    pub tag: String,
    pub count: usize,
    pub examples: Vec<String>,
}

/// Counts every tag across `echoes` and ranks by count.
pub fn rank_tags(echoes: &[Echo]) -> Vec<TagSummary> {
    let mut summaries: Vec<TagSummary> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for echo in echoes {
        for tag in &echo.tags {
            let position = *positions.entry(tag.as_str()).or_insert_with(|| {
                summaries.push(TagSummary {
                    tag: tag.clone(),
                    count: 0,
                    examples: Vec::new(),
                });
                summaries.len() - 1
            });

            let summary = &mut summaries[position];
            summary.count += 1;
            if summary.examples.len() < MAX_TAG_EXAMPLES {
                summary.examples.push(echo.phrase.clone());
            }
        }
    }

    summaries.sort_by(|a, b| b.count.cmp(&a.count));
    summaries
}

/// First `limit` entries of [`rank_tags`].
pub fn top_tags(echoes: &[Echo], limit: usize) -> Vec<TagSummary> {
    let mut ranked = rank_tags(echoes);
    ranked.truncate(limit);
    ranked
}
