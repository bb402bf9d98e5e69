//! Filter pipeline over listed records.
//!
//! # Responsibility
//! - Turn caller filter options into predicates and apply them in one pass.
//! - Keep the "malformed timestamp means no bound" policy in one helper
//!   ([`parse_timestamp_or_absent`]).
//!
//! # Invariants
//! - Output order equals input order.
//! - No options means the input is returned unchanged.
//! - Substring matching is case-insensitive plain containment, so short
//!   needles can hit inside longer words ("art" matches "heart").

mod fields;
mod pipeline;
mod queries;
mod timestamp;

pub use fields::Filterable;
pub use pipeline::FilterPipeline;
pub use queries::{EchoQuery, EmberbankQuery, FigureQuery, FilterOptions, ListQuery, SpineQuery};
pub use timestamp::parse_timestamp_or_absent;

/// Case-insensitive containment of `needle_lower` (already lower-cased).
pub(crate) fn contains_lowered(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Case-insensitive exact membership of `tag` in `tags`.
pub(crate) fn has_tag(tags: &[String], tag: &str) -> bool {
    let wanted = tag.to_lowercase();
    tags.iter().any(|candidate| candidate.to_lowercase() == wanted)
}

/// Empty or whitespace-only option strings behave as if the option was not
/// supplied.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.trim().is_empty())
}
