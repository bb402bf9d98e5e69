//! Filter option sets and their translation into pipelines.

use super::fields::Filterable;
use super::pipeline::FilterPipeline;
use super::timestamp::parse_timestamp_or_absent;
use super::{contains_lowered, has_tag, non_empty};
use crate::model::echo::Echo;
use crate::model::emberbank::EmberbankEntry;
use crate::model::figure::Figure;
use crate::model::spine::SpineEntry;
use serde::{Deserialize, Serialize};

/// Builds the predicate pipeline for one record kind.
pub trait ListQuery<T> {
    fn pipeline(&self) -> FilterPipeline<T>;
}

/// Options shared by every kind; the full option set for Carve listing.
///
/// Values arrive as raw caller strings. `after`/`before` are exclusive and
/// are dropped when they do not parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub tone: Option<String>,
    pub location: Option<String>,
    pub after: Option<String>,
    pub before: Option<String>,
    pub contains: Option<String>,
}

impl<T: Filterable + 'static> ListQuery<T> for FilterOptions {
    fn pipeline(&self) -> FilterPipeline<T> {
        let mut pipeline = FilterPipeline::new();

        if let Some(tone) = non_empty(&self.tone) {
            let needle = tone.to_lowercase();
            pipeline.push(move |item: &T| {
                item.tone()
                    .is_some_and(|value| contains_lowered(value, &needle))
            });
        }

        if let Some(location) = non_empty(&self.location) {
            let needle = location.to_lowercase();
            pipeline.push(move |item: &T| {
                item.location()
                    .is_some_and(|value| contains_lowered(value, &needle))
            });
        }

        if let Some(after) = self.after.as_deref().and_then(parse_timestamp_or_absent) {
            pipeline.push(move |item: &T| item.timestamp() > after);
        }

        if let Some(before) = self.before.as_deref().and_then(parse_timestamp_or_absent) {
            pipeline.push(move |item: &T| item.timestamp() < before);
        }

        if let Some(contains) = non_empty(&self.contains) {
            let needle = contains.to_lowercase();
            pipeline.push(move |item: &T| {
                item.text_fields()
                    .into_iter()
                    .any(|field| contains_lowered(field, &needle))
                    || item
                        .list_fields()
                        .into_iter()
                        .flatten()
                        .any(|element| contains_lowered(element, &needle))
            });
        }

        pipeline
    }
}

/// Echo listing: phrase substring and tag membership.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EchoQuery {
    pub phrase: Option<String>,
    pub tag: Option<String>,
    #[serde(flatten)]
    pub common: FilterOptions,
}

impl ListQuery<Echo> for EchoQuery {
    fn pipeline(&self) -> FilterPipeline<Echo> {
        let mut pipeline = ListQuery::<Echo>::pipeline(&self.common);
        if let Some(phrase) = non_empty(&self.phrase) {
            let needle = phrase.to_lowercase();
            pipeline.push(move |echo: &Echo| contains_lowered(&echo.phrase, &needle));
        }
        if let Some(tag) = non_empty(&self.tag) {
            let tag = tag.to_string();
            pipeline.push(move |echo: &Echo| has_tag(&echo.tags, &tag));
        }
        pipeline
    }
}

/// Spine listing: tag membership and vow flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpineQuery {
    pub tag: Option<String>,
    pub vow: Option<bool>,
    #[serde(flatten)]
    pub common: FilterOptions,
}

impl ListQuery<SpineEntry> for SpineQuery {
    fn pipeline(&self) -> FilterPipeline<SpineEntry> {
        let mut pipeline = ListQuery::<SpineEntry>::pipeline(&self.common);
        if let Some(tag) = non_empty(&self.tag) {
            let tag = tag.to_string();
            pipeline.push(move |entry: &SpineEntry| has_tag(&entry.tags, &tag));
        }
        if let Some(vow) = self.vow {
            pipeline.push(move |entry: &SpineEntry| entry.vow == vow);
        }
        pipeline
    }
}

/// Figure listing: name and relationship type substrings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigureQuery {
    pub name: Option<String>,
    pub relationship_type: Option<String>,
    #[serde(flatten)]
    pub common: FilterOptions,
}

impl ListQuery<Figure> for FigureQuery {
    fn pipeline(&self) -> FilterPipeline<Figure> {
        let mut pipeline = ListQuery::<Figure>::pipeline(&self.common);
        if let Some(name) = non_empty(&self.name) {
            let needle = name.to_lowercase();
            pipeline.push(move |figure: &Figure| contains_lowered(&figure.name, &needle));
        }
        if let Some(relationship) = non_empty(&self.relationship_type) {
            let needle = relationship.to_lowercase();
            pipeline.push(move |figure: &Figure| {
                contains_lowered(&figure.relationship_type, &needle)
            });
        }
        pipeline
    }
}

/// Emberbank listing: resolved flag and tag membership.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmberbankQuery {
    pub resolved: Option<bool>,
    pub tag: Option<String>,
    #[serde(flatten)]
    pub common: FilterOptions,
}

impl ListQuery<EmberbankEntry> for EmberbankQuery {
    fn pipeline(&self) -> FilterPipeline<EmberbankEntry> {
        let mut pipeline = ListQuery::<EmberbankEntry>::pipeline(&self.common);
        if let Some(resolved) = self.resolved {
            pipeline.push(move |entry: &EmberbankEntry| entry.resolved == resolved);
        }
        if let Some(tag) = non_empty(&self.tag) {
            let tag = tag.to_string();
            pipeline.push(move |entry: &EmberbankEntry| has_tag(&entry.tags, &tag));
        }
        pipeline
    }
}
