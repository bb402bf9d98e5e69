//! Per-kind field designations used by `contains`, `tone` and `location`.

use crate::model::anchor::Anchor;
use crate::model::carve::Carve;
use crate::model::echo::Echo;
use crate::model::emberbank::EmberbankEntry;
use crate::model::entity::Entity;
use crate::model::figure::Figure;
use crate::model::spine::SpineEntry;

/// Exposes the fields a kind offers to the filter pipeline.
pub trait Filterable: Entity {
    /// Long-text fields searched by `contains`.
    fn text_fields(&self) -> Vec<&str>;

    /// List fields whose elements are searched by `contains`.
    fn list_fields(&self) -> Vec<&[String]>;

    /// `None` when the kind carries no tone; a `tone` filter then excludes it.
    fn tone(&self) -> Option<&str> {
        None
    }

    fn location(&self) -> Option<&str> {
        None
    }
}

impl Filterable for Carve {
    fn text_fields(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.location.as_str(),
            self.tone.as_str(),
            self.what_i_witnessed.as_str(),
            self.what_it_meant.as_str(),
            self.closing_ritual.as_str(),
        ]
    }

    fn list_fields(&self) -> Vec<&[String]> {
        vec![self.what_i_hold.as_slice()]
    }

    fn tone(&self) -> Option<&str> {
        Some(self.tone.as_str())
    }

    fn location(&self) -> Option<&str> {
        Some(self.location.as_str())
    }
}

impl Filterable for Echo {
    fn text_fields(&self) -> Vec<&str> {
        vec![self.phrase.as_str()]
    }

    fn list_fields(&self) -> Vec<&[String]> {
        vec![self.tags.as_slice()]
    }
}

impl Filterable for SpineEntry {
    fn text_fields(&self) -> Vec<&str> {
        vec![self.statement.as_str(), self.origin.as_str()]
    }

    fn list_fields(&self) -> Vec<&[String]> {
        vec![self.tags.as_slice()]
    }
}

impl Filterable for Anchor {
    fn text_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.role.as_str(), self.profession.as_str()]
    }

    fn list_fields(&self) -> Vec<&[String]> {
        vec![
            self.truths.as_slice(),
            self.symbols.as_slice(),
            self.must_never_forget.as_slice(),
        ]
    }
}

impl Filterable for Figure {
    fn text_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.impact.as_str(),
            self.symbolic_object.as_str(),
            self.relationship_type.as_str(),
        ]
    }

    fn list_fields(&self) -> Vec<&[String]> {
        vec![self.truths_held.as_slice()]
    }
}

impl Filterable for EmberbankEntry {
    fn text_fields(&self) -> Vec<&str> {
        vec![self.question.as_str(), self.context.as_str()]
    }

    fn list_fields(&self) -> Vec<&[String]> {
        vec![self.tags.as_slice()]
    }
}
