//! Read-side aggregation and recall over stored records.
//!
//! # Responsibility
//! - Rank Echo tags by occurrence ([`tag_index`]).
//! - Surface Echoes, Figures and Spine entries related to free text
//!   ([`reflex`]).
//!
//! # Invariants
//! - Both recompute from the full collections on every call; nothing is
//!   cached, so creates and deletes are visible immediately.

pub mod reflex;
pub mod tag_index;
