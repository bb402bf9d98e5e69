//! Domain model for stored memory records.
//!
//! # Responsibility
//! - Define the six record kinds and their creation drafts.
//! - Keep one shared identity/timestamp contract via [`entity::Entity`].
//!
//! # Invariants
//! - `id` is assigned once at creation and never reused within a kind.
//! - `timestamp` is the creation instant and never changes.
//! - At most one `Anchor` exists at any time (enforced by the anchor service).

pub mod anchor;
pub mod carve;
pub mod echo;
pub mod emberbank;
pub mod entity;
pub mod figure;
pub mod spine;
