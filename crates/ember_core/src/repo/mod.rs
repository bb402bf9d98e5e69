//! Repository layer over the storage adapter.
//!
//! # Responsibility
//! - Provide typed CRUD per entity kind.
//! - Mint identity and creation timestamp exactly once, on `create`.
//!
//! # Invariants
//! - Each mutating call performs exactly one adapter operation.
//! - Missing ids are reported as values (`None`, [`DeleteOutcome::NotFound`]),
//!   never as errors.
//! - No call is retried; `create` is not idempotent, so a retried create
//!   mints a second record.

pub mod entity_repo;
