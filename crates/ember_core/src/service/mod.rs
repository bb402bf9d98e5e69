//! Core use-case services.
//!
//! # Responsibility
//! - Compose repositories, filters, the tag index and reflex matching into
//!   the operations exposed to outer layers.
//! - Keep callers decoupled from the storage adapter in use.

pub mod anchor_service;
pub mod memory_service;
