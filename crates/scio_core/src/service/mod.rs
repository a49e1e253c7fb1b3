//! Typed entity use-cases over the storage driver.
//!
//! # Responsibility
//! - Combine address parsing, path mapping and the entity codec into
//!   get/create/update/delete/list calls.
//! - Keep callers (tool layers, binaries) away from file layout details.

pub mod knowledge_service;

pub use knowledge_service::{KnowledgeService, ServiceError, ServiceResult};
