//! `scio://` addressing for knowledge-graph entities.
//!
//! # Responsibility
//! - Parse raw URI strings into typed, immutable `Address` values.
//! - Derive parent addresses for context-scoped entities.
//!
//! # Invariants
//! - An `Address` can only be obtained through parsing.
//! - `domain_slug` is only ever set for concepts, and implies `context_slug`.
//! - Parsing is pure: the same input always yields the same result.

mod address;
mod entity_kind;
mod pattern;

pub use address::{Address, AddressError, AddressResult, AddressTarget};
pub use entity_kind::{EntityKind, UnknownEntityKind};

/// URI scheme prefix shared by every entity address.
pub const SCHEME: &str = "scio://";
