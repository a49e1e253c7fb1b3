//! Core of the SCIO knowledge store.
//!
//! Entities of a small typed knowledge graph (contexts, domains, concepts,
//! tags, relation types) are addressed by `scio://` URIs and persisted as
//! markdown files with a YAML metadata block.

pub mod config;
pub mod logging;
pub mod model;
pub mod service;
pub mod storage;
pub mod uri;

pub use config::{ConfigError, StoreConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::{
    encode_concept, encode_context, encode_domain, encode_relation_type, encode_tag,
    parse_concept, parse_context, parse_domain, parse_relation_type, parse_tag, peek_header,
    Concept, Context, Domain, Entity, EntityHeader, ModelError, ModelResult, RelationRef,
    RelationType, Source, Tag,
};
pub use service::{KnowledgeService, ServiceError, ServiceResult};
pub use storage::{
    file_dir, file_path, DirEntry, FileSystem, LocalFileSystem, Storage, StorageError,
    StorageResult,
};
pub use uri::{Address, AddressError, AddressResult, AddressTarget, EntityKind};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
