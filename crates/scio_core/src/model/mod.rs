//! Typed knowledge-graph entities and their file codec.
//!
//! # Responsibility
//! - Define one record per entity kind (tag, relation type, context, domain,
//!   concept).
//! - Convert records to and from `---`-delimited YAML metadata plus body.
//!
//! # Invariants
//! - Decoded list fields are never absent: missing or `null` lists become
//!   empty sequences.
//! - Encoding never mutates the caller's record; defaults are applied to a
//!   freshly built metadata value.
//! - Bodies round-trip byte-for-byte.

use crate::uri::EntityKind;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod common;
pub mod concept;
pub mod context;
pub mod domain;
pub mod entity;
pub mod frontmatter;
pub mod relation;
pub mod tag;

pub use common::{RelationRef, Source};
pub use concept::{encode_concept, parse_concept, Concept};
pub use context::{encode_context, parse_context, Context};
pub use domain::{encode_domain, parse_domain, Domain};
pub use entity::{peek_header, Entity, EntityHeader, CURRENT_SCHEMA_VERSION};
pub use frontmatter::{EntityFile, FrontmatterError};
pub use relation::{encode_relation_type, parse_relation_type, RelationType};
pub use tag::{encode_tag, parse_tag, Tag};

pub type ModelResult<T> = Result<T, ModelError>;

/// Entity codec error.
///
/// Every variant carries the artifact name (`tag`, `concept`, ...) that was
/// being decoded or encoded.
#[derive(Debug)]
pub enum ModelError {
    /// Frontmatter delimiters are missing.
    Format {
        artifact: &'static str,
        source: FrontmatterError,
    },
    /// Metadata block is not valid YAML for the expected schema.
    Decode {
        artifact: &'static str,
        source: serde_yaml::Error,
    },
    /// Metadata declares a different entity kind than the one requested.
    KindMismatch {
        artifact: &'static str,
        expected: EntityKind,
        found: String,
    },
    /// Metadata could not be serialized.
    Encode {
        artifact: &'static str,
        source: serde_yaml::Error,
    },
    /// Revision counter is exhausted.
    VersionOverflow { artifact: &'static str, uri: String },
}

impl Display for ModelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Format { artifact, source } => {
                write!(f, "failed to parse {artifact} file: {source}")
            }
            Self::Decode { artifact, source } => {
                write!(f, "failed to unmarshal {artifact} file metadata: {source}")
            }
            Self::KindMismatch {
                artifact,
                expected,
                found,
            } => write!(
                f,
                "invalid entity type in {artifact} file: expected '{expected}', got '{found}'"
            ),
            Self::Encode { artifact, source } => {
                write!(f, "failed to encode {artifact}: {source}")
            }
            Self::VersionOverflow { artifact, uri } => {
                write!(f, "{artifact} `{uri}` is already at the last version {}", u32::MAX)
            }
        }
    }
}

impl Error for ModelError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Format { source, .. } => Some(source),
            Self::Decode { source, .. } | Self::Encode { source, .. } => Some(source),
            Self::KindMismatch { .. } | Self::VersionOverflow { .. } => None,
        }
    }
}
