//! Entity kind discriminator.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Kind of entity stored in the knowledge graph.
///
/// Serialized with lowercase names (`tag`, `relation`, ...) both in metadata
/// blocks and in allowed-kind lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Tag,
    Relation,
    Context,
    Domain,
    Concept,
}

impl EntityKind {
    /// Every kind, in declaration order.
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Tag,
        EntityKind::Relation,
        EntityKind::Context,
        EntityKind::Domain,
        EntityKind::Concept,
    ];

    /// Kinds a tag or relation may attach to unless configured otherwise.
    pub const ATTACHABLE: [EntityKind; 3] =
        [EntityKind::Context, EntityKind::Domain, EntityKind::Concept];

    /// Stable lowercase name used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tag => "tag",
            Self::Relation => "relation",
            Self::Context => "context",
            Self::Domain => "domain",
            Self::Concept => "concept",
        }
    }

    /// Returns whether entities of this kind own a directory subtree.
    pub fn is_container(self) -> bool {
        matches!(self, Self::Context | Self::Domain)
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a known entity kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEntityKind(pub String);

impl Display for UnknownEntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown entity kind `{}`", self.0)
    }
}

impl Error for UnknownEntityKind {}

impl FromStr for EntityKind {
    type Err = UnknownEntityKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| UnknownEntityKind(value.to_string()))
    }
}
