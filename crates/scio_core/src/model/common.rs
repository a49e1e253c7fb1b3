//! Value types shared by several entity kinds.

use serde::{Deserialize, Deserializer, Serialize};

/// Directed edge from the owning entity to `target` via relation type `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationRef {
    /// URI of the relation-type definition.
    #[serde(rename = "type")]
    pub relation: String,
    /// URI of the target entity.
    pub target: String,
}

impl RelationRef {
    pub fn new(relation: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            relation: relation.into(),
            target: target.into(),
        }
    }
}

/// External artifact (file, URL, ...) documenting a concept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    #[serde(rename = "type")]
    pub kind: String,
    pub href: String,
}

impl Source {
    pub fn new(kind: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            href: href.into(),
        }
    }
}

/// Deserializes an optional YAML sequence, mapping `null` to an empty list.
///
/// Pair with `#[serde(default)]` so that omitted keys decode the same way.
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
