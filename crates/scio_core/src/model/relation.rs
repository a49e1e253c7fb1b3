//! Relation-type definition entity.
//!
//! # Invariants
//! - Unset source/target kind lists encode as every attachable kind.
//! - `inverse-of` is omitted from metadata when unset.

use super::common::null_as_empty;
use super::entity::{decode_entity, encode_entity, Entity, CURRENT_SCHEMA_VERSION};
use super::ModelResult;
use crate::uri::{Address, EntityKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const ARTIFACT: &str = "relation";

/// Definition of a typed edge that entities may use in their `relations`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationType {
    pub schema: u32,
    pub uri: String,
    pub version: u32,
    pub created: DateTime<Utc>,
    pub last_update: DateTime<Utc>,
    /// URI of the relation type that reads this edge backwards.
    pub inverse_of: Option<String>,
    /// `None` means unset.
    pub allowed_source_entities: Option<Vec<EntityKind>>,
    /// `None` means unset.
    pub allowed_target_entities: Option<Vec<EntityKind>>,
    pub transitive: bool,
    pub symmetric: bool,
    pub body: String,
}

impl RelationType {
    /// Creates a first-revision, non-transitive, asymmetric relation type.
    pub fn new(address: &Address, now: DateTime<Utc>) -> Self {
        Self {
            schema: CURRENT_SCHEMA_VERSION,
            uri: address.raw().to_string(),
            version: 1,
            created: now,
            last_update: now,
            inverse_of: None,
            allowed_source_entities: None,
            allowed_target_entities: None,
            transitive: false,
            symmetric: false,
            body: String::new(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RelationTypeMetadata {
    entity: String,
    schema: u32,
    uri: String,
    version: u32,
    created: DateTime<Utc>,
    last_update: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inverse_of: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    allowed_source_entities: Vec<EntityKind>,
    #[serde(default, deserialize_with = "null_as_empty")]
    allowed_target_entities: Vec<EntityKind>,
    #[serde(default)]
    transitive: bool,
    #[serde(default)]
    symmetric: bool,
}

fn kinds_or_all(kinds: &Option<Vec<EntityKind>>) -> Vec<EntityKind> {
    kinds
        .clone()
        .unwrap_or_else(|| EntityKind::ATTACHABLE.to_vec())
}

/// Decodes a relation-type file.
pub fn parse_relation_type(content: &str) -> ModelResult<RelationType> {
    let (metadata, body) =
        decode_entity::<RelationTypeMetadata>(content, EntityKind::Relation, ARTIFACT)?;

    Ok(RelationType {
        schema: metadata.schema,
        uri: metadata.uri,
        version: metadata.version,
        created: metadata.created,
        last_update: metadata.last_update,
        inverse_of: metadata.inverse_of.filter(|uri| !uri.is_empty()),
        allowed_source_entities: Some(metadata.allowed_source_entities),
        allowed_target_entities: Some(metadata.allowed_target_entities),
        transitive: metadata.transitive,
        symmetric: metadata.symmetric,
        body,
    })
}

/// Encodes a relation-type file. The input record is left untouched.
pub fn encode_relation_type(relation: &RelationType) -> ModelResult<String> {
    let metadata = RelationTypeMetadata {
        entity: EntityKind::Relation.as_str().to_string(),
        schema: relation.schema,
        uri: relation.uri.clone(),
        version: relation.version,
        created: relation.created,
        last_update: relation.last_update,
        inverse_of: relation.inverse_of.clone().filter(|uri| !uri.is_empty()),
        allowed_source_entities: kinds_or_all(&relation.allowed_source_entities),
        allowed_target_entities: kinds_or_all(&relation.allowed_target_entities),
        transitive: relation.transitive,
        symmetric: relation.symmetric,
    };
    encode_entity(&metadata, &relation.body, ARTIFACT)
}

impl Entity for RelationType {
    const KIND: EntityKind = EntityKind::Relation;

    fn uri(&self) -> &str {
        &self.uri
    }

    fn body(&self) -> &str {
        &self.body
    }

    fn version(&self) -> u32 {
        self.version
    }

    fn parse(content: &str) -> ModelResult<Self> {
        parse_relation_type(content)
    }

    fn encode(&self) -> ModelResult<String> {
        encode_relation_type(self)
    }

    fn version_mut(&mut self) -> &mut u32 {
        &mut self.version
    }

    fn last_update_mut(&mut self) -> &mut DateTime<Utc> {
        &mut self.last_update
    }
}
