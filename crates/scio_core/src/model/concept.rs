//! Concept entity: the leaf node of the knowledge graph, stored inside its
//! domain directory.

use super::common::{null_as_empty, RelationRef, Source};
use super::entity::{decode_entity, encode_entity, Entity, CURRENT_SCHEMA_VERSION};
use super::ModelResult;
use crate::uri::{Address, EntityKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const ARTIFACT: &str = "concept";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Concept {
    pub schema: u32,
    pub uri: String,
    pub name: String,
    pub version: u32,
    pub created: DateTime<Utc>,
    pub last_update: DateTime<Utc>,
    pub tags: Vec<String>,
    pub relations: Vec<RelationRef>,
    /// External documents backing this concept.
    pub sources: Vec<Source>,
    pub body: String,
}

impl Concept {
    pub fn new(address: &Address, name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            schema: CURRENT_SCHEMA_VERSION,
            uri: address.raw().to_string(),
            name: name.into(),
            version: 1,
            created: now,
            last_update: now,
            tags: Vec::new(),
            relations: Vec::new(),
            sources: Vec::new(),
            body: String::new(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct ConceptMetadata {
    entity: String,
    schema: u32,
    uri: String,
    name: String,
    version: u32,
    created: DateTime<Utc>,
    last_update: DateTime<Utc>,
    #[serde(default, deserialize_with = "null_as_empty")]
    tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    relations: Vec<RelationRef>,
    #[serde(default, deserialize_with = "null_as_empty")]
    sources: Vec<Source>,
}

/// Decodes a concept file.
///
/// Fails with `ModelError::KindMismatch` when given any other entity file.
pub fn parse_concept(content: &str) -> ModelResult<Concept> {
    let (metadata, body) =
        decode_entity::<ConceptMetadata>(content, EntityKind::Concept, ARTIFACT)?;

    Ok(Concept {
        schema: metadata.schema,
        uri: metadata.uri,
        name: metadata.name,
        version: metadata.version,
        created: metadata.created,
        last_update: metadata.last_update,
        tags: metadata.tags,
        relations: metadata.relations,
        sources: metadata.sources,
        body,
    })
}

pub fn encode_concept(concept: &Concept) -> ModelResult<String> {
    let metadata = ConceptMetadata {
        entity: EntityKind::Concept.as_str().to_string(),
        schema: concept.schema,
        uri: concept.uri.clone(),
        name: concept.name.clone(),
        version: concept.version,
        created: concept.created,
        last_update: concept.last_update,
        tags: concept.tags.clone(),
        relations: concept.relations.clone(),
        sources: concept.sources.clone(),
    };
    encode_entity(&metadata, &concept.body, ARTIFACT)
}

impl Entity for Concept {
    const KIND: EntityKind = EntityKind::Concept;

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
        parse_concept(content)
    }

    fn encode(&self) -> ModelResult<String> {
        encode_concept(self)
    }

    fn version_mut(&mut self) -> &mut u32 {
        &mut self.version
    }

    fn last_update_mut(&mut self) -> &mut DateTime<Utc> {
        &mut self.last_update
    }
}
