//! Context entity: the top-level container of domains, scoped tags and
//! scoped relation types.

use super::common::{null_as_empty, RelationRef};
use super::entity::{decode_entity, encode_entity, Entity, CURRENT_SCHEMA_VERSION};
use super::ModelResult;
use crate::uri::{Address, EntityKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const ARTIFACT: &str = "context";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    pub schema: u32,
    pub uri: String,
    pub name: String,
    pub version: u32,
    pub created: DateTime<Utc>,
    pub last_update: DateTime<Utc>,
    pub tags: Vec<String>,
    pub relations: Vec<RelationRef>,
    pub body: String,
}

impl Context {
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
            body: String::new(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct ContextMetadata {
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
}

pub fn parse_context(content: &str) -> ModelResult<Context> {
    let (metadata, body) =
        decode_entity::<ContextMetadata>(content, EntityKind::Context, ARTIFACT)?;

    Ok(Context {
        schema: metadata.schema,
        uri: metadata.uri,
        name: metadata.name,
        version: metadata.version,
        created: metadata.created,
        last_update: metadata.last_update,
        tags: metadata.tags,
        relations: metadata.relations,
        body,
    })
}

pub fn encode_context(context: &Context) -> ModelResult<String> {
    let metadata = ContextMetadata {
        entity: EntityKind::Context.as_str().to_string(),
        schema: context.schema,
        uri: context.uri.clone(),
        name: context.name.clone(),
        version: context.version,
        created: context.created,
        last_update: context.last_update,
        tags: context.tags.clone(),
        relations: context.relations.clone(),
    };
    encode_entity(&metadata, &context.body, ARTIFACT)
}

impl Entity for Context {
    const KIND: EntityKind = EntityKind::Context;

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
        parse_context(content)
    }

    fn encode(&self) -> ModelResult<String> {
        encode_context(self)
    }

    fn version_mut(&mut self) -> &mut u32 {
        &mut self.version
    }

    fn last_update_mut(&mut self) -> &mut DateTime<Utc> {
        &mut self.last_update
    }
}
