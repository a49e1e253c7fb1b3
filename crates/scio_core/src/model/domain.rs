//! Domain entity: a grouping of concepts inside one context.
//!
//! Deleting a domain removes its whole directory, concepts included.

use super::common::{null_as_empty, RelationRef};
use super::entity::{decode_entity, encode_entity, Entity, CURRENT_SCHEMA_VERSION};
use super::ModelResult;
use crate::uri::{Address, EntityKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const ARTIFACT: &str = "domain";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain {
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

impl Domain {
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
struct DomainMetadata {
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

pub fn parse_domain(content: &str) -> ModelResult<Domain> {
    let (metadata, body) =
        decode_entity::<DomainMetadata>(content, EntityKind::Domain, ARTIFACT)?;

    Ok(Domain {
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

pub fn encode_domain(domain: &Domain) -> ModelResult<String> {
    let metadata = DomainMetadata {
        entity: EntityKind::Domain.as_str().to_string(),
        schema: domain.schema,
        uri: domain.uri.clone(),
        name: domain.name.clone(),
        version: domain.version,
        created: domain.created,
        last_update: domain.last_update,
        tags: domain.tags.clone(),
        relations: domain.relations.clone(),
    };
    encode_entity(&metadata, &domain.body, ARTIFACT)
}

impl Entity for Domain {
    const KIND: EntityKind = EntityKind::Domain;

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
        parse_domain(content)
    }

    fn encode(&self) -> ModelResult<String> {
        encode_domain(self)
    }

    fn version_mut(&mut self) -> &mut u32 {
        &mut self.version
    }

    fn last_update_mut(&mut self) -> &mut DateTime<Utc> {
        &mut self.last_update
    }
}

#[cfg(test)]
mod tests {
    use super::{encode_domain, parse_domain, Domain};
    use crate::model::{ModelError, RelationRef};
    use crate::uri::{Address, EntityKind};
    use chrono::Utc;

    #[test]
    fn roundtrip_keeps_tags_relations_and_body() {
        let address = Address::parse("scio://contexts/ecommerce/domains/business-rules").unwrap();
        let mut domain = Domain::new(&address, "Business rules", Utc::now());
        domain.tags = vec!["scio://tags/core".to_string()];
        domain.relations = vec![RelationRef::new(
            "scio://relations/owns",
            "scio://contexts/ecommerce/domains/pricing",
        )];
        domain.body = "Rules.\n\n---\n\nAppendix.\n".to_string();

        let parsed = parse_domain(&encode_domain(&domain).unwrap()).unwrap();

        assert_eq!(parsed, domain);
    }

    #[test]
    fn parse_rejects_context_file() {
        let content = "---
entity: context
schema: 1
uri: scio://contexts/ecommerce
name: E
version: 1
created: 2026-01-01T00:00:00Z
last-update: 2026-01-01T00:00:00Z
---
";
        match parse_domain(content).unwrap_err() {
            ModelError::KindMismatch {
                artifact,
                expected,
                found,
            } => {
                assert_eq!(artifact, "domain");
                assert_eq!(expected, EntityKind::Domain);
                assert_eq!(found, "context");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn parse_treats_null_lists_as_empty() {
        let content = "---
entity: domain
schema: 1
uri: scio://contexts/a/domains/b
name: B
version: 1
created: 2026-01-01T00:00:00Z
last-update: 2026-01-01T00:00:00Z
tags: null
relations:
---
";
        let domain = parse_domain(content).unwrap();
        assert!(domain.tags.is_empty());
        assert!(domain.relations.is_empty());
    }
}
