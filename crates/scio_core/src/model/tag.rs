//! Tag entity.
//!
//! # Invariants
//! - Unset `allowed_entities` encodes as every attachable kind
//!   (`context`, `domain`, `concept`); an explicit empty list is kept empty
//!   and disables the tag.
//! - `broader`/`narrower` hold tag URIs and encode as `[]` when empty.

use super::common::null_as_empty;
use super::entity::{decode_entity, encode_entity, Entity, CURRENT_SCHEMA_VERSION};
use super::ModelResult;
use crate::uri::{Address, EntityKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const ARTIFACT: &str = "tag";

/// Label that may be attached to contexts, domains and concepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub schema: u32,
    pub uri: String,
    pub version: u32,
    pub created: DateTime<Utc>,
    pub last_update: DateTime<Utc>,
    /// Entity kinds this tag may be attached to. `None` means unset.
    pub allowed_entities: Option<Vec<EntityKind>>,
    pub broader: Vec<String>,
    pub narrower: Vec<String>,
    pub body: String,
}

impl Tag {
    /// Creates a first-revision tag for `address` with unset allowed kinds.
    pub fn new(address: &Address, now: DateTime<Utc>) -> Self {
        Self {
            schema: CURRENT_SCHEMA_VERSION,
            uri: address.raw().to_string(),
            version: 1,
            created: now,
            last_update: now,
            allowed_entities: None,
            broader: Vec::new(),
            narrower: Vec::new(),
            body: String::new(),
        }
    }

    /// Allowed kinds as they would be written to disk.
    pub fn effective_allowed_entities(&self) -> Vec<EntityKind> {
        self.allowed_entities
            .clone()
            .unwrap_or_else(|| EntityKind::ATTACHABLE.to_vec())
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct TagMetadata {
    entity: String,
    schema: u32,
    uri: String,
    version: u32,
    created: DateTime<Utc>,
    last_update: DateTime<Utc>,
    #[serde(default, deserialize_with = "null_as_empty")]
    allowed_entities: Vec<EntityKind>,
    #[serde(default, deserialize_with = "null_as_empty")]
    broader: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    narrower: Vec<String>,
}

/// Decodes a tag file.
///
/// # Errors
/// - `ModelError::Format` when frontmatter delimiters are missing.
/// - `ModelError::Decode` when metadata is not a valid tag schema.
/// - `ModelError::KindMismatch` when metadata declares another entity kind.
pub fn parse_tag(content: &str) -> ModelResult<Tag> {
    let (metadata, body) =
        decode_entity::<TagMetadata>(content, EntityKind::Tag, ARTIFACT)?;

    Ok(Tag {
        schema: metadata.schema,
        uri: metadata.uri,
        version: metadata.version,
        created: metadata.created,
        last_update: metadata.last_update,
        allowed_entities: Some(metadata.allowed_entities),
        broader: metadata.broader,
        narrower: metadata.narrower,
        body,
    })
}

/// Encodes a tag file. The input record is left untouched.
pub fn encode_tag(tag: &Tag) -> ModelResult<String> {
    let metadata = TagMetadata {
        entity: EntityKind::Tag.as_str().to_string(),
        schema: tag.schema,
        uri: tag.uri.clone(),
        version: tag.version,
        created: tag.created,
        last_update: tag.last_update,
        allowed_entities: tag.effective_allowed_entities(),
        broader: tag.broader.clone(),
        narrower: tag.narrower.clone(),
    };
    encode_entity(&metadata, &tag.body, ARTIFACT)
}

impl Entity for Tag {
    const KIND: EntityKind = EntityKind::Tag;

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
        parse_tag(content)
    }

    fn encode(&self) -> ModelResult<String> {
        encode_tag(self)
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
    use super::{encode_tag, parse_tag, Tag};
    use crate::model::{Entity, ModelError};
    use crate::uri::{Address, EntityKind};
    use chrono::{TimeZone, Utc};

    fn entity_content(meta: &str, body: &str) -> String {
        format!("---\n{meta}\n---\n{body}")
    }

    #[test]
    fn parse_reads_all_fields() {
        let meta = "entity: tag
schema: 1
uri: scio://tags/business-rule
version: 1
created: 2026-02-15T10:00:00Z
last-update: 2026-02-19T14:30:00Z
allowed-entities:
    - context
    - domain
    - concept
broader: []
narrower: []";
        let tag = parse_tag(&entity_content(meta, "")).unwrap();

        assert_eq!(tag.schema, 1);
        assert_eq!(tag.uri, "scio://tags/business-rule");
        assert_eq!(tag.version, 1);
        assert_eq!(tag.created, Utc.with_ymd_and_hms(2026, 2, 15, 10, 0, 0).unwrap());
        assert_eq!(
            tag.last_update,
            Utc.with_ymd_and_hms(2026, 2, 19, 14, 30, 0).unwrap()
        );
        assert_eq!(
            tag.allowed_entities,
            Some(vec![EntityKind::Context, EntityKind::Domain, EntityKind::Concept])
        );
        assert!(tag.broader.is_empty());
        assert!(tag.narrower.is_empty());
        assert_eq!(tag.body, "");
    }

    #[test]
    fn parse_maps_missing_and_null_lists_to_empty() {
        let meta = "entity: tag
schema: 1
uri: scio://tags/x
version: 1
created: 2026-01-01T00:00:00Z
last-update: 2026-01-01T00:00:00Z
broader: ~";
        let tag = parse_tag(&entity_content(meta, "")).unwrap();
        assert_eq!(tag.allowed_entities, Some(Vec::new()));
        assert!(tag.broader.is_empty());
        assert!(tag.narrower.is_empty());
    }

    #[test]
    fn parse_rejects_wrong_kind() {
        let meta = "entity: concept
schema: 1
uri: scio://tags/x
version: 1
created: 2026-01-01T00:00:00Z
last-update: 2026-01-01T00:00:00Z";
        let err = parse_tag(&entity_content(meta, "")).unwrap_err();
        assert!(matches!(
            err,
            ModelError::KindMismatch {
                expected: EntityKind::Tag,
                ..
            }
        ));
        assert!(err.to_string().contains("tag file"));
    }

    #[test]
    fn parse_rejects_unknown_allowed_kind() {
        let meta = "entity: tag
schema: 1
uri: scio://tags/x
version: 1
created: 2026-01-01T00:00:00Z
last-update: 2026-01-01T00:00:00Z
allowed-entities: [widget]";
        let err = parse_tag(&entity_content(meta, "")).unwrap_err();
        assert!(matches!(err, ModelError::Decode { .. }));
    }

    #[test]
    fn encode_defaults_unset_allowed_entities_without_mutation() {
        let address = Address::parse("scio://tags/new").unwrap();
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let tag = Tag::new(&address, now);

        let encoded = encode_tag(&tag).unwrap();

        assert!(encoded.contains("- context"));
        assert!(encoded.contains("- domain"));
        assert!(encoded.contains("- concept"));
        assert!(encoded.contains("broader: []"));
        assert!(encoded.contains("narrower: []"));
        assert_eq!(tag.allowed_entities, None);
    }

    #[test]
    fn encode_keeps_explicit_empty_allowed_entities() {
        let address = Address::parse("scio://tags/disabled").unwrap();
        let mut tag = Tag::new(&address, Utc::now());
        tag.allowed_entities = Some(Vec::new());

        let encoded = encode_tag(&tag).unwrap();

        assert!(encoded.contains("allowed-entities: []"));
        assert!(!encoded.contains("- context"));
    }

    #[test]
    fn encode_output_is_delimited_and_ends_with_body() {
        let address = Address::parse("scio://tags/x").unwrap();
        let mut tag = Tag::new(&address, Utc::now());
        tag.body = "Human-readable description of the tag.\n".to_string();

        let encoded = encode_tag(&tag).unwrap();

        assert!(encoded.starts_with("---\nentity: tag\n"));
        assert!(encoded.ends_with("\n---\nHuman-readable description of the tag.\n"));
    }

    #[test]
    fn touch_bumps_revision_and_refuses_to_wrap() {
        let address = Address::parse("scio://tags/x").unwrap();
        let created = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
        let mut tag = Tag::new(&address, created);

        tag.touch(later).unwrap();
        assert_eq!(tag.version, 2);
        assert_eq!(tag.last_update, later);

        tag.version = u32::MAX;
        tag.last_update = created;
        let err = tag.touch(later).unwrap_err();

        assert!(matches!(err, ModelError::VersionOverflow { artifact: "tag", .. }));
        assert_eq!(tag.version, u32::MAX);
        assert_eq!(tag.last_update, created);
    }
}
