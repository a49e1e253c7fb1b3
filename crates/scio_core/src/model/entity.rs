//! Behavior shared by all entity records.

use super::frontmatter;
use super::{ModelError, ModelResult};
use crate::uri::EntityKind;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

/// Metadata schema version written by this crate.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Common contract of the five entity records.
///
/// Lets storage-facing code read and write any record kind generically.
pub trait Entity: Sized + Clone {
    /// Discriminator written under the `entity` metadata key.
    const KIND: EntityKind;

    /// Canonical `scio://` URI of this entity.
    fn uri(&self) -> &str;

    /// Free-text body following the metadata block.
    fn body(&self) -> &str;

    /// Entity revision number.
    fn version(&self) -> u32;

    /// Decodes a stored file, rejecting files of another kind.
    fn parse(content: &str) -> ModelResult<Self>;

    /// Encodes the record into a stored file, applying list defaults.
    fn encode(&self) -> ModelResult<String>;

    fn version_mut(&mut self) -> &mut u32;

    fn last_update_mut(&mut self) -> &mut DateTime<Utc>;

    /// Records a new revision: bumps `version` and sets `last_update`.
    ///
    /// # Errors
    /// - `ModelError::VersionOverflow` when `version` is already `u32::MAX`;
    ///   the record is left unchanged.
    fn touch(&mut self, now: DateTime<Utc>) -> ModelResult<()> {
        let next = self
            .version()
            .checked_add(1)
            .ok_or_else(|| ModelError::VersionOverflow {
                artifact: Self::KIND.as_str(),
                uri: self.uri().to_string(),
            })?;
        *self.version_mut() = next;
        *self.last_update_mut() = now;
        Ok(())
    }
}

/// Kind and URI of an entity file, read without decoding the full schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityHeader {
    #[serde(rename = "entity")]
    pub kind: EntityKind,
    pub uri: String,
}

/// Reads only the `entity` and `uri` keys of any entity file.
///
/// Used when listing directories whose files may hold different kinds.
pub fn peek_header(content: &str) -> ModelResult<EntityHeader> {
    const ARTIFACT: &str = "entity";
    let (value, _body) = decode_yaml(content, ARTIFACT)?;
    serde_yaml::from_value(value).map_err(|source| ModelError::Decode {
        artifact: ARTIFACT,
        source,
    })
}

fn decode_yaml(content: &str, artifact: &'static str) -> ModelResult<(Value, String)> {
    let file =
        frontmatter::decode(content).map_err(|source| ModelError::Format { artifact, source })?;
    let value = serde_yaml::from_str(&file.metadata)
        .map_err(|source| ModelError::Decode { artifact, source })?;
    Ok((value, file.body))
}

/// Decodes metadata into `T` after checking the `entity` discriminator.
///
/// The discriminator is checked first so that a file of another kind is
/// reported as a kind mismatch even when its schema differs.
pub(crate) fn decode_entity<T: DeserializeOwned>(
    content: &str,
    expected: EntityKind,
    artifact: &'static str,
) -> ModelResult<(T, String)> {
    let (value, body) = decode_yaml(content, artifact)?;
    let found = value
        .get("entity")
        .and_then(Value::as_str)
        .unwrap_or_default();
    ensure_kind(found, expected, artifact)?;

    let metadata =
        serde_yaml::from_value(value).map_err(|source| ModelError::Decode { artifact, source })?;
    Ok((metadata, body))
}

fn ensure_kind(found: &str, expected: EntityKind, artifact: &'static str) -> ModelResult<()> {
    if found == expected.as_str() {
        return Ok(());
    }
    Err(ModelError::KindMismatch {
        artifact,
        expected,
        found: found.to_string(),
    })
}

pub(crate) fn encode_entity<T: Serialize>(
    metadata: &T,
    body: &str,
    artifact: &'static str,
) -> ModelResult<String> {
    let yaml =
        serde_yaml::to_string(metadata).map_err(|source| ModelError::Encode { artifact, source })?;
    // The closing delimiter supplies the line break.
    let yaml = yaml.strip_suffix('\n').unwrap_or(&yaml);
    Ok(frontmatter::encode(yaml, body))
}
