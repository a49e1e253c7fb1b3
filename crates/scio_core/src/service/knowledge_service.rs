//! Knowledge service.
//!
//! # Invariants
//! - A record is only written at the address parsed from its own `uri`.
//! - The address kind must match the record type on every read and write.
//! - Listing never follows files that are not `.md` entity files.

use crate::model::{peek_header, Entity, EntityHeader, ModelError};
use crate::storage::paths::ENTITY_FILE_EXTENSION;
use crate::storage::{FileSystem, LocalFileSystem, Storage, StorageError};
use crate::uri::{Address, AddressError, EntityKind};
use chrono::{DateTime, Utc};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    Address(AddressError),
    Model(ModelError),
    Storage(StorageError),
    /// Address names a different kind than the record type requested.
    KindMismatch {
        uri: String,
        expected: EntityKind,
        found: EntityKind,
    },
    /// Stored bytes are not UTF-8 text.
    InvalidEncoding(PathBuf),
    /// Listing scope is not a container entity.
    InvalidScope(String),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Address(err) => write!(f, "{err}"),
            Self::Model(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::KindMismatch {
                uri,
                expected,
                found,
            } => write!(f, "`{uri}` addresses a {found}, expected a {expected}"),
            Self::InvalidEncoding(path) => {
                write!(f, "entity file is not valid UTF-8: {}", path.display())
            }
            Self::InvalidScope(uri) => {
                write!(f, "`{uri}` is not a context or domain and cannot be listed")
            }
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Address(err) => Some(err),
            Self::Model(err) => Some(err),
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<AddressError> for ServiceError {
    fn from(value: AddressError) -> Self {
        Self::Address(value)
    }
}

impl From<ModelError> for ServiceError {
    fn from(value: ModelError) -> Self {
        Self::Model(value)
    }
}

impl From<StorageError> for ServiceError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Use-case service for typed entity persistence.
pub struct KnowledgeService<F: FileSystem = LocalFileSystem> {
    storage: Storage<F>,
}

impl<F: FileSystem> KnowledgeService<F> {
    pub fn new(storage: Storage<F>) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &Storage<F> {
        &self.storage
    }

    /// Writes a record at the address parsed from its `uri`.
    ///
    /// Existing files are overwritten; callers wanting create-only semantics
    /// check `exists` first.
    pub fn create<E: Entity>(&self, entity: &E) -> ServiceResult<()> {
        let address = address_for::<E>(entity.uri())?;
        let content = entity.encode()?;
        self.storage.save(&address, content.as_bytes())?;
        info!(
            "event=entity_create module=service status=ok kind={} version={}",
            E::KIND,
            entity.version()
        );
        Ok(())
    }

    /// Reads the record stored at `uri`.
    pub fn get<E: Entity>(&self, uri: &str) -> ServiceResult<E> {
        let address = address_for::<E>(uri)?;
        let bytes = self.storage.load(&address)?;
        let content = String::from_utf8(bytes)
            .map_err(|_| ServiceError::InvalidEncoding(self.storage.file_path(&address)))?;
        Ok(E::parse(&content)?)
    }

    /// Returns whether a file exists for `uri`. The file is not read.
    pub fn exists(&self, uri: &str) -> ServiceResult<bool> {
        let address = Address::parse(uri)?;
        Ok(self.storage.exists(&address)?)
    }

    /// Records a new revision of `entity` and writes it.
    ///
    /// The written revision has `version` incremented and `last_update` set
    /// to `now`. `entity` only takes that revision once the write succeeds;
    /// on error it is left as passed in.
    pub fn update<E: Entity>(&self, entity: &mut E, now: DateTime<Utc>) -> ServiceResult<()> {
        let address = address_for::<E>(entity.uri())?;
        let mut revision = entity.clone();
        revision.touch(now)?;
        let content = revision.encode()?;
        self.storage.save(&address, content.as_bytes())?;

        *entity = revision;
        info!(
            "event=entity_update module=service status=ok kind={} version={}",
            E::KIND,
            entity.version()
        );
        Ok(())
    }

    /// Deletes the entity at `uri`, cascading for contexts and domains.
    pub fn delete(&self, uri: &str) -> ServiceResult<()> {
        let address = Address::parse(uri)?;
        if let Err(err) = self.storage.delete(&address) {
            error!(
                "event=entity_delete module=service status=error kind={} error={}",
                address.kind(),
                err
            );
            return Err(err.into());
        }
        Ok(())
    }

    /// Lists entity headers under `scope`, sorted by URI.
    ///
    /// `None` lists from the store root. `Some(uri)` must name a context or
    /// domain and lists inside its directory, excluding the container itself.
    /// Non-recursive listing only sees entity files directly in the folder.
    /// `.md` files without a readable entity header, such as a stray
    /// `README.md`, are skipped with a warning.
    pub fn list(&self, scope: Option<&str>, recursive: bool) -> ServiceResult<Vec<EntityHeader>> {
        let (folder, own_file) = match scope {
            None => (self.storage.root().to_path_buf(), None),
            Some(uri) => {
                let address = Address::parse(uri)?;
                if !address.kind().is_container() {
                    return Err(ServiceError::InvalidScope(uri.to_string()));
                }
                (
                    self.storage.file_dir(&address),
                    Some(self.storage.file_path(&address)),
                )
            }
        };

        let mut files = Vec::new();
        self.storage.find_files(&folder, recursive, |path| {
            let is_entity = path
                .extension()
                .is_some_and(|ext| ext == ENTITY_FILE_EXTENSION);
            if is_entity && own_file.as_deref() != Some(path) {
                files.push(path.to_path_buf());
            }
        })?;

        let mut headers = Vec::with_capacity(files.len());
        for path in files {
            let bytes = self.storage.read_file(&path)?;
            let Ok(content) = String::from_utf8(bytes) else {
                return Err(ServiceError::InvalidEncoding(path));
            };
            match peek_header(&content) {
                Ok(header) => headers.push(header),
                Err(err) => warn!(
                    "event=entity_list module=service status=skipped path={} error={}",
                    path.display(),
                    err
                ),
            }
        }
        headers.sort_by(|left, right| left.uri.cmp(&right.uri));
        Ok(headers)
    }
}

fn address_for<E: Entity>(uri: &str) -> ServiceResult<Address> {
    let address = Address::parse(uri)?;
    if address.kind() != E::KIND {
        return Err(ServiceError::KindMismatch {
            uri: uri.to_string(),
            expected: E::KIND,
            found: address.kind(),
        });
    }
    Ok(address)
}
