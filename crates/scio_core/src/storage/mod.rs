//! File-backed entity storage.
//!
//! # Responsibility
//! - Map addresses to files under a store root.
//! - Save, load and delete entity files, cascading deletes for containers.
//! - Enumerate stored files.
//!
//! # Invariants
//! - No in-process locking: same-address writers race, last writer wins.
//! - Errors are surfaced unchanged; nothing is retried or rolled back.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;

pub mod fs;
pub mod paths;
mod store;

pub use fs::{DirEntry, FileSystem, LocalFileSystem};
pub use paths::{file_dir, file_path};
pub use store::Storage;

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug)]
pub enum StorageError {
    /// Target file or folder does not exist.
    NotFound(PathBuf),
    /// Any other file-system failure.
    Io {
        op: &'static str,
        path: PathBuf,
        source: io::Error,
    },
    /// Entity file was removed but its container directory tree was not.
    ///
    /// The tree is left in whatever state the walk reached.
    CascadeDelete {
        dir: PathBuf,
        path: PathBuf,
        source: io::Error,
    },
}

impl StorageError {
    pub(crate) fn from_io(op: &'static str, path: PathBuf, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            return Self::NotFound(path);
        }
        Self::Io { op, path, source }
    }
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "not found: {}", path.display()),
            Self::Io { op, path, source } => {
                write!(f, "failed to {op} `{}`: {source}", path.display())
            }
            Self::CascadeDelete { dir, path, source } => write!(
                f,
                "failed to remove directory `{}` (at `{}`): {source}",
                dir.display(),
                path.display()
            ),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io { source, .. } | Self::CascadeDelete { source, .. } => Some(source),
        }
    }
}
