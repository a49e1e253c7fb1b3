//! Storage driver over a `FileSystem`.

use super::fs::{FileSystem, LocalFileSystem};
use super::paths::{file_dir, file_path, ROOT_DIRS};
use super::{StorageError, StorageResult};
use crate::uri::Address;
use log::{debug, info, warn};
use std::io;
use std::path::{Path, PathBuf};

/// Entity file store rooted at one directory.
#[derive(Debug, Clone)]
pub struct Storage<F: FileSystem = LocalFileSystem> {
    root: PathBuf,
    fs: F,
}

impl Storage<LocalFileSystem> {
    /// Creates a store over the local disk. Does not touch the disk.
    pub fn local(root: impl Into<PathBuf>) -> Self {
        Self::new(root, LocalFileSystem)
    }
}

impl<F: FileSystem> Storage<F> {
    pub fn new(root: impl Into<PathBuf>, fs: F) -> Self {
        Self {
            root: root.into(),
            fs,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn file_path(&self, address: &Address) -> PathBuf {
        file_path(&self.root, address)
    }

    pub fn file_dir(&self, address: &Address) -> PathBuf {
        file_dir(&self.root, address)
    }

    /// Ensures `tags/`, `relations/` and `contexts/` exist under the root.
    ///
    /// Idempotent.
    pub fn init_roots(&self) -> StorageResult<()> {
        for dir in ROOT_DIRS {
            let path = self.root.join(dir);
            self.fs
                .create_dir_all(&path)
                .map_err(|err| StorageError::from_io("create directory", path, err))?;
        }
        info!(
            "event=storage_init module=storage status=ok root={}",
            self.root.display()
        );
        Ok(())
    }

    /// Creates every directory leading to the entity file. Idempotent.
    pub fn ensure_parent_dirs(&self, address: &Address) -> StorageResult<()> {
        let dir = self.file_dir(address);
        self.fs
            .create_dir_all(&dir)
            .map_err(|err| StorageError::from_io("create directory", dir, err))
    }

    /// Writes `bytes` as the entity file, replacing any previous content.
    pub fn save(&self, address: &Address, bytes: &[u8]) -> StorageResult<()> {
        self.ensure_parent_dirs(address)?;

        let path = self.file_path(address);
        if let Err(err) = self.fs.write(&path, bytes) {
            warn!(
                "event=entity_save module=storage status=error kind={} error={}",
                address.kind(),
                err
            );
            return Err(StorageError::from_io("write", path, err));
        }

        info!(
            "event=entity_save module=storage status=ok kind={} bytes={}",
            address.kind(),
            bytes.len()
        );
        Ok(())
    }

    /// Reads the entity file.
    ///
    /// # Errors
    /// - `StorageError::NotFound` when no file exists for `address`.
    pub fn load(&self, address: &Address) -> StorageResult<Vec<u8>> {
        let path = self.file_path(address);
        let bytes = self
            .fs
            .read(&path)
            .map_err(|err| StorageError::from_io("read", path, err))?;
        debug!(
            "event=entity_load module=storage status=ok kind={} bytes={}",
            address.kind(),
            bytes.len()
        );
        Ok(bytes)
    }

    /// Returns whether the entity file exists, without reading it.
    pub fn exists(&self, address: &Address) -> StorageResult<bool> {
        let path = self.file_path(address);
        self.fs
            .exists(&path)
            .map_err(|err| StorageError::from_io("stat", path, err))
    }

    /// Reads any file by path, e.g. one reported by `find_files`.
    pub fn read_file(&self, path: &Path) -> StorageResult<Vec<u8>> {
        self.fs
            .read(path)
            .map_err(|err| StorageError::from_io("read", path.to_path_buf(), err))
    }

    /// Removes the entity file.
    ///
    /// Contexts and domains also lose their whole directory, including any
    /// nested domains, concepts, tags and relation types.
    ///
    /// # Errors
    /// - `StorageError::NotFound` when the entity file does not exist.
    /// - `StorageError::CascadeDelete` when the directory walk fails; files
    ///   removed before the failure stay removed.
    pub fn delete(&self, address: &Address) -> StorageResult<()> {
        let path = self.file_path(address);
        self.fs
            .remove_file(&path)
            .map_err(|err| StorageError::from_io("remove file", path, err))?;

        if address.kind().is_container() {
            let dir = self.file_dir(address);
            if let Err((failed_at, source)) = self.remove_tree(&dir) {
                warn!(
                    "event=entity_delete module=storage status=error kind={} cascade=true error={}",
                    address.kind(),
                    source
                );
                return Err(StorageError::CascadeDelete {
                    dir,
                    path: failed_at,
                    source,
                });
            }
        }

        info!(
            "event=entity_delete module=storage status=ok kind={} cascade={}",
            address.kind(),
            address.kind().is_container()
        );
        Ok(())
    }

    /// Depth-first removal: files, then subdirectories, then `dir` itself.
    fn remove_tree(&self, dir: &Path) -> Result<(), (PathBuf, io::Error)> {
        let entries = self
            .fs
            .read_dir(dir)
            .map_err(|err| (dir.to_path_buf(), err))?;

        for entry in entries {
            if entry.is_dir {
                self.remove_tree(&entry.path)?;
                continue;
            }
            self.fs
                .remove_file(&entry.path)
                .map_err(|err| (entry.path.clone(), err))?;
        }

        self.fs
            .remove_dir(dir)
            .map_err(|err| (dir.to_path_buf(), err))
    }

    /// Visits entries under `folder`.
    ///
    /// Non-recursive: every direct entry, file or directory, is visited once.
    /// Recursive: directories are descended into but not visited; only leaf
    /// files are, depth-first in name order.
    ///
    /// # Errors
    /// - `StorageError::NotFound` when `folder` does not exist.
    /// - `StorageError::Io` when a directory cannot be read.
    pub fn find_files<V>(&self, folder: &Path, recursive: bool, mut visit: V) -> StorageResult<()>
    where
        V: FnMut(&Path),
    {
        self.walk(folder, recursive, &mut visit)
    }

    fn walk(
        &self,
        folder: &Path,
        recursive: bool,
        visit: &mut dyn FnMut(&Path),
    ) -> StorageResult<()> {
        let entries = self
            .fs
            .read_dir(folder)
            .map_err(|err| StorageError::from_io("read directory", folder.to_path_buf(), err))?;

        for entry in entries {
            if recursive && entry.is_dir {
                self.walk(&entry.path, recursive, visit)?;
                continue;
            }
            visit(&entry.path);
        }
        Ok(())
    }
}
