//! Byte-oriented file-system seam.
//!
//! # Responsibility
//! - Define the primitive operations the storage driver needs.
//! - Provide the local-disk implementation backed by `std::fs`.
//!
//! # Invariants
//! - Implementations hold no handles between calls.
//! - `read_dir` returns entries sorted by path.

use std::io;
use std::path::{Path, PathBuf};

/// One directory entry as reported by `FileSystem::read_dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub path: PathBuf,
    pub is_dir: bool,
}

/// Primitive hierarchical blob store.
///
/// Any durable store with hierarchical naming can stand in for local disk.
pub trait FileSystem: Send + Sync {
    /// Creates or fully overwrites the file at `path`.
    fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()>;
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
    fn remove_file(&self, path: &Path) -> io::Result<()>;
    /// Removes an empty directory.
    fn remove_dir(&self, path: &Path) -> io::Result<()>;
    /// Creates `path` and all missing ancestors; succeeds if it exists.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>>;
    /// Returns whether `path` names an existing file or directory.
    fn exists(&self, path: &Path) -> io::Result<bool>;
}

/// `FileSystem` over the local disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        std::fs::write(path, bytes)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_dir(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            entries.push(DirEntry {
                path: entry.path(),
                is_dir: entry.file_type()?.is_dir(),
            });
        }
        entries.sort_by(|left, right| left.path.cmp(&right.path));
        Ok(entries)
    }

    fn exists(&self, path: &Path) -> io::Result<bool> {
        path.try_exists()
    }
}

#[cfg(test)]
mod tests {
    use super::{FileSystem, LocalFileSystem};

    #[test]
    fn read_dir_is_sorted_and_flags_directories() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LocalFileSystem;
        fs.write(&dir.path().join("b.md"), b"b").unwrap();
        fs.create_dir_all(&dir.path().join("a")).unwrap();

        let entries = fs.read_dir(dir.path()).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].path, dir.path().join("a"));
        assert!(entries[0].is_dir);
        assert_eq!(entries[1].path, dir.path().join("b.md"));
        assert!(!entries[1].is_dir);
    }
}
