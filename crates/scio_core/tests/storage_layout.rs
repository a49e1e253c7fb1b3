use scio_core::{Address, DirEntry, FileSystem, LocalFileSystem, Storage, StorageError};
use std::io;
use std::path::{Path, PathBuf};

fn address(uri: &str) -> Address {
    Address::parse(uri).unwrap()
}

fn seed(storage: &Storage<impl FileSystem>, uris: &[&str]) {
    for uri in uris {
        storage.save(&address(uri), uri.as_bytes()).unwrap();
    }
}

#[test]
fn init_roots_creates_top_level_dirs_and_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::local(dir.path());

    storage.init_roots().unwrap();
    storage.init_roots().unwrap();

    for name in ["tags", "relations", "contexts"] {
        assert!(dir.path().join(name).is_dir(), "missing {name}/");
    }
}

#[test]
fn ensure_parent_dirs_creates_containing_directory_per_kind() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::local(dir.path());
    let cases = [
        ("scio://tags/urgent", "tags"),
        ("scio://relations/owns", "relations"),
        ("scio://contexts/shop/tags/promo", "contexts/shop/tags"),
        ("scio://contexts/shop/relations/sells", "contexts/shop/relations"),
        ("scio://contexts/shop", "contexts/shop"),
        ("scio://contexts/shop/domains/billing", "contexts/shop/domains/billing"),
        (
            "scio://contexts/shop/domains/billing/concepts/invoice",
            "contexts/shop/domains/billing",
        ),
    ];

    for (uri, expected) in cases {
        storage.ensure_parent_dirs(&address(uri)).unwrap();
        assert!(dir.path().join(expected).is_dir(), "uri: {uri}");
    }
}

#[test]
fn save_load_delete_roundtrip_for_global_tag() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::local(dir.path());
    let tag = address("scio://tags/urgent");

    storage.save(&tag, b"---\nentity: tag\n---\n").unwrap();
    assert_eq!(storage.load(&tag).unwrap(), b"---\nentity: tag\n---\n");
    assert!(dir.path().join("tags/urgent.md").is_file());

    storage.delete(&tag).unwrap();

    assert!(!dir.path().join("tags/urgent.md").exists());
    assert!(dir.path().join("tags").is_dir());
    assert!(matches!(storage.load(&tag), Err(StorageError::NotFound(_))));
}

#[test]
fn exists_tracks_the_entity_file() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::local(dir.path());
    let tag = address("scio://tags/urgent");

    assert!(!storage.exists(&tag).unwrap());
    storage.save(&tag, b"x").unwrap();
    assert!(storage.exists(&tag).unwrap());
    storage.delete(&tag).unwrap();
    assert!(!storage.exists(&tag).unwrap());
}

#[test]
fn deleting_a_tag_leaves_siblings_alone() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::local(dir.path());
    seed(&storage, &["scio://tags/a", "scio://tags/b"]);

    storage.delete(&address("scio://tags/a")).unwrap();

    assert!(dir.path().join("tags/b.md").is_file());
}

#[test]
fn deleting_a_context_removes_its_whole_subtree() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::local(dir.path());
    seed(
        &storage,
        &[
            "scio://contexts/shop",
            "scio://contexts/shop/tags/promo",
            "scio://contexts/shop/relations/sells",
            "scio://contexts/shop/domains/billing",
            "scio://contexts/shop/domains/billing/concepts/invoice",
            "scio://contexts/other",
        ],
    );

    storage.delete(&address("scio://contexts/shop")).unwrap();

    assert!(!dir.path().join("contexts/shop").exists());
    assert!(dir.path().join("contexts/other/context.md").is_file());
}

#[test]
fn deleting_a_domain_removes_its_concepts_only() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::local(dir.path());
    seed(
        &storage,
        &[
            "scio://contexts/shop",
            "scio://contexts/shop/domains/billing",
            "scio://contexts/shop/domains/billing/concepts/invoice",
            "scio://contexts/shop/domains/billing/concepts/refund",
            "scio://contexts/shop/domains/catalog",
        ],
    );

    storage
        .delete(&address("scio://contexts/shop/domains/billing"))
        .unwrap();

    assert!(!dir.path().join("contexts/shop/domains/billing").exists());
    assert!(dir.path().join("contexts/shop/context.md").is_file());
    assert!(dir
        .path()
        .join("contexts/shop/domains/catalog/domain.md")
        .is_file());
}

#[test]
fn deleting_a_missing_entity_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::local(dir.path());

    for uri in ["scio://tags/ghost", "scio://contexts/ghost"] {
        let err = storage.delete(&address(uri)).unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)), "uri: {uri}");
    }
}

fn file_fixture() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("sub/deep")).unwrap();
    std::fs::write(dir.path().join("a.txt"), "a").unwrap();
    std::fs::write(dir.path().join("b.md"), "b").unwrap();
    std::fs::write(dir.path().join("sub/c.txt"), "c").unwrap();
    std::fs::write(dir.path().join("sub/deep/d.txt"), "d").unwrap();
    dir
}

fn collect(storage: &Storage, folder: &Path, recursive: bool) -> Vec<PathBuf> {
    let mut seen = Vec::new();
    storage
        .find_files(folder, recursive, |path| seen.push(path.to_path_buf()))
        .unwrap();
    seen
}

#[test]
fn find_files_non_recursive_visits_direct_entries() {
    let dir = file_fixture();
    let storage = Storage::local(dir.path());

    let seen = collect(&storage, dir.path(), false);

    assert_eq!(
        seen,
        vec![
            dir.path().join("a.txt"),
            dir.path().join("b.md"),
            dir.path().join("sub"),
        ]
    );
}

#[test]
fn find_files_recursive_visits_only_leaf_files() {
    let dir = file_fixture();
    let storage = Storage::local(dir.path());

    let seen = collect(&storage, dir.path(), true);

    assert_eq!(
        seen,
        vec![
            dir.path().join("a.txt"),
            dir.path().join("b.md"),
            dir.path().join("sub/c.txt"),
            dir.path().join("sub/deep/d.txt"),
        ]
    );
}

#[test]
fn find_files_on_missing_folder_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::local(dir.path());

    let err = storage
        .find_files(&dir.path().join("missing"), true, |_| {})
        .unwrap_err();

    assert!(matches!(err, StorageError::NotFound(_)));
}

/// Local disk that refuses to remove directories.
struct StickyDirs;

impl FileSystem for StickyDirs {
    fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        LocalFileSystem.write(path, bytes)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        LocalFileSystem.read(path)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        LocalFileSystem.remove_file(path)
    }

    fn remove_dir(&self, _path: &Path) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        LocalFileSystem.create_dir_all(path)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        LocalFileSystem.read_dir(path)
    }

    fn exists(&self, path: &Path) -> io::Result<bool> {
        LocalFileSystem.exists(path)
    }
}

#[test]
fn failed_cascade_is_reported_separately_from_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::new(dir.path(), StickyDirs);
    seed(
        &storage,
        &[
            "scio://contexts/shop",
            "scio://contexts/shop/domains/billing",
            "scio://contexts/shop/domains/billing/concepts/invoice",
        ],
    );

    let err = storage.delete(&address("scio://contexts/shop")).unwrap_err();

    match err {
        StorageError::CascadeDelete { dir: root, path, .. } => {
            assert_eq!(root, dir.path().join("contexts/shop"));
            assert_eq!(path, dir.path().join("contexts/shop/domains/billing"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!dir.path().join("contexts/shop/context.md").exists());
    assert!(!dir
        .path()
        .join("contexts/shop/domains/billing/invoice.md")
        .exists());
}
