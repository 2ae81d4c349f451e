//! Persist and fetch against a real directory

use std::io;
use std::path::Path;

use bootstrap_asset::fetch::is_not_found;
use bootstrap_asset::{AssetFile, DirFetcher, FileFetcher};
use tempfile::TempDir;

#[test]
fn persisted_file_is_fetched_back() {
    let dir = TempDir::new().unwrap();
    let file = AssetFile::new("cluster-manifests/infraenv.yaml", b"kind: InfraEnv\n".to_vec());

    let path = file.persist(dir.path()).unwrap();
    assert!(path.starts_with(dir.path()));

    let fetched = DirFetcher::new(dir.path())
        .fetch_by_name(Path::new("cluster-manifests/infraenv.yaml"))
        .unwrap();

    assert_eq!(fetched, file);
    assert_eq!(fetched.hash(), file.hash());
}

#[test]
fn missing_file_is_not_found() {
    let dir = TempDir::new().unwrap();

    let err = DirFetcher::new(dir.path())
        .fetch_by_name(Path::new("agent-config.yaml"))
        .unwrap_err();

    assert!(is_not_found(&err));
    assert_eq!(err.kind(), io::ErrorKind::NotFound);
}

#[test]
fn persist_overwrites_previous_content() {
    let dir = TempDir::new().unwrap();
    AssetFile::new("a.yaml", b"old".to_vec())
        .persist(dir.path())
        .unwrap();
    AssetFile::new("a.yaml", b"new".to_vec())
        .persist(dir.path())
        .unwrap();

    let fetched = DirFetcher::new(dir.path())
        .fetch_by_name(Path::new("a.yaml"))
        .unwrap();
    assert_eq!(fetched.data(), b"new");
}
