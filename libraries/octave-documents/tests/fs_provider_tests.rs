//! Integration tests for the filesystem provider behind the access layer


use octave_documents::{
    DocumentAccess, DocumentProvider, DocumentUri, FsDocumentProvider, TagIndex,
};
use std::collections::HashSet;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

/// Access layer over a filesystem provider with the tag-reading index
fn access_for(provider: Arc<FsDocumentProvider>) -> DocumentAccess {
    let index = TagIndex::new(provider.clone());
    DocumentAccess::new(provider, Arc::new(index))
}

fn resolved_names(provider: &FsDocumentProvider, uris: &[DocumentUri]) -> Vec<String> {
    uris.iter()
        .filter_map(|uri| provider.resolve(uri).ok())
        .filter_map(|entry| entry.name)
        .collect()
}

#[test]
fn test_enumeration_filters_by_extension_case_insensitively() {
    test_helpers::init_tracing();
    let temp = TempDir::new().unwrap();
    test_helpers::create_audio_file(temp.path(), "song.MP3");
    test_helpers::create_audio_file(temp.path(), "track.flac");
    fs::write(temp.path().join("cover.jpg"), b"jpeg").unwrap();
    fs::write(temp.path().join("readme.txt"), b"readme").unwrap();

    let provider = Arc::new(FsDocumentProvider::new());
    let tree = provider.grant_tree(temp.path()).unwrap();
    let access = access_for(provider.clone());

    let files = access.list_audio_files(&tree);
    assert_eq!(files.len(), 2);

    // Each matching child appears exactly once, non-audio never
    let unique: HashSet<_> = files.iter().collect();
    assert_eq!(unique.len(), files.len());

    let names: HashSet<String> = resolved_names(&provider, &files).into_iter().collect();
    assert_eq!(
        names,
        HashSet::from(["song.MP3".to_string(), "track.flac".to_string()])
    );
}

#[test]
fn test_empty_directory_yields_empty_sequence() {
    let temp = TempDir::new().unwrap();
    let provider = Arc::new(FsDocumentProvider::new());
    let tree = provider.grant_tree(temp.path()).unwrap();
    let access = access_for(provider);

    assert!(access.list_audio_files(&tree).is_empty());
}

#[test]
fn test_enumeration_is_single_level() {
    let temp = TempDir::new().unwrap();
    test_helpers::create_audio_file(temp.path(), "top.mp3");
    let sub = temp.path().join("albums");
    fs::create_dir(&sub).unwrap();
    test_helpers::create_audio_file(&sub, "nested.mp3");

    let provider = Arc::new(FsDocumentProvider::new());
    let tree = provider.grant_tree(temp.path()).unwrap();
    let access = access_for(provider.clone());

    let files = access.list_audio_files(&tree);
    assert_eq!(resolved_names(&provider, &files), vec!["top.mp3"]);
}

#[test]
fn test_invalid_handles_yield_defaults_everywhere() {
    let provider = Arc::new(FsDocumentProvider::new());
    let access = access_for(provider);

    for raw in [
        "not a uri at all",
        "file:///etc",
        "doc://not-a-grant-id/x.mp3",
        "doc://4dfc9f70-0c2e-4b8e-9a55-7e9b2cfb6e01/x.mp3",
    ] {
        let uri = DocumentUri::new(raw);
        assert!(access.list_audio_files(&uri).is_empty(), "{}", raw);
        assert!(!access.persist_permissions(&uri), "{}", raw);
        assert!(access.audio_metadata(&uri).is_empty(), "{}", raw);
        assert!(access.read_content(&uri).is_empty(), "{}", raw);
    }
}

#[test]
fn test_read_roundtrip_is_byte_identical() {
    let temp = TempDir::new().unwrap();
    // Larger than one read chunk so the loop accumulates
    let content: Vec<u8> = (0..20_000u32).map(|i| (i % 251) as u8).collect();
    fs::write(temp.path().join("big.wav"), &content).unwrap();

    let provider = Arc::new(FsDocumentProvider::new());
    let tree = provider.grant_tree(temp.path()).unwrap();
    let access = access_for(provider);

    let files = access.list_audio_files(&tree);
    assert_eq!(files.len(), 1);

    let first = access.read_content(&files[0]);
    let second = access.read_content(&files[0]);
    assert_eq!(first, content);
    assert_eq!(first, second);
}

#[test]
fn test_zero_byte_file_reads_empty_successfully() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("silence.ogg"), b"").unwrap();

    let provider = Arc::new(FsDocumentProvider::new());
    let tree = provider.grant_tree(temp.path()).unwrap();
    let access = access_for(provider.clone());

    let files = access.list_audio_files(&tree);
    assert_eq!(files.len(), 1);
    // The handle resolves fine; the content is just empty
    assert!(provider.resolve(&files[0]).is_ok());
    assert!(access.read_content(&files[0]).is_empty());
}

#[test]
fn test_reading_a_directory_handle_is_empty() {
    let temp = TempDir::new().unwrap();
    let provider = Arc::new(FsDocumentProvider::new());
    let tree = provider.grant_tree(temp.path()).unwrap();
    let access = access_for(provider);

    assert!(access.read_content(&tree).is_empty());
    assert!(access.audio_metadata(&tree).is_empty());
}

#[test]
fn test_unparseable_audio_reports_empty_tags_not_failure() {
    let temp = TempDir::new().unwrap();
    test_helpers::create_audio_file(temp.path(), "untagged.flac");

    let provider = Arc::new(FsDocumentProvider::new());
    let tree = provider.grant_tree(temp.path()).unwrap();
    let access = access_for(provider);

    let files = access.list_audio_files(&tree);
    let tags = access.audio_metadata(&files[0]);
    assert_eq!(tags.title, "");
    assert_eq!(tags.artist, "");
    assert_eq!(tags.album, "");
}

#[test]
fn test_persist_is_idempotent_and_survives_restart() {
    let temp = TempDir::new().unwrap();
    let music = temp.path().join("music");
    fs::create_dir(&music).unwrap();
    test_helpers::create_audio_file(&music, "keeper.mp3");
    let store = temp.path().join("grants.json");

    let durable_tree;
    let transient_tree;
    {
        let provider = Arc::new(FsDocumentProvider::with_store_path(&store).unwrap());
        durable_tree = provider.grant_tree(&music).unwrap();
        transient_tree = provider.grant_tree(&music).unwrap();
        let access = access_for(provider);

        assert!(access.persist_permissions(&durable_tree));
        assert!(access.persist_permissions(&durable_tree));
    }

    // A fresh provider stands in for a process restart
    let provider = Arc::new(FsDocumentProvider::with_store_path(&store).unwrap());
    let access = access_for(provider);

    let files = access.list_audio_files(&durable_tree);
    assert_eq!(files.len(), 1);
    assert!(access.persist_permissions(&durable_tree));

    // The grant that was never persisted did not survive
    assert!(access.list_audio_files(&transient_tree).is_empty());
    assert!(!access.persist_permissions(&transient_tree));
}

#[test]
fn test_revoking_a_tree_degrades_every_operation() {
    let temp = TempDir::new().unwrap();
    test_helpers::create_audio_file(temp.path(), "gone.mp3");

    let provider = Arc::new(FsDocumentProvider::new());
    let tree = provider.grant_tree(temp.path()).unwrap();
    let access = access_for(provider.clone());

    let files = access.list_audio_files(&tree);
    assert_eq!(files.len(), 1);

    provider.revoke(&tree).unwrap();

    assert!(access.list_audio_files(&tree).is_empty());
    assert!(access.read_content(&files[0]).is_empty());
    assert!(access.audio_metadata(&files[0]).is_empty());
    assert!(!access.persist_permissions(&tree));
}
