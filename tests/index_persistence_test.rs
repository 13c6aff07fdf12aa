//! Integration tests for saving and loading index files

use std::fs;

use boolsearch::index::codec;
use boolsearch::prelude::*;
use boolsearch::storage::StorageConfig;
use tempfile::TempDir;

fn sample_store() -> Result<PostingStore> {
    let mut builder = IndexBuilder::with_default_analyzer()?;
    builder.add_text(1, "Back in Black, I hit the sack. I've been too long, I'm glad to be back")?;
    builder.add_text(2, "Легендарная песня группы Queen")?;
    builder.add_text(5, "The best-selling album of all time")?;
    Ok(builder.finish())
}

#[test]
fn test_save_and_load_roundtrip() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("index.bin");
    let config = StorageConfig::default();

    let store = sample_store()?;
    let written = store.save(&path, &config)?;
    assert_eq!(fs::metadata(&path)?.len(), written);

    let loaded = PostingStore::load(&path, &config)?;
    assert_eq!(loaded.all_entries(), store.all_entries());
    assert_eq!(loaded.doc_ids(), &[1, 2, 5]);

    let evaluator = QueryEvaluator::new(&loaded);
    assert_eq!(evaluator.and("back", "black"), vec![1]);
    assert_eq!(evaluator.lookup("песня"), &[2]);
    assert_eq!(evaluator.phrase_exact("best-selling album"), vec![5]);
    assert_eq!(
        loaded.lookup("back").unwrap().positions_for(1),
        Some(&[0, 14][..])
    );

    // No temporary files are left behind.
    let names = fs::read_dir(temp_dir.path())?
        .map(|e| e.map(|e| e.file_name().to_string_lossy().into_owned()))
        .collect::<std::io::Result<Vec<_>>>()?;
    assert_eq!(names, vec!["index.bin".to_string()]);

    Ok(())
}

#[test]
fn test_truncated_file_fails_to_load() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("index.bin");
    let config = StorageConfig::default();

    let mut store = PostingStore::new();
    store.record("back", 1, 0);
    store.record("black", 1, 2);
    store.save(&path, &config)?;

    let bytes = fs::read(&path)?;
    fs::write(&path, &bytes[..bytes.len() - 1])?;

    let err = PostingStore::load(&path, &config).unwrap_err();
    assert!(err.is_corruption(), "unexpected error: {err}");

    Ok(())
}

#[test]
fn test_save_replaces_existing_index() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("index.bin");
    let config = StorageConfig::default();

    fs::write(&path, b"stale")?;
    sample_store()?.save(&path, &config)?;

    let loaded = PostingStore::load(&path, &config)?;
    assert!(loaded.lookup("queen").is_some());

    Ok(())
}

#[test]
fn test_load_missing_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let result = PostingStore::load(temp_dir.path().join("nope.bin"), &StorageConfig::default());
    assert!(result.is_err());
}

#[test]
fn test_load_from_missing_directory_creates_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("no").join("such");

    let result = PostingStore::load(missing.join("index.bin"), &StorageConfig::default());
    assert!(result.is_err());
    assert!(!temp_dir.path().join("no").exists());
}

#[test]
fn test_save_creates_missing_directory() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("out").join("index.bin");
    let config = StorageConfig::default();

    sample_store()?.save(&path, &config)?;
    assert!(PostingStore::load(&path, &config)?.lookup("queen").is_some());

    Ok(())
}

#[test]
fn test_empty_store_roundtrip() -> Result<()> {
    let bytes = codec::encode_to_vec(&PostingStore::new())?;
    assert_eq!(bytes, vec![0, 0, 0, 0]);
    assert!(codec::decode_from_slice(&bytes)?.is_empty());
    Ok(())
}
