//! Binary encoding of a [`PostingStore`].
//!
//! # File layout
//!
//! All integers are 32-bit little-endian with no padding:
//!
//! ```text
//! entry_count: int32
//! repeat entry_count times:
//!   term_length: int32
//!   term_bytes:  term_length bytes of UTF-8
//!   doc_count:   int32
//!   repeat doc_count times:
//!     doc_id:         int32
//!     position_count: int32
//!     positions:      position_count × int32
//! ```
//!
//! Entries are written in store order. Decoding either returns a complete
//! store or an error; a truncated or inconsistent file never yields a
//! partially populated store.

use std::io::{Read, Write};
use std::path::Path;

use log::{debug, info, warn};

use crate::document::DocId;
use crate::error::{BoolSearchError, Result};
use crate::index::posting::{IndexEntry, Position, is_strictly_ascending};
use crate::index::store::PostingStore;
use crate::storage::{
    FileStorage, MAX_INT32_FIELD, Storage, StorageConfig, StructReader, StructWriter,
};

/// Smallest possible encoded entry: an empty term and no documents.
const MIN_ENTRY_SIZE: u64 = 8;
/// Smallest possible encoded posting: a doc id and an empty position count.
const MIN_POSTING_SIZE: u64 = 8;
const POSITION_SIZE: u64 = 4;

/// Encode `store` into `writer`, returning the number of bytes written.
pub fn encode<W: Write>(store: &PostingStore, writer: W) -> Result<u64> {
    let mut writer = StructWriter::new(writer);
    writer.write_len(store.len())?;

    for entry in store.iter() {
        let term = entry.term().as_bytes();
        writer.write_len(term.len())?;
        writer.write_raw(term)?;
        writer.write_len(entry.doc_frequency())?;

        for posting in entry.postings() {
            check_int32(posting.doc_id, entry.term(), "document id")?;
            writer.write_u32(posting.doc_id)?;
            writer.write_len(posting.positions.len())?;
            if let Some(&last) = posting.positions.last() {
                check_int32(last, entry.term(), "position")?;
            }
            writer.write_u32_slice(posting.positions)?;
        }
    }

    let written = writer.position();
    writer.into_inner()?;
    debug!("Encoded {} entries into {written} bytes", store.len());
    Ok(written)
}

fn check_int32(value: u32, term: &str, what: &str) -> Result<()> {
    if u64::from(value) > MAX_INT32_FIELD {
        return Err(BoolSearchError::index(format!(
            "{what} {value} of term '{term}' does not fit in an int32 field"
        )));
    }
    Ok(())
}

/// Encode `store` into a byte vector.
pub fn encode_to_vec(store: &PostingStore) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    encode(store, &mut bytes)?;
    Ok(bytes)
}

/// Decode a store from `size` bytes of `reader`.
pub fn decode<R: Read>(reader: R, size: u64) -> Result<PostingStore> {
    let mut reader = StructReader::new(reader, size);
    let entry_count = reader.read_count(MIN_ENTRY_SIZE, "entry count")?;
    let mut store = PostingStore::with_capacity(entry_count);

    for _ in 0..entry_count {
        let entry_offset = reader.position();
        let entry = decode_entry(&mut reader)?;
        if store.insert_entry(entry).is_none() {
            return Err(BoolSearchError::corrupted(entry_offset, "duplicate term"));
        }
    }
    store.rebuild_documents();

    if !reader.is_eof() {
        warn!(
            "Ignoring {} trailing bytes after the last index entry",
            reader.remaining()
        );
    }

    debug!(
        "Decoded {} entries over {} documents",
        store.len(),
        store.doc_count()
    );
    Ok(store)
}

fn decode_entry<R: Read>(reader: &mut StructReader<R>) -> Result<IndexEntry> {
    let term_length = reader.read_count(1, "term length")?;
    let term_offset = reader.position();
    let term = String::from_utf8(reader.read_raw(term_length)?).map_err(|e| {
        BoolSearchError::corrupted(term_offset, format!("term is not valid UTF-8: {e}"))
    })?;

    let doc_count = reader.read_count(MIN_POSTING_SIZE, "document count")?;
    let mut doc_ids: Vec<DocId> = Vec::with_capacity(doc_count);
    let mut positions: Vec<Vec<Position>> = Vec::with_capacity(doc_count);

    for _ in 0..doc_count {
        let doc_offset = reader.position();
        let doc_id = reader.read_u32()?;
        if u64::from(doc_id) > MAX_INT32_FIELD {
            return Err(BoolSearchError::corrupted(
                doc_offset,
                format!("negative document id in term '{term}'"),
            ));
        }
        if doc_ids.last().is_some_and(|&prev| prev >= doc_id) {
            return Err(BoolSearchError::corrupted(
                doc_offset,
                format!("document ids of term '{term}' are not ascending"),
            ));
        }

        let position_count = reader.read_count(POSITION_SIZE, "position count")?;
        let positions_offset = reader.position();
        let doc_positions = reader.read_u32_vec(position_count)?;
        if !is_strictly_ascending(&doc_positions)
            || doc_positions
                .last()
                .is_some_and(|&last| u64::from(last) > MAX_INT32_FIELD)
        {
            return Err(BoolSearchError::corrupted(
                positions_offset,
                format!("positions of term '{term}' in document {doc_id} are not ascending"),
            ));
        }

        doc_ids.push(doc_id);
        positions.push(doc_positions);
    }

    Ok(IndexEntry::from_parts(term, doc_ids, positions))
}

/// Decode a store from an in-memory buffer.
pub fn decode_from_slice(bytes: &[u8]) -> Result<PostingStore> {
    decode(bytes, bytes.len() as u64)
}

/// Write `store` as `name` in `storage`.
///
/// The data goes to a temporary file first and is renamed over `name` only
/// once it is completely written.
pub fn write_to_storage(store: &PostingStore, storage: &dyn Storage, name: &str) -> Result<u64> {
    let (temp_name, mut output) = storage.create_temp_output(name)?;

    let written = encode(store, &mut output).and_then(|written| {
        output.close()?;
        Ok(written)
    });

    match written {
        Ok(written) => {
            storage.rename_file(&temp_name, name)?;
            Ok(written)
        }
        Err(e) => {
            drop(output);
            if let Err(cleanup) = storage.delete_file(&temp_name) {
                warn!("Failed to remove temporary file {temp_name}: {cleanup}");
            }
            Err(e)
        }
    }
}

/// Read the store saved as `name` in `storage`.
pub fn read_from_storage(storage: &dyn Storage, name: &str) -> Result<PostingStore> {
    let mut input = storage.open_input(name)?;
    let size = input.size()?;
    decode(&mut input, size)
}

impl PostingStore {
    /// Save the store to a file, replacing it atomically.
    pub fn save<P: AsRef<Path>>(&self, path: P, config: &StorageConfig) -> Result<u64> {
        let path = path.as_ref();
        let (storage, name) = FileStorage::for_file(path, config.clone())?;
        let written = write_to_storage(self, &storage, &name)?;
        info!(
            "Saved {} terms to {} ({written} bytes)",
            self.len(),
            path.display()
        );
        Ok(written)
    }

    /// Load a store from a file written by [`PostingStore::save`].
    pub fn load<P: AsRef<Path>>(path: P, config: &StorageConfig) -> Result<Self> {
        let path = path.as_ref();
        let (storage, name) = FileStorage::for_existing_file(path, config.clone())?;
        let store = read_from_storage(&storage, &name)?;
        info!("Loaded {} terms from {}", store.len(), path.display());
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn two_entry_store() -> PostingStore {
        let mut store = PostingStore::new();
        store.record("back", 1, 0);
        store.record("black", 1, 2);
        store.record("black", 3, 0);
        store.record("black", 3, 4);
        store
    }

    #[test]
    fn test_encoded_layout() {
        let mut store = PostingStore::new();
        store.record("ab", 7, 1);

        let bytes = encode_to_vec(&store).unwrap();
        assert_eq!(
            bytes,
            vec![
                1, 0, 0, 0, // entry_count
                2, 0, 0, 0, b'a', b'b', // term
                1, 0, 0, 0, // doc_count
                7, 0, 0, 0, // doc_id
                1, 0, 0, 0, // position_count
                1, 0, 0, 0, // positions
            ]
        );
    }

    #[test]
    fn test_roundtrip_preserves_order_and_positions() {
        let store = two_entry_store();
        let decoded = decode_from_slice(&encode_to_vec(&store).unwrap()).unwrap();

        assert_eq!(decoded.all_entries(), store.all_entries());
        assert_eq!(decoded.doc_ids(), &[1, 3]);
    }

    #[test]
    fn test_decoded_universe_is_sorted_when_high_ids_come_first() {
        let mut store = PostingStore::new();
        store.record("rock", 900, 0);
        store.record("pop", 5, 0);
        store.record("pop", 900, 1);
        store.record("funk", 2, 0);

        let decoded = decode_from_slice(&encode_to_vec(&store).unwrap()).unwrap();
        assert_eq!(decoded.doc_ids(), &[2, 5, 900]);
    }

    #[test]
    fn test_every_truncation_fails() {
        let bytes = encode_to_vec(&two_entry_store()).unwrap();

        for len in 0..bytes.len() {
            let err = decode_from_slice(&bytes[..len]).unwrap_err();
            assert!(err.is_corruption(), "length {len}: {err}");
        }
    }

    #[test]
    fn test_oversized_count_is_rejected() {
        let mut bytes = encode_to_vec(&two_entry_store()).unwrap();
        // Claim a huge position count for the first posting.
        bytes[20..24].copy_from_slice(&1_000_000u32.to_le_bytes());

        let err = decode_from_slice(&bytes).unwrap_err();
        assert!(err.is_corruption());
    }

    #[test]
    fn test_unsorted_doc_ids_are_rejected() {
        let mut store = PostingStore::new();
        store.record("rock", 1, 0);
        store.record("rock", 2, 0);
        let mut bytes = encode_to_vec(&store).unwrap();
        // Second doc id follows at 4 + 4 + 4 + 4 + (4 + 4 + 4).
        bytes[28..32].copy_from_slice(&1u32.to_le_bytes());

        let err = decode_from_slice(&bytes).unwrap_err();
        assert!(err.to_string().contains("not ascending"));
    }

    #[test]
    fn test_duplicate_terms_are_rejected() {
        let mut store = PostingStore::new();
        store.record("rock", 1, 0);
        let entry = encode_to_vec(&store).unwrap()[4..].to_vec();

        let mut bytes = 2u32.to_le_bytes().to_vec();
        bytes.extend_from_slice(&entry);
        bytes.extend_from_slice(&entry);

        let err = decode_from_slice(&bytes).unwrap_err();
        assert!(err.to_string().contains("duplicate term"));
    }

    #[test]
    fn test_trailing_bytes_are_ignored() {
        let store = two_entry_store();
        let mut bytes = encode_to_vec(&store).unwrap();
        bytes.extend_from_slice(&[0xff, 0xff]);

        let decoded = decode_from_slice(&bytes).unwrap();
        assert_eq!(decoded.len(), 2);
    }

    #[test]
    fn test_storage_roundtrip_replaces_target() {
        let storage = MemoryStorage::new_default();
        storage.put_bytes("index.bin", vec![1, 2, 3]);

        let store = two_entry_store();
        let written = write_to_storage(&store, &storage, "index.bin").unwrap();

        assert_eq!(storage.file_size("index.bin").unwrap(), written);
        assert_eq!(storage.list_files().unwrap(), vec!["index.bin".to_string()]);

        let loaded = read_from_storage(&storage, "index.bin").unwrap();
        assert_eq!(loaded.all_entries(), store.all_entries());
    }

    #[test]
    fn test_unencodable_store_leaves_target_untouched() {
        let storage = MemoryStorage::new_default();
        storage.put_bytes("index.bin", vec![1, 2, 3]);

        let mut store = PostingStore::new();
        store.record("rock", u32::MAX, 0);

        assert!(write_to_storage(&store, &storage, "index.bin").is_err());
        assert_eq!(storage.get_bytes("index.bin"), Some(vec![1, 2, 3]));
        assert_eq!(storage.file_count(), 1);
    }
}
