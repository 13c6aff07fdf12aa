//! Inverted index: posting store, builder and on-disk codec.

pub mod builder;
pub mod codec;
pub mod config;
pub mod posting;
pub mod store;

pub use builder::IndexBuilder;
pub use codec::{decode, decode_from_slice, encode, encode_to_vec};
pub use config::IndexConfig;
pub use posting::{IndexEntry, Position, Posting};
pub use store::{IndexStats, PostingStore, TermId};
