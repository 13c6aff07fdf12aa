//! Storage abstraction layer.
//!
//! Index files are written and read through the [`Storage`] trait, with a
//! file-system backend for real use and a memory backend for tests.

pub mod file;
pub mod memory;
pub mod structured;
pub mod traits;

pub use file::*;
pub use memory::*;
pub use structured::*;
pub use traits::*;
