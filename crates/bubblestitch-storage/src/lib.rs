//! Bubble Stitch Storage Crate
//!
//! Persists patterns behind the [`PatternStore`] trait, with a JSON file
//! backend and an in-memory backend.

pub mod error;
pub mod file;
pub mod memory;
pub mod store;

pub use error::{StorageError, StorageResult};
pub use file::FilePatternStore;
pub use memory::MemoryPatternStore;
pub use store::PatternStore;
