//! Record storage for sims.
//!
//! The service reads and writes the student collection wholesale through the
//! [`RecordStore`] trait. [`JsonFileStore`] keeps the collection in a single
//! pretty-printed JSON file; [`MemoryStore`] keeps it in process memory.
//!
//! Stores do no indexing or caching: every call to
//! [`RecordStore::load_all`] returns the complete current collection, and
//! every call to [`RecordStore::save_all`] replaces it.

mod file;
mod memory;

use async_trait::async_trait;

use crate::error::Result;
use crate::record::StudentRecord;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// Whole-collection persistence for student records.
#[async_trait]
pub trait RecordStore: Send + Sync + std::fmt::Debug {
    /// Read the entire collection, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backing data cannot be read or parsed.
    async fn load_all(&self) -> Result<Vec<StudentRecord>>;

    /// Replace the entire collection.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backing data cannot be written.
    async fn save_all(&self, records: &[StudentRecord]) -> Result<()>;
}
