//! In-memory record store.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::RecordStore;
use crate::error::Result;
use crate::record::StudentRecord;

/// Keeps the collection in process memory. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<StudentRecord>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `records`.
    #[must_use]
    pub fn with_records(records: Vec<StudentRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn load_all(&self) -> Result<Vec<StudentRecord>> {
        Ok(self.records.read().await.clone())
    }

    async fn save_all(&self, records: &[StudentRecord]) -> Result<()> {
        *self.records.write().await = records.to_vec();
        Ok(())
    }
}
