//! JSON file backed record store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info};

use super::RecordStore;
use crate::error::{Error, Result};
use crate::record::StudentRecord;

/// Contents written to a data file that does not exist yet.
const EMPTY_COLLECTION: &str = "[]";

/// Stores the collection as a pretty-printed JSON array in one file.
///
/// Writes overwrite the file in place. A crash mid-write can leave a
/// truncated file behind, which later loads report as
/// [`Error::StoreCorrupt`].
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Open the data file at `path`, creating it as an empty collection if
    /// it does not exist.
    ///
    /// Missing parent directories are created. An existing file is left
    /// untouched, even if it is malformed.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory or the file cannot be created.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|source| Error::DirectoryCreate {
                        path: parent.to_path_buf(),
                        source,
                    })?;
            }
        }

        let exists = tokio::fs::try_exists(&path)
            .await
            .map_err(|source| Error::StoreRead {
                path: path.clone(),
                source,
            })?;
        if exists {
            debug!("Using existing data file at {}", path.display());
        } else {
            tokio::fs::write(&path, EMPTY_COLLECTION)
                .await
                .map_err(|source| Error::StoreWrite {
                    path: path.clone(),
                    source,
                })?;
            info!("Created empty data file at {}", path.display());
        }

        Ok(Self { path })
    }

    /// Get the path to the data file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn load_all(&self) -> Result<Vec<StudentRecord>> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| Error::StoreRead {
                path: self.path.clone(),
                source,
            })?;
        let records: Vec<StudentRecord> =
            serde_json::from_slice(&bytes).map_err(|source| Error::StoreCorrupt {
                path: self.path.clone(),
                source,
            })?;
        debug!("Loaded {} records from {}", records.len(), self.path.display());
        Ok(records)
    }

    async fn save_all(&self, records: &[StudentRecord]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|source| Error::StoreWrite {
                path: self.path.clone(),
                source,
            })?;
        debug!("Saved {} records to {}", records.len(), self.path.display());
        Ok(())
    }
}
