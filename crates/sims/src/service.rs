//! The list, create and delete operations.
//!
//! [`StudentService`] owns the store handle and runs every mutation as a
//! load, modify, save cycle under the write side of an async lock, and every
//! list under its read side. Concurrent requests to one process therefore
//! neither drop each other's writes nor read a half-written data file.
//! Other processes writing the same data file are not coordinated with.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::record::StudentRecord;
use crate::store::RecordStore;
use crate::validate::ValidationPolicy;

/// Student operations over a [`RecordStore`].
#[derive(Debug, Clone)]
pub struct StudentService {
    store: Arc<dyn RecordStore>,
    policy: ValidationPolicy,
    lock: Arc<RwLock<()>>,
}

impl StudentService {
    /// Create a service with presence-only validation.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self::with_policy(store, ValidationPolicy::default())
    }

    /// Create a service with the given validation policy.
    #[must_use]
    pub fn with_policy(store: Arc<dyn RecordStore>, policy: ValidationPolicy) -> Self {
        Self {
            store,
            policy,
            lock: Arc::new(RwLock::new(())),
        }
    }

    /// The validation policy applied on create.
    #[must_use]
    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }

    /// Return every record in store order.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the collection cannot be loaded.
    pub async fn list(&self) -> Result<Vec<StudentRecord>> {
        let _guard = self.lock.read().await;
        self.store.load_all().await
    }

    /// Validate `candidate` and append it to the collection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingFields`] or a strict-mode validation error if
    /// the candidate is rejected, [`Error::DuplicateStudentId`] if its id is
    /// taken, or a storage error.
    pub async fn create(&self, candidate: StudentRecord) -> Result<()> {
        self.policy.check(&candidate)?;

        let _guard = self.lock.write().await;
        let mut records = self.store.load_all().await?;
        if records.iter().any(|r| r.has_id(&candidate.student_id.text())) {
            debug!("Rejecting duplicate student id {}", candidate.student_id);
            return Err(Error::duplicate(candidate.student_id.to_string()));
        }

        info!("Adding student {}", candidate.student_id);
        records.push(candidate);
        self.store.save_all(&records).await
    }

    /// Remove the first record whose id equals `student_id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StudentNotFound`] if no record matches, or a storage
    /// error.
    pub async fn delete(&self, student_id: &str) -> Result<()> {
        let _guard = self.lock.write().await;
        let mut records = self.store.load_all().await?;
        let Some(index) = records.iter().position(|r| r.has_id(student_id)) else {
            debug!("No student with id {student_id}");
            return Err(Error::not_found(student_id));
        };

        records.remove(index);
        info!("Deleted student {student_id}");
        self.store.save_all(&records).await
    }
}
