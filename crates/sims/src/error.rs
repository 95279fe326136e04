//! Error types for sims.
//!
//! This module defines all error types used throughout the sims crate. The
//! validation and lookup variants carry the exact messages the HTTP API
//! returns to clients.

use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for sims operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to read the data file.
    #[error("failed to read data file {path}: {source}")]
    StoreRead {
        /// Path to the data file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the data file.
    #[error("failed to write data file {path}: {source}")]
    StoreWrite {
        /// Path to the data file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The data file does not contain a JSON array of student records.
    #[error("malformed data file {path}: {source}")]
    StoreCorrupt {
        /// Path to the data file.
        path: PathBuf,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    // === Validation Errors ===
    /// One of `studentId`, `fullName` or `gmail` is empty.
    #[error("Missing required fields")]
    MissingFields,

    /// A record with the same `studentId` already exists.
    #[error("Student ID already exists")]
    DuplicateStudentId {
        /// The conflicting student id.
        student_id: String,
    },

    /// The gmail address does not match the accepted pattern.
    #[error("Invalid Gmail address")]
    InvalidGmail {
        /// The rejected address.
        gmail: String,
    },

    /// The year level is not a positive number.
    #[error("Year Level must be a positive number")]
    InvalidYearLevel {
        /// The rejected value.
        year_level: String,
    },

    // === Lookup Errors ===
    /// No record has the requested `studentId`.
    #[error("Student not found")]
    StudentNotFound {
        /// The id that was looked up.
        student_id: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Server Errors ===
    /// Failed to bind the listening socket.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// The address that could not be bound.
        addr: SocketAddr,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === I/O Errors ===
    /// File system or socket operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for sims operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a duplicate student id error.
    #[must_use]
    pub fn duplicate(student_id: impl Into<String>) -> Self {
        Self::DuplicateStudentId {
            student_id: student_id.into(),
        }
    }

    /// Create a student not found error.
    #[must_use]
    pub fn not_found(student_id: impl Into<String>) -> Self {
        Self::StudentNotFound {
            student_id: student_id.into(),
        }
    }

    /// Check if this error was caused by caller input that can be corrected.
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::MissingFields
                | Self::DuplicateStudentId { .. }
                | Self::InvalidGmail { .. }
                | Self::InvalidYearLevel { .. }
        )
    }

    /// Check if this error indicates the requested student does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::StudentNotFound { .. })
    }

    /// Check if this error came from the record store.
    #[must_use]
    pub fn is_storage_error(&self) -> bool {
        matches!(
            self,
            Self::StoreRead { .. }
                | Self::StoreWrite { .. }
                | Self::StoreCorrupt { .. }
                | Self::DirectoryCreate { .. }
        )
    }
}
