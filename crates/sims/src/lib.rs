//! `sims` - Student information management service
//!
//! This library provides the record model, the whole-file JSON store, the
//! list/create/delete operations, and the HTTP router that serves them
//! together with a small browser client.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod http;
pub mod logging;
pub mod record;
pub mod server;
pub mod service;
pub mod store;
pub mod validate;

pub use config::Config;
pub use error::{Error, Result};
pub use filter::RecordFilter;
pub use http::{build_router, AppState};
pub use logging::init_logging;
pub use record::{Field, StudentRecord};
pub use service::StudentService;
pub use store::{JsonFileStore, MemoryStore, RecordStore};
pub use validate::ValidationPolicy;
