//! # Brewgraph - In-memory brewery graph
//!
//! A small relational dataset (breweries, beers, reviews, users) held in memory
//! and served through named resolvers.
//!
//! Brewgraph provides:
//! - Typed entity tables with maintained back-references
//! - A bulk loader for untyped JSON rows
//! - Read and mutation resolvers callable by field name
//! - Per-table write-back after every successful mutation

pub mod model;
pub mod store;
pub mod loader;
pub mod storage;
pub mod query;
pub mod config;
pub mod output;
pub mod ui;

// Re-exports for convenient access
pub use model::{Beer, Brewery, EntityKind, Review, User};
pub use store::{EntityStore, StoreStats};
pub use loader::{Dataset, LoadReport};
pub use storage::{DurabilityPolicy, JsonFilePersister, MemoryPersister, Persister};
pub use query::{Executor, Resolvers, Selection};

/// Result type alias for Brewgraph operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Brewgraph operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    #[error("{kind} not found for ID: {id}")]
    ReferenceNotFound { kind: EntityKind, id: String },

    #[error("Duplicate {kind} ID: {id}")]
    DuplicateId { kind: EntityKind, id: String },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Failed to persist {kind} table: {reason}")]
    PersistenceFailure { kind: EntityKind, reason: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error is a plain read miss rather than a failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}
