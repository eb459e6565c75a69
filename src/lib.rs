//! # sparkdb - YAML to SQLite parameter tables
//!
//! Converts a set of YAML configuration files into one flat key-value
//! table in a SQLite database.
//!
//! sparkdb provides:
//! - A collector that namespaces each YAML file by its file stem
//! - A flattener that turns nested mappings into dotted keys
//! - An upserting writer and a typed reader for the `parameters` table

pub mod value;
pub mod flatten;
pub mod collect;
pub mod storage;
pub mod build;
pub mod config;
pub mod ui;

// Re-exports for convenient access
pub use build::{build_database, BuildOptions, BuildReport};
pub use collect::{collect_sources, Collection};
pub use flatten::{flatten, flatten_with, Parameters};
pub use storage::ParameterStore;

use std::path::PathBuf;

/// Result type alias for sparkdb operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for sparkdb operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("YAML error in {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Expected a single YAML document in {}", .0.display())]
    MultipleDocuments(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Directory traversal error: {0}")]
    Traversal(#[from] glob::GlobError),

    #[error("Config error: {0}")]
    Config(String),
}
