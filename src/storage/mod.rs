//! Filesystem record store.
//!
//! Every record type lives in its own JSONL file under
//! `<data_dir>/records/`. The JSONL layer handles the file format; the
//! store layer adds identity-aware CRUD and the domain queries the season
//! workflow needs.

pub mod jsonl;
pub mod store;

pub use jsonl::*;
pub use store::*;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("{entity} already exists: {id}")]
    Duplicate { entity: &'static str, id: String },
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn records_dir(&self) -> PathBuf {
        self.data_dir.join("records")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_config_paths() {
        let config = StorageConfig::new(PathBuf::from("/data"));
        assert_eq!(config.records_dir(), PathBuf::from("/data/records"));
    }

    #[test]
    fn test_storage_config_default() {
        let config = StorageConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("./data"));
    }

    #[test]
    fn test_error_messages() {
        let err = StorageError::NotFound {
            entity: "club",
            id: "c1".to_string(),
        };
        assert_eq!(err.to_string(), "club not found: c1");

        let err = StorageError::Duplicate {
            entity: "season",
            id: "s1".to_string(),
        };
        assert_eq!(err.to_string(), "season already exists: s1");
    }
}
