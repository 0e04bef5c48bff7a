//! Bulk import of nations, leagues and clubs from a JSON bundle.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::{Club, League, Nation};
use crate::storage::{EntityStore, StorageError};

/// A JSON document holding records to seed the store with.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportBundle {
    #[serde(default)]
    pub nations: Vec<Nation>,

    #[serde(default)]
    pub leagues: Vec<League>,

    #[serde(default)]
    pub clubs: Vec<Club>,
}

impl ImportBundle {
    pub fn from_file(path: &Path) -> Result<Self, StorageError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

/// Records created by an import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub nations: usize,
    pub leagues: usize,
    pub clubs: usize,
}

/// Write a bundle into the store. Each record type is written all-or-nothing,
/// in the order nations, leagues, clubs.
pub fn import_bundle(
    store: &EntityStore,
    bundle: &ImportBundle,
) -> Result<ImportSummary, StorageError> {
    let summary = ImportSummary {
        nations: store.create_many(&bundle.nations)?,
        leagues: store.create_many(&bundle.leagues)?,
        clubs: store.create_many(&bundle.clubs)?,
    };

    info!(
        nations = summary.nations,
        leagues = summary.leagues,
        clubs = summary.clubs,
        "Imported bundle"
    );
    Ok(summary)
}
