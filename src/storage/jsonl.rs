//! JSONL (JSON Lines) storage.
//!
//! Each line is a valid JSON object representing one record.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::PathBuf;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use super::{StorageConfig, StorageError};

/// Record types kept in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityType {
    Nation,
    Club,
    League,
    Season,
    LeagueTable,
}

impl EntityType {
    /// Get the filename for this entity type.
    pub fn filename(&self) -> &'static str {
        match self {
            EntityType::Nation => "nations.jsonl",
            EntityType::Club => "clubs.jsonl",
            EntityType::League => "leagues.jsonl",
            EntityType::Season => "seasons.jsonl",
            EntityType::LeagueTable => "league_tables.jsonl",
        }
    }

    /// Human-readable name used in errors and logs.
    pub fn label(&self) -> &'static str {
        match self {
            EntityType::Nation => "nation",
            EntityType::Club => "club",
            EntityType::League => "league",
            EntityType::Season => "season",
            EntityType::LeagueTable => "league table row",
        }
    }
}

/// Get the path for an entity file.
pub fn entity_path(config: &StorageConfig, entity: EntityType) -> PathBuf {
    config.records_dir().join(entity.filename())
}

/// JSONL file writer.
pub struct JsonlWriter<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Serialize> JsonlWriter<T> {
    /// Create a new JSONL writer for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Create a writer for a specific entity type.
    pub fn for_entity(config: &StorageConfig, entity: EntityType) -> Self {
        Self::new(entity_path(config, entity))
    }

    fn ensure_dir(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Append a single record to the file.
    pub fn append(&self, entity: &T) -> Result<(), StorageError> {
        self.ensure_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = BufWriter::new(file);
        let json = serde_json::to_string(entity)?;
        writeln!(writer, "{}", json)?;
        writer.flush()?;

        debug!("Appended record to {:?}", self.path);
        Ok(())
    }

    /// Append multiple records to the file.
    pub fn append_batch(&self, entities: &[T]) -> Result<usize, StorageError> {
        if entities.is_empty() {
            return Ok(0);
        }

        self.ensure_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = BufWriter::new(file);
        for entity in entities {
            let json = serde_json::to_string(entity)?;
            writeln!(writer, "{}", json)?;
        }

        writer.flush()?;
        debug!("Appended {} records to {:?}", entities.len(), self.path);

        Ok(entities.len())
    }

    /// Write records, replacing the entire file.
    pub fn write_all(&self, entities: &[T]) -> Result<usize, StorageError> {
        self.ensure_dir()?;

        // Write beside the target and rename so readers never see a
        // half-written file.
        let tmp = self.path.with_extension("jsonl.tmp");
        {
            let file = File::create(&tmp)?;
            let mut writer = BufWriter::new(file);
            for entity in entities {
                let json = serde_json::to_string(entity)?;
                writeln!(writer, "{}", json)?;
            }
            writer.flush()?;
        }
        fs::rename(&tmp, &self.path)?;

        debug!("Wrote {} records to {:?}", entities.len(), self.path);
        Ok(entities.len())
    }
}

/// JSONL file reader.
pub struct JsonlReader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonlReader<T> {
    /// Create a new JSONL reader for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Create a reader for a specific entity type.
    pub fn for_entity(config: &StorageConfig, entity: EntityType) -> Self {
        Self::new(entity_path(config, entity))
    }

    /// Read all records from the file. Unparseable lines are skipped.
    pub fn read_all(&self) -> Result<Vec<T>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut entities = Vec::new();

        for (i, line) in reader.lines().enumerate() {
            let line = line?;

            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str(&line) {
                Ok(entity) => entities.push(entity),
                Err(e) => {
                    warn!("Failed to parse line {} in {:?}: {}", i + 1, self.path, e);
                }
            }
        }

        debug!("Read {} records from {:?}", entities.len(), self.path);
        Ok(entities)
    }

    /// Read records matching a predicate.
    pub fn read_where<F>(&self, predicate: F) -> Result<Vec<T>, StorageError>
    where
        F: Fn(&T) -> bool,
    {
        let all = self.read_all()?;
        Ok(all.into_iter().filter(predicate).collect())
    }

    /// Count non-empty lines in the file.
    pub fn count(&self) -> Result<usize, StorageError> {
        if !self.path.exists() {
            return Ok(0);
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut count = 0;
        for line in reader.lines() {
            if !line?.trim().is_empty() {
                count += 1;
            }
        }

        Ok(count)
    }
}
