//! Identity-aware record store on top of the JSONL files.

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info};

use super::{EntityType, JsonlReader, JsonlWriter, StorageConfig, StorageError};
use crate::models::{
    Club, EntityId, League, LeagueId, LeagueTableEntry, Nation, NationId, Season, SeasonId,
};

/// A record type with an identity and a home file.
pub trait Record: Serialize + DeserializeOwned + Clone {
    const ENTITY: EntityType;

    fn id(&self) -> &EntityId;
}

impl Record for Nation {
    const ENTITY: EntityType = EntityType::Nation;

    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl Record for Club {
    const ENTITY: EntityType = EntityType::Club;

    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl Record for League {
    const ENTITY: EntityType = EntityType::League;

    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl Record for Season {
    const ENTITY: EntityType = EntityType::Season;

    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl Record for LeagueTableEntry {
    const ENTITY: EntityType = EntityType::LeagueTable;

    fn id(&self) -> &EntityId {
        &self.id
    }
}

fn not_found<T: Record>(id: &EntityId) -> StorageError {
    StorageError::NotFound {
        entity: T::ENTITY.label(),
        id: id.to_string(),
    }
}

fn duplicate<T: Record>(id: &EntityId) -> StorageError {
    StorageError::Duplicate {
        entity: T::ENTITY.label(),
        id: id.to_string(),
    }
}

/// Generic list/get/create/update/delete over the record files.
///
/// The store does no locking of its own; callers that write concurrently
/// must serialize their writes.
#[derive(Debug, Clone)]
pub struct EntityStore {
    config: StorageConfig,
}

impl EntityStore {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    fn reader<T: Record>(&self) -> JsonlReader<T> {
        JsonlReader::for_entity(&self.config, T::ENTITY)
    }

    fn writer<T: Record>(&self) -> JsonlWriter<T> {
        JsonlWriter::for_entity(&self.config, T::ENTITY)
    }

    /// All records of a type, in file order.
    pub fn list<T: Record>(&self) -> Result<Vec<T>, StorageError> {
        self.reader::<T>().read_all()
    }

    /// Records of a type matching a predicate.
    pub fn filter<T, F>(&self, predicate: F) -> Result<Vec<T>, StorageError>
    where
        T: Record,
        F: Fn(&T) -> bool,
    {
        self.reader::<T>().read_where(predicate)
    }

    pub fn get<T: Record>(&self, id: &EntityId) -> Result<Option<T>, StorageError> {
        Ok(self.list::<T>()?.into_iter().find(|r| r.id() == id))
    }

    /// Like `get`, but a missing record is an error.
    pub fn require<T: Record>(&self, id: &EntityId) -> Result<T, StorageError> {
        self.get(id)?.ok_or_else(|| not_found::<T>(id))
    }

    pub fn count<T: Record>(&self) -> Result<usize, StorageError> {
        self.reader::<T>().count()
    }

    /// Append a new record. Fails if the id is already taken.
    pub fn create<T: Record>(&self, record: &T) -> Result<(), StorageError> {
        if self.get::<T>(record.id())?.is_some() {
            return Err(duplicate::<T>(record.id()));
        }

        self.writer::<T>().append(record)?;
        debug!(entity = T::ENTITY.label(), id = %record.id(), "Created record");
        Ok(())
    }

    /// Append several new records at once. Fails before writing anything if
    /// any id is already taken or repeated within the batch.
    pub fn create_many<T: Record>(&self, records: &[T]) -> Result<usize, StorageError> {
        let mut taken: Vec<EntityId> = self.list::<T>()?.iter().map(|r| r.id().clone()).collect();
        for record in records {
            if taken.contains(record.id()) {
                return Err(duplicate::<T>(record.id()));
            }
            taken.push(record.id().clone());
        }

        let written = self.writer::<T>().append_batch(records)?;
        info!(entity = T::ENTITY.label(), count = written, "Created records");
        Ok(written)
    }

    /// Replace an existing record with the same id.
    pub fn update<T: Record>(&self, record: &T) -> Result<(), StorageError> {
        let mut all = self.list::<T>()?;
        let slot = all
            .iter_mut()
            .find(|r| r.id() == record.id())
            .ok_or_else(|| not_found::<T>(record.id()))?;
        *slot = record.clone();

        self.writer::<T>().write_all(&all)?;
        debug!(entity = T::ENTITY.label(), id = %record.id(), "Updated record");
        Ok(())
    }

    /// Remove a record, returning it.
    pub fn delete<T: Record>(&self, id: &EntityId) -> Result<T, StorageError> {
        let mut all = self.list::<T>()?;
        let index = all
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| not_found::<T>(id))?;
        let removed = all.remove(index);

        self.writer::<T>().write_all(&all)?;
        debug!(entity = T::ENTITY.label(), id = %id, "Deleted record");
        Ok(removed)
    }

    pub fn clubs_in_league(&self, league_id: &LeagueId) -> Result<Vec<Club>, StorageError> {
        self.filter(|c: &Club| c.league_id.as_ref() == Some(league_id))
    }

    pub fn clubs_in_nation(&self, nation_id: &NationId) -> Result<Vec<Club>, StorageError> {
        self.filter(|c: &Club| c.nation_id.as_ref() == Some(nation_id))
    }

    /// Table rows of the most recent saved season of a league before `year`.
    pub fn previous_standings(
        &self,
        league_id: &LeagueId,
        year: i32,
    ) -> Result<Vec<LeagueTableEntry>, StorageError> {
        let earlier =
            self.filter(|e: &LeagueTableEntry| &e.league_id == league_id && e.year < year)?;

        let Some(latest) = earlier.iter().map(|e| e.year).max() else {
            return Ok(Vec::new());
        };

        Ok(earlier.into_iter().filter(|e| e.year == latest).collect())
    }

    /// Saved seasons of a league, most recent first.
    pub fn seasons_for_league(&self, league_id: &LeagueId) -> Result<Vec<Season>, StorageError> {
        let mut seasons = self.filter(|s: &Season| &s.league_id == league_id)?;
        seasons.sort_by(|a, b| b.year.cmp(&a.year));
        Ok(seasons)
    }

    /// Table rows of a saved season, in position order.
    pub fn table_for_season(
        &self,
        season_id: &SeasonId,
    ) -> Result<Vec<LeagueTableEntry>, StorageError> {
        let mut rows = self.filter(|e: &LeagueTableEntry| &e.season_id == season_id)?;
        rows.sort_by_key(|e| e.row.position);
        Ok(rows)
    }
}
