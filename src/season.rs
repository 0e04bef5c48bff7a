//! Season workflow.
//!
//! Ties the simulator to the record store:
//! 1. Load the league, its clubs and last season's table
//! 2. Simulate with a resolved seed, producing a draft
//! 3. On confirmation, persist one Season plus one table row per club
//!
//! Saving is best-effort. Table rows are written one by one and failures are
//! reported back instead of rolled back.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::models::{Club, ClubId, League, LeagueId, LeagueTableEntry, Season, StandingRow};
use crate::simulate::{PreviousStandings, SeasonSimulator, SimulationError};
use crate::storage::{EntityStore, StorageError};

/// Errors that can occur while generating or saving a season.
#[derive(Debug, Error)]
pub enum SeasonError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Simulation error: {0}")]
    Simulation(#[from] SimulationError),

    #[error("League not found: {0}")]
    LeagueNotFound(LeagueId),

    #[error("Club not found: {0}")]
    ClubNotFound(ClubId),

    #[error("Draft has no standings")]
    EmptyDraft,

    #[error("Draft does not match its seed: {0}")]
    DraftMismatch(String),
}

/// Everything the simulator needs for one league season.
#[derive(Debug, Clone)]
pub struct SeasonInputs {
    pub league: League,
    pub year: i32,
    pub clubs: Vec<Club>,
    pub previous: PreviousStandings,
}

/// Load simulation inputs from the store.
///
/// With `club_ids` the given clubs take part regardless of their current
/// league; otherwise every club assigned to the league does.
pub fn load_inputs(
    store: &EntityStore,
    league_id: &LeagueId,
    year: i32,
    club_ids: Option<&[ClubId]>,
) -> Result<SeasonInputs, SeasonError> {
    let league = store
        .get::<League>(league_id)?
        .ok_or_else(|| SeasonError::LeagueNotFound(league_id.clone()))?;

    let clubs = match club_ids {
        Some(ids) => {
            let all: Vec<Club> = store.list()?;
            ids.iter()
                .map(|id| {
                    all.iter()
                        .find(|c| &c.id == id)
                        .cloned()
                        .ok_or_else(|| SeasonError::ClubNotFound(id.clone()))
                })
                .collect::<Result<Vec<_>, _>>()?
        }
        None => store.clubs_in_league(league_id)?,
    };

    let previous = PreviousStandings::from_entries(&store.previous_standings(league_id, year)?);

    info!(
        league = %league.name,
        year,
        clubs = clubs.len(),
        previous = previous.len(),
        "Loaded season inputs"
    );

    Ok(SeasonInputs {
        league,
        year,
        clubs,
        previous,
    })
}

/// An unsaved simulated season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonDraft {
    pub league_id: LeagueId,
    pub year: i32,

    /// Seed that reproduces this table from the same inputs
    pub seed: u64,

    /// Participants in simulation order
    #[serde(default)]
    pub club_ids: Vec<ClubId>,

    pub fixture_count: usize,
    pub standings: Vec<StandingRow>,
}

/// Simulate a draft season. Without a seed a fresh one is drawn, which is
/// how "regenerate" works.
pub fn generate(
    simulator: &SeasonSimulator,
    inputs: &SeasonInputs,
    seed: Option<u64>,
) -> Result<SeasonDraft, SeasonError> {
    let seed = seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);

    let outcome = simulator.run(
        &inputs.clubs,
        &inputs.league.rules(),
        &inputs.previous,
        &mut rng,
    )?;

    Ok(SeasonDraft {
        league_id: inputs.league.id.clone(),
        year: inputs.year,
        seed,
        club_ids: inputs.clubs.iter().map(|c| c.id.clone()).collect(),
        fixture_count: outcome.fixtures.len(),
        standings: outcome.standings,
    })
}

/// Outcome of saving a draft.
#[derive(Debug, Clone, Serialize)]
pub struct SaveReport {
    pub season: Season,
    pub rows_written: usize,
    pub failures: Vec<String>,
}

impl SaveReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Re-run a draft from its seed and participants against the current store
/// and check it reproduces the posted table.
pub fn verify_draft(
    store: &EntityStore,
    simulator: &SeasonSimulator,
    draft: &SeasonDraft,
) -> Result<(), SeasonError> {
    let participants = Some(draft.club_ids.as_slice());
    let inputs = match load_inputs(store, &draft.league_id, draft.year, participants) {
        Ok(inputs) => inputs,
        Err(SeasonError::ClubNotFound(id)) => {
            return Err(SeasonError::DraftMismatch(format!("unknown club {}", id)));
        }
        Err(e) => return Err(e),
    };

    let regenerated = generate(simulator, &inputs, Some(draft.seed))?;
    if regenerated.standings != draft.standings {
        return Err(SeasonError::DraftMismatch(
            "standings differ from a rerun with the same seed".to_string(),
        ));
    }
    if regenerated.fixture_count != draft.fixture_count {
        return Err(SeasonError::DraftMismatch(format!(
            "expected {} fixtures, draft has {}",
            regenerated.fixture_count, draft.fixture_count
        )));
    }

    Ok(())
}

/// Persist a draft: one Season record, then one table row per standing.
///
/// Fails without writing if the league is unknown, the draft does not
/// reproduce from its seed, or the season for that league and year already
/// exists. Once the season is written, row failures are collected in the
/// report.
pub fn save_draft(
    store: &EntityStore,
    simulator: &SeasonSimulator,
    draft: &SeasonDraft,
) -> Result<SaveReport, SeasonError> {
    if draft.standings.is_empty() {
        return Err(SeasonError::EmptyDraft);
    }

    if store.get::<League>(&draft.league_id)?.is_none() {
        return Err(SeasonError::LeagueNotFound(draft.league_id.clone()));
    }

    if let Err(e) = verify_draft(store, simulator, draft) {
        warn!(league = %draft.league_id, year = draft.year, "Rejected draft: {}", e);
        return Err(e);
    }

    let season = Season::from_standings(
        draft.league_id.clone(),
        draft.year,
        Some(draft.seed),
        &draft.standings,
    );
    store.create(&season)?;

    let mut rows_written = 0;
    let mut failures = Vec::new();

    for row in &draft.standings {
        let entry = LeagueTableEntry::new(
            season.id.clone(),
            draft.league_id.clone(),
            draft.year,
            row.clone(),
        );
        match store.create(&entry) {
            Ok(()) => rows_written += 1,
            Err(e) => {
                warn!(club = %row.club_name, "Failed to save table row: {}", e);
                failures.push(format!("{}: {}", row.club_name, e));
            }
        }
    }

    info!(
        season = %season.id,
        year = draft.year,
        rows_written,
        failed = failures.len(),
        "Saved season"
    );

    Ok(SaveReport {
        season,
        rows_written,
        failures,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntityId, StandingStatus};
    use crate::storage::StorageConfig;
    use tempfile::TempDir;

    fn seeded_store(temp_dir: &TempDir) -> (EntityStore, League) {
        let store = EntityStore::new(StorageConfig::new(temp_dir.path().to_path_buf()));
        let league = League::new("Second Division".to_string(), 2).with_spots(1, 1);
        store.create(&league).unwrap();

        let clubs: Vec<Club> = ["Ashford", "Brockley", "Carrow", "Dunmore"]
            .iter()
            .map(|name| Club::new(name.to_string()).in_league(league.id.clone()))
            .collect();
        store.create_many(&clubs).unwrap();
        store
            .create(&Club::new("Elsewhere FC".to_string()))
            .unwrap();

        (store, league)
    }

    #[test]
    fn test_load_inputs_uses_league_membership() {
        let temp_dir = TempDir::new().unwrap();
        let (store, league) = seeded_store(&temp_dir);

        let inputs = load_inputs(&store, &league.id, 2031, None).unwrap();
        assert_eq!(inputs.clubs.len(), 4);
        assert!(inputs.previous.is_empty());
    }

    #[test]
    fn test_load_inputs_with_explicit_selection() {
        let temp_dir = TempDir::new().unwrap();
        let (store, league) = seeded_store(&temp_dir);
        let ids: Vec<ClubId> = store.list::<Club>().unwrap().iter().map(|c| c.id.clone()).collect();

        let inputs = load_inputs(&store, &league.id, 2031, Some(&ids[2..])).unwrap();
        assert_eq!(inputs.clubs.len(), 3);
        assert_eq!(inputs.clubs[2].name, "Elsewhere FC");
    }

    #[test]
    fn test_load_inputs_unknown_ids() {
        let temp_dir = TempDir::new().unwrap();
        let (store, league) = seeded_store(&temp_dir);

        let err = load_inputs(&store, &EntityId::from("nope"), 2031, None).unwrap_err();
        assert!(matches!(err, SeasonError::LeagueNotFound(_)));

        let ghost = [EntityId::from("ghost")];
        let err = load_inputs(&store, &league.id, 2031, Some(&ghost[..])).unwrap_err();
        assert!(matches!(err, SeasonError::ClubNotFound(_)));
    }

    #[test]
    fn test_generate_is_reproducible_from_seed() {
        let temp_dir = TempDir::new().unwrap();
        let (store, league) = seeded_store(&temp_dir);
        let inputs = load_inputs(&store, &league.id, 2031, None).unwrap();
        let sim = SeasonSimulator::default();

        let a = generate(&sim, &inputs, Some(99)).unwrap();
        let b = generate(&sim, &inputs, Some(99)).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.fixture_count, 12);
        assert_eq!(a.seed, 99);
    }

    #[test]
    fn test_generate_rejects_small_league() {
        let temp_dir = TempDir::new().unwrap();
        let (store, league) = seeded_store(&temp_dir);
        let inputs = load_inputs(&store, &league.id, 2031, None).unwrap();

        let err = generate(&SeasonSimulator::new(6), &inputs, Some(1)).unwrap_err();
        assert!(matches!(
            err,
            SeasonError::Simulation(SimulationError::TooFewClubs { found: 4, required: 6 })
        ));
    }

    #[test]
    fn test_save_draft_writes_season_and_rows() {
        let temp_dir = TempDir::new().unwrap();
        let (store, league) = seeded_store(&temp_dir);
        let sim = SeasonSimulator::default();
        let inputs = load_inputs(&store, &league.id, 2031, None).unwrap();
        let draft = generate(&sim, &inputs, Some(5)).unwrap();

        let report = save_draft(&store, &sim, &draft).unwrap();

        assert!(report.is_complete());
        assert_eq!(report.rows_written, 4);
        assert_eq!(
            report.season.champion.as_deref(),
            Some(draft.standings[0].club_name.as_str())
        );
        assert_eq!(report.season.promoted.len(), 1);
        assert_eq!(report.season.relegated.len(), 1);
        assert_eq!(report.season.seed, Some(5));

        let rows = store.table_for_season(&report.season.id).unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].row.status, StandingStatus::Champion);
    }

    #[test]
    fn test_draft_records_participants_in_input_order() {
        let temp_dir = TempDir::new().unwrap();
        let (store, league) = seeded_store(&temp_dir);
        let inputs = load_inputs(&store, &league.id, 2031, None).unwrap();
        let draft = generate(&SeasonSimulator::default(), &inputs, Some(5)).unwrap();

        let expected: Vec<ClubId> = inputs.clubs.iter().map(|c| c.id.clone()).collect();
        assert_eq!(draft.club_ids, expected);
    }

    #[test]
    fn test_save_draft_with_explicit_selection() {
        let temp_dir = TempDir::new().unwrap();
        let (store, league) = seeded_store(&temp_dir);
        let sim = SeasonSimulator::default();
        let ids: Vec<ClubId> = store.list::<Club>().unwrap().iter().map(|c| c.id.clone()).collect();

        let inputs = load_inputs(&store, &league.id, 2031, Some(&ids[1..])).unwrap();
        let draft = generate(&sim, &inputs, Some(21)).unwrap();

        let report = save_draft(&store, &sim, &draft).unwrap();
        assert_eq!(report.rows_written, 4);
    }

    #[test]
    fn test_save_draft_twice_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let (store, league) = seeded_store(&temp_dir);
        let sim = SeasonSimulator::default();
        let inputs = load_inputs(&store, &league.id, 2031, None).unwrap();
        let draft = generate(&sim, &inputs, Some(5)).unwrap();

        save_draft(&store, &sim, &draft).unwrap();
        let err = save_draft(&store, &sim, &draft).unwrap_err();

        assert!(matches!(err, SeasonError::Storage(StorageError::Duplicate { .. })));
        assert_eq!(store.count::<LeagueTableEntry>().unwrap(), 4);
    }

    #[test]
    fn test_tampered_drafts_are_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let (store, league) = seeded_store(&temp_dir);
        let sim = SeasonSimulator::default();
        let inputs = load_inputs(&store, &league.id, 2031, None).unwrap();
        let draft = generate(&sim, &inputs, Some(5)).unwrap();

        let mut inflated = draft.clone();
        inflated.standings[3].points = 1000;

        let mut two_champions = draft.clone();
        two_champions.standings[1].status = StandingStatus::Champion;

        let mut reseeded = draft.clone();
        reseeded.seed += 1;

        let mut stranger = draft.clone();
        stranger.club_ids[0] = EntityId::from("ghost");

        let mut short = draft.clone();
        short.fixture_count = 2;

        for forged in [inflated, two_champions, reseeded, stranger, short] {
            let err = save_draft(&store, &sim, &forged).unwrap_err();
            assert!(
                matches!(err, SeasonError::DraftMismatch(_)),
                "unexpected error: {}",
                err
            );
        }

        assert_eq!(store.count::<Season>().unwrap(), 0);
        assert_eq!(store.count::<LeagueTableEntry>().unwrap(), 0);
    }

    #[test]
    fn test_stale_draft_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let (store, league) = seeded_store(&temp_dir);
        let sim = SeasonSimulator::default();
        let inputs = load_inputs(&store, &league.id, 2031, None).unwrap();
        let draft = generate(&sim, &inputs, Some(5)).unwrap();

        // One of the participants is removed before the draft is saved.
        store.delete::<Club>(&draft.club_ids[0]).unwrap();

        let err = save_draft(&store, &sim, &draft).unwrap_err();
        assert!(matches!(err, SeasonError::DraftMismatch(_)));
        assert_eq!(store.count::<Season>().unwrap(), 0);
    }

    #[test]
    fn test_save_draft_reports_row_failures() {
        let temp_dir = TempDir::new().unwrap();
        let (store, league) = seeded_store(&temp_dir);
        let sim = SeasonSimulator::default();
        let inputs = load_inputs(&store, &league.id, 2031, None).unwrap();
        let draft = generate(&sim, &inputs, Some(5)).unwrap();

        // A leftover row with the same id blocks one of the writes.
        let leftover = LeagueTableEntry::new(
            Season::id_for(&league.id, 2031),
            league.id.clone(),
            2031,
            draft.standings[2].clone(),
        );
        store.create(&leftover).unwrap();

        let report = save_draft(&store, &sim, &draft).unwrap();
        assert!(!report.is_complete());
        assert_eq!(report.rows_written, 3);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].starts_with(&draft.standings[2].club_name));
    }

    #[test]
    fn test_save_empty_draft() {
        let temp_dir = TempDir::new().unwrap();
        let (store, league) = seeded_store(&temp_dir);
        let draft = SeasonDraft {
            league_id: league.id,
            year: 2031,
            seed: 0,
            club_ids: Vec::new(),
            fixture_count: 0,
            standings: Vec::new(),
        };

        assert!(matches!(
            save_draft(&store, &SeasonSimulator::default(), &draft),
            Err(SeasonError::EmptyDraft)
        ));
    }

    #[test]
    fn test_saved_season_feeds_next_year() {
        let temp_dir = TempDir::new().unwrap();
        let (store, league) = seeded_store(&temp_dir);
        let sim = SeasonSimulator::default();

        let inputs = load_inputs(&store, &league.id, 2031, None).unwrap();
        save_draft(&store, &sim, &generate(&sim, &inputs, Some(1)).unwrap()).unwrap();

        let next = load_inputs(&store, &league.id, 2032, None).unwrap();
        assert_eq!(next.previous.len(), 4);
        for club in &next.clubs {
            assert!(next.previous.position_of(&club.id).is_some());
        }
    }
}
