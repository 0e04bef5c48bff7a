//! Season simulation engine.
//!
//! - **strength**: per-club strength for one season
//! - **result**: single fixture scorelines
//! - **table**: double round-robin, ranking and classification
//!
//! Everything here is synchronous and pure apart from the injected random
//! source, so a seeded generator reproduces a season exactly.

pub mod result;
pub mod strength;
pub mod table;

use std::collections::{HashMap, HashSet};

use rand::Rng;
use thiserror::Error;
use tracing::info;

use crate::models::{Club, ClubId, LeagueRules, LeagueTableEntry};

pub use table::SeasonOutcome;

/// Smallest league the simulator will ever run.
pub const MIN_CLUBS_FLOOR: usize = 2;

/// Errors raised before a simulation starts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimulationError {
    #[error("Too few clubs: found {found}, need at least {required}")]
    TooFewClubs { found: usize, required: usize },

    #[error("Invalid league tier: {0} (tiers start at 1)")]
    InvalidTier(u32),

    #[error("Club listed more than once: {0}")]
    DuplicateClub(ClubId),
}

/// Finishing positions from the previous season of the same league.
#[derive(Debug, Clone, Default)]
pub struct PreviousStandings {
    positions: HashMap<ClubId, u32>,
}

impl PreviousStandings {
    pub fn new(positions: HashMap<ClubId, u32>) -> Self {
        Self { positions }
    }

    /// Build from saved table rows.
    pub fn from_entries(entries: &[LeagueTableEntry]) -> Self {
        let positions = entries
            .iter()
            .map(|e| (e.row.club_id.clone(), e.row.position))
            .collect();
        Self { positions }
    }

    pub fn position_of(&self, club_id: &ClubId) -> Option<u32> {
        self.positions.get(club_id).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Validating entry point to the table builder.
#[derive(Debug, Clone)]
pub struct SeasonSimulator {
    min_clubs: usize,
}

impl Default for SeasonSimulator {
    fn default() -> Self {
        Self::new(4)
    }
}

impl SeasonSimulator {
    /// `min_clubs` below two is raised to two.
    pub fn new(min_clubs: usize) -> Self {
        Self {
            min_clubs: min_clubs.max(MIN_CLUBS_FLOOR),
        }
    }

    pub fn min_clubs(&self) -> usize {
        self.min_clubs
    }

    /// Check the inputs without simulating.
    pub fn validate(&self, clubs: &[Club], rules: &LeagueRules) -> Result<(), SimulationError> {
        if rules.tier == 0 {
            return Err(SimulationError::InvalidTier(rules.tier));
        }

        if clubs.len() < self.min_clubs {
            return Err(SimulationError::TooFewClubs {
                found: clubs.len(),
                required: self.min_clubs,
            });
        }

        let mut seen = HashSet::new();
        for club in clubs {
            if !seen.insert(&club.id) {
                return Err(SimulationError::DuplicateClub(club.id.clone()));
            }
        }

        Ok(())
    }

    /// Validate, then simulate one season.
    pub fn run(
        &self,
        clubs: &[Club],
        rules: &LeagueRules,
        previous: &PreviousStandings,
        rng: &mut impl Rng,
    ) -> Result<SeasonOutcome, SimulationError> {
        self.validate(clubs, rules)?;

        let outcome = table::build_table(clubs, rules, previous, rng);
        info!(
            clubs = clubs.len(),
            fixtures = outcome.fixtures.len(),
            tier = rules.tier,
            "Simulated season"
        );

        Ok(outcome)
    }
}
