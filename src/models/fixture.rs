//! Simulated fixtures.

use serde::{Deserialize, Serialize};

use super::ClubId;

/// Outcome of a fixture from the home side's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOutcome {
    HomeWin,
    Draw,
    AwayWin,
}

/// Final score of one fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub home_goals: u32,
    pub away_goals: u32,
}

impl MatchResult {
    pub fn new(home_goals: u32, away_goals: u32) -> Self {
        Self {
            home_goals,
            away_goals,
        }
    }

    /// Outcome implied by the scoreline.
    pub fn outcome(&self) -> MatchOutcome {
        use std::cmp::Ordering;
        match self.home_goals.cmp(&self.away_goals) {
            Ordering::Greater => MatchOutcome::HomeWin,
            Ordering::Equal => MatchOutcome::Draw,
            Ordering::Less => MatchOutcome::AwayWin,
        }
    }
}

/// One played fixture of a simulated season.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fixture {
    pub home_club_id: ClubId,
    pub away_club_id: ClubId,
    pub result: MatchResult,
}
