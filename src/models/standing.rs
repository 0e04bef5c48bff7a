//! League table models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ClubId, EntityId, LeagueId, MatchResult, SeasonId, TableRowId};

/// End-of-season classification of a table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StandingStatus {
    #[serde(rename = "champion")]
    Champion,
    #[serde(rename = "promoted")]
    Promoted,
    #[serde(rename = "relegated")]
    Relegated,
    #[default]
    #[serde(rename = "")]
    MidTable,
}

impl std::fmt::Display for StandingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StandingStatus::Champion => write!(f, "champion"),
            StandingStatus::Promoted => write!(f, "promoted"),
            StandingStatus::Relegated => write!(f, "relegated"),
            StandingStatus::MidTable => write!(f, ""),
        }
    }
}

/// One club's aggregated record and rank for a season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingRow {
    pub club_id: ClubId,
    pub club_name: String,

    /// 1-based rank; 0 until the table is ranked
    pub position: u32,

    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i32,
    pub points: u32,

    #[serde(default)]
    pub status: StandingStatus,
}

impl StandingRow {
    /// An empty row for a club that has not played yet.
    pub fn new(club_id: ClubId, club_name: String) -> Self {
        Self {
            club_id,
            club_name,
            position: 0,
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            points: 0,
            status: StandingStatus::MidTable,
        }
    }

    /// Record one fixture from this club's side.
    pub fn record(&mut self, scored: u32, conceded: u32) {
        self.played += 1;
        self.goals_for += scored;
        self.goals_against += conceded;
        self.goal_difference = self.goals_for as i32 - self.goals_against as i32;

        if scored > conceded {
            self.won += 1;
            self.points += 3;
        } else if scored == conceded {
            self.drawn += 1;
            self.points += 1;
        } else {
            self.lost += 1;
        }
    }

    /// Record a fixture played at home.
    pub fn record_home(&mut self, result: &MatchResult) {
        self.record(result.home_goals, result.away_goals);
    }

    /// Record a fixture played away.
    pub fn record_away(&mut self, result: &MatchResult) {
        self.record(result.away_goals, result.home_goals);
    }
}

/// A persisted league table row for one club in one saved season.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueTableEntry {
    /// Derived from season_id + club_id
    pub id: TableRowId,

    pub season_id: SeasonId,
    pub league_id: LeagueId,
    pub year: i32,

    #[serde(flatten)]
    pub row: StandingRow,

    pub created_at: DateTime<Utc>,
}

impl LeagueTableEntry {
    pub fn new(season_id: SeasonId, league_id: LeagueId, year: i32, row: StandingRow) -> Self {
        let id = EntityId::generate(&[season_id.as_str(), row.club_id.as_str()]);
        Self {
            id,
            season_id,
            league_id,
            year,
            row,
            created_at: Utc::now(),
        }
    }
}
