//! Saved season summary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EntityId, LeagueId, SeasonId, StandingRow, StandingStatus};

/// Summary of a saved season.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Season {
    /// Derived from league_id + year
    pub id: SeasonId,

    pub league_id: LeagueId,

    pub year: i32,

    /// Champion club name
    pub champion: Option<String>,

    /// Runner-up club name
    pub runner_up: Option<String>,

    /// Promoted club names in table order
    #[serde(default)]
    pub promoted: Vec<String>,

    /// Relegated club names in table order
    #[serde(default)]
    pub relegated: Vec<String>,

    pub club_count: u32,

    /// Seed the table was generated from
    pub seed: Option<u64>,

    pub created_at: DateTime<Utc>,
}

impl Season {
    /// ID of the season for a league and year.
    pub fn id_for(league_id: &LeagueId, year: i32) -> SeasonId {
        EntityId::generate(&[league_id.as_str(), &year.to_string()])
    }

    /// Summarize ranked standings into a season record.
    pub fn from_standings(
        league_id: LeagueId,
        year: i32,
        seed: Option<u64>,
        standings: &[StandingRow],
    ) -> Self {
        let names_with = |status: StandingStatus| -> Vec<String> {
            standings
                .iter()
                .filter(|r| r.status == status)
                .map(|r| r.club_name.clone())
                .collect()
        };

        Self {
            id: Self::id_for(&league_id, year),
            league_id,
            year,
            champion: standings.first().map(|r| r.club_name.clone()),
            runner_up: standings.get(1).map(|r| r.club_name.clone()),
            promoted: names_with(StandingStatus::Promoted),
            relegated: names_with(StandingStatus::Relegated),
            club_count: standings.len() as u32,
            seed,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, position: u32, status: StandingStatus) -> StandingRow {
        let mut row = StandingRow::new(EntityId::from(name), name.to_string());
        row.position = position;
        row.status = status;
        row
    }

    #[test]
    fn test_summary_from_standings() {
        let standings = vec![
            row("Ashford", 1, StandingStatus::Champion),
            row("Brockley", 2, StandingStatus::Promoted),
            row("Carrow", 3, StandingStatus::MidTable),
            row("Dunmore", 4, StandingStatus::Relegated),
        ];

        let season = Season::from_standings(EntityId::from("l1"), 2031, Some(7), &standings);

        assert_eq!(season.champion.as_deref(), Some("Ashford"));
        assert_eq!(season.runner_up.as_deref(), Some("Brockley"));
        assert_eq!(season.promoted, vec!["Brockley".to_string()]);
        assert_eq!(season.relegated, vec!["Dunmore".to_string()]);
        assert_eq!(season.club_count, 4);
        assert_eq!(season.id, Season::id_for(&EntityId::from("l1"), 2031));
    }

    #[test]
    fn test_summary_of_empty_table() {
        let season = Season::from_standings(EntityId::from("l1"), 2031, None, &[]);
        assert!(season.champion.is_none());
        assert!(season.runner_up.is_none());
        assert_eq!(season.club_count, 0);
    }
}
