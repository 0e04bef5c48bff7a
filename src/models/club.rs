//! Club model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ClubId, EntityId, LeagueId, NationId};

/// A football club.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Club {
    pub id: ClubId,

    pub name: String,

    /// Nation the club belongs to
    #[serde(default)]
    pub nation_id: Option<NationId>,

    /// League the club currently plays in
    #[serde(default)]
    pub league_id: Option<LeagueId>,

    /// Financial health score; 0 is neutral and it may go negative
    #[serde(default)]
    pub stability_points: i64,

    #[serde(default)]
    pub league_titles: u32,

    #[serde(default)]
    pub promotions: u32,

    #[serde(default)]
    pub relegations: u32,

    /// Top continental cup wins
    #[serde(default)]
    pub vcc_titles: u32,

    /// Secondary continental cup wins
    #[serde(default)]
    pub ccc_titles: u32,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Club {
    /// Create a new Club with a random ID and zeroed history.
    pub fn new(name: String) -> Self {
        Self::with_id(EntityId::random(), name)
    }

    /// Create a new Club with a known ID.
    pub fn with_id(id: ClubId, name: String) -> Self {
        Self {
            id,
            name,
            nation_id: None,
            league_id: None,
            stability_points: 0,
            league_titles: 0,
            promotions: 0,
            relegations: 0,
            vcc_titles: 0,
            ccc_titles: 0,
            created_at: Utc::now(),
        }
    }

    /// Builder method to place the club in a league.
    pub fn in_league(mut self, league_id: LeagueId) -> Self {
        self.league_id = Some(league_id);
        self
    }

    /// Builder method to set the nation.
    pub fn in_nation(mut self, nation_id: NationId) -> Self {
        self.nation_id = Some(nation_id);
        self
    }

    /// Builder method to set stability points.
    pub fn with_stability(mut self, points: i64) -> Self {
        self.stability_points = points;
        self
    }
}
