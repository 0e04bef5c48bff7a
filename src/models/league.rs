//! League model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EntityId, LeagueId, NationId};

/// A league in a national pyramid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct League {
    pub id: LeagueId,

    pub name: String,

    #[serde(default)]
    pub nation_id: Option<NationId>,

    /// 1 is the top flight, higher numbers are lower divisions
    #[serde(default = "default_tier")]
    pub tier: u32,

    #[serde(default = "default_promotion_spots")]
    pub promotion_spots: u32,

    #[serde(default = "default_relegation_spots")]
    pub relegation_spots: u32,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

fn default_tier() -> u32 {
    1
}

fn default_promotion_spots() -> u32 {
    2
}

fn default_relegation_spots() -> u32 {
    3
}

impl League {
    /// Create a new League with a random ID and default spots.
    pub fn new(name: String, tier: u32) -> Self {
        Self {
            id: EntityId::random(),
            name,
            nation_id: None,
            tier,
            promotion_spots: default_promotion_spots(),
            relegation_spots: default_relegation_spots(),
            created_at: Utc::now(),
        }
    }

    /// Builder method to set promotion and relegation spots.
    pub fn with_spots(mut self, promotion_spots: u32, relegation_spots: u32) -> Self {
        self.promotion_spots = promotion_spots;
        self.relegation_spots = relegation_spots;
        self
    }

    /// The configuration the season simulator needs.
    pub fn rules(&self) -> LeagueRules {
        LeagueRules {
            tier: self.tier,
            promotion_spots: self.promotion_spots,
            relegation_spots: self.relegation_spots,
        }
    }
}

/// Tier and classification spots used to simulate one season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueRules {
    pub tier: u32,
    pub promotion_spots: u32,
    pub relegation_spots: u32,
}

impl Default for LeagueRules {
    fn default() -> Self {
        Self {
            tier: default_tier(),
            promotion_spots: default_promotion_spots(),
            relegation_spots: default_relegation_spots(),
        }
    }
}
