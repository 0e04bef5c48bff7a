use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::{nullable, ApiError};
use crate::models::{Club, EntityId, League, NationId};

#[derive(Debug, Serialize)]
pub struct LeagueSummary {
    #[serde(flatten)]
    pub league: League,
    pub club_count: usize,
}

#[derive(Debug, Serialize)]
pub struct LeagueListResponse {
    pub leagues: Vec<LeagueSummary>,
}

/// Leagues ordered by tier, then name.
pub async fn list_leagues(
    State(state): State<AppState>,
) -> Result<Json<LeagueListResponse>, ApiError> {
    let mut leagues: Vec<League> = state.store.list()?;
    leagues.sort_by(|a, b| a.tier.cmp(&b.tier).then_with(|| a.name.cmp(&b.name)));

    let clubs: Vec<Club> = state.store.list()?;
    let leagues = leagues
        .into_iter()
        .map(|league| {
            let club_count = clubs
                .iter()
                .filter(|c| c.league_id.as_ref() == Some(&league.id))
                .count();
            LeagueSummary { league, club_count }
        })
        .collect();

    Ok(Json(LeagueListResponse { leagues }))
}

pub async fn get_league(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<League>, ApiError> {
    Ok(Json(state.store.require(&EntityId::from(id))?))
}

/// Editable league fields. Omitted fields keep their current value, or the
/// league defaults on create.
#[derive(Debug, Default, Deserialize)]
pub struct LeagueInput {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub nation_id: Option<Option<NationId>>,
    pub tier: Option<u32>,
    pub promotion_spots: Option<u32>,
    pub relegation_spots: Option<u32>,
}

impl LeagueInput {
    fn validate(&self) -> Result<(), ApiError> {
        if self.tier == Some(0) {
            return Err(ApiError::BadRequest("Tier must be at least 1".to_string()));
        }
        if self.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(ApiError::BadRequest("League name cannot be blank".to_string()));
        }
        Ok(())
    }

    fn apply(self, league: &mut League) {
        if let Some(name) = self.name {
            league.name = name.trim().to_string();
        }
        if let Some(nation_id) = self.nation_id {
            league.nation_id = nation_id;
        }
        if let Some(tier) = self.tier {
            league.tier = tier;
        }
        if let Some(spots) = self.promotion_spots {
            league.promotion_spots = spots;
        }
        if let Some(spots) = self.relegation_spots {
            league.relegation_spots = spots;
        }
    }
}

pub async fn create_league(
    State(state): State<AppState>,
    Json(input): Json<LeagueInput>,
) -> Result<(StatusCode, Json<League>), ApiError> {
    input.validate()?;
    let Some(name) = input.name.clone() else {
        return Err(ApiError::BadRequest("League name is required".to_string()));
    };

    let mut league = League::new(name, input.tier.unwrap_or(1));
    input.apply(&mut league);

    let _guard = state.write_lock.lock().await;
    state.store.create(&league)?;

    tracing::info!(league = %league.name, tier = league.tier, "Created league");
    Ok((StatusCode::CREATED, Json(league)))
}

pub async fn update_league(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<LeagueInput>,
) -> Result<Json<League>, ApiError> {
    input.validate()?;

    let _guard = state.write_lock.lock().await;
    let mut league: League = state.store.require(&EntityId::from(id))?;
    input.apply(&mut league);
    state.store.update(&league)?;

    Ok(Json(league))
}

pub async fn delete_league(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let _guard = state.write_lock.lock().await;
    state.store.delete::<League>(&EntityId::from(id))?;
    Ok(StatusCode::NO_CONTENT)
}
