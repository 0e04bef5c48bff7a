use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{ClubId, EntityId, League, Season, StandingRow};
use crate::season::{self, SaveReport, SeasonDraft};

#[derive(Debug, Deserialize)]
pub struct SimulateRequest {
    pub year: i32,
    pub seed: Option<u64>,
    /// Explicit participants; defaults to the league's current clubs
    pub club_ids: Option<Vec<ClubId>>,
}

#[derive(Debug, Serialize)]
pub struct SimulateResponse {
    pub league_name: String,
    pub tier: u32,
    pub previous_positions: usize,
    #[serde(flatten)]
    pub draft: SeasonDraft,
}

/// Generate (or regenerate) a draft season. Nothing is written.
pub async fn simulate_season(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<SimulateRequest>,
) -> Result<Json<SimulateResponse>, ApiError> {
    let league_id = EntityId::from(id);
    let inputs = season::load_inputs(
        &state.store,
        &league_id,
        request.year,
        request.club_ids.as_deref(),
    )?;

    let draft = season::generate(
        &state.simulator,
        &inputs,
        request.seed.or(state.default_seed),
    )?;

    Ok(Json(SimulateResponse {
        league_name: inputs.league.name,
        tier: inputs.league.tier,
        previous_positions: inputs.previous.len(),
        draft,
    }))
}

/// Persist a draft previously returned by the simulate endpoint.
pub async fn save_season(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<SeasonDraft>,
) -> Result<(StatusCode, Json<SaveReport>), ApiError> {
    if draft.league_id.as_str() != id {
        return Err(ApiError::BadRequest(format!(
            "Draft belongs to league {}, not {}",
            draft.league_id, id
        )));
    }

    let _guard = state.write_lock.lock().await;
    let report = season::save_draft(&state.store, &state.simulator, &draft)?;

    Ok((StatusCode::CREATED, Json(report)))
}

#[derive(Debug, Serialize)]
pub struct SeasonListResponse {
    pub seasons: Vec<Season>,
}

pub async fn list_seasons(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SeasonListResponse>, ApiError> {
    let league: League = state.store.require(&EntityId::from(id))?;
    let seasons = state.store.seasons_for_league(&league.id)?;
    Ok(Json(SeasonListResponse { seasons }))
}

#[derive(Debug, Serialize)]
pub struct SeasonTableResponse {
    pub season: Season,
    pub rows: Vec<StandingRow>,
}

pub async fn get_season_table(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SeasonTableResponse>, ApiError> {
    let season: Season = state.store.require(&EntityId::from(id))?;
    let rows = state
        .store
        .table_for_season(&season.id)?
        .into_iter()
        .map(|entry| entry.row)
        .collect();

    Ok(Json(SeasonTableResponse { season, rows }))
}
