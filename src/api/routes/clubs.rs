use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::{nullable, ApiError, Pagination, PaginationMeta};
use crate::models::{Club, EntityId, League, LeagueId, Nation, NationId};
use crate::storage::EntityStore;

#[derive(Debug, Deserialize)]
pub struct ListClubsParams {
    pub league: Option<String>,
    pub nation: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct ClubListResponse {
    pub clubs: Vec<Club>,
    pub pagination: PaginationMeta,
}

pub async fn list_clubs(
    State(state): State<AppState>,
    Query(params): Query<ListClubsParams>,
) -> Result<Json<ClubListResponse>, ApiError> {
    let league = params.league.map(EntityId::from);
    let nation = params.nation.map(EntityId::from);

    let mut clubs: Vec<Club> = state.store.filter(|c: &Club| {
        league.as_ref().map_or(true, |l| c.league_id.as_ref() == Some(l))
            && nation.as_ref().map_or(true, |n| c.nation_id.as_ref() == Some(n))
    })?;
    clubs.sort_by(|a, b| a.name.cmp(&b.name));

    let pagination = Pagination::new(params.page, params.page_size);
    let meta = PaginationMeta::new(&pagination, clubs.len() as u32);

    Ok(Json(ClubListResponse {
        clubs: pagination.page_of(&clubs).to_vec(),
        pagination: meta,
    }))
}

pub async fn get_club(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Club>, ApiError> {
    Ok(Json(state.store.require(&EntityId::from(id))?))
}

/// Editable club fields. Omitted fields keep their current value; an
/// explicit `null` nation or league removes the club from it.
#[derive(Debug, Default, Deserialize)]
pub struct ClubInput {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub nation_id: Option<Option<NationId>>,
    #[serde(default, deserialize_with = "nullable")]
    pub league_id: Option<Option<LeagueId>>,
    pub stability_points: Option<i64>,
    pub league_titles: Option<u32>,
    pub promotions: Option<u32>,
    pub relegations: Option<u32>,
    pub vcc_titles: Option<u32>,
    pub ccc_titles: Option<u32>,
}

impl ClubInput {
    fn apply(self, club: &mut Club) {
        if let Some(name) = self.name {
            club.name = name.trim().to_string();
        }
        if let Some(nation_id) = self.nation_id {
            club.nation_id = nation_id;
        }
        if let Some(league_id) = self.league_id {
            club.league_id = league_id;
        }
        if let Some(v) = self.stability_points {
            club.stability_points = v;
        }
        if let Some(v) = self.league_titles {
            club.league_titles = v;
        }
        if let Some(v) = self.promotions {
            club.promotions = v;
        }
        if let Some(v) = self.relegations {
            club.relegations = v;
        }
        if let Some(v) = self.vcc_titles {
            club.vcc_titles = v;
        }
        if let Some(v) = self.ccc_titles {
            club.ccc_titles = v;
        }
    }

    fn check_references(&self, store: &EntityStore) -> Result<(), ApiError> {
        if let Some(Some(id)) = &self.league_id {
            if store.get::<League>(id)?.is_none() {
                return Err(ApiError::BadRequest(format!("Unknown league: {}", id)));
            }
        }
        if let Some(Some(id)) = &self.nation_id {
            if store.get::<Nation>(id)?.is_none() {
                return Err(ApiError::BadRequest(format!("Unknown nation: {}", id)));
            }
        }
        Ok(())
    }
}

pub async fn create_club(
    State(state): State<AppState>,
    Json(input): Json<ClubInput>,
) -> Result<(StatusCode, Json<Club>), ApiError> {
    let name = input.name.as_deref().map(str::trim).unwrap_or_default();
    if name.is_empty() {
        return Err(ApiError::BadRequest("Club name is required".to_string()));
    }

    let _guard = state.write_lock.lock().await;
    input.check_references(&state.store)?;

    let mut club = Club::new(name.to_string());
    input.apply(&mut club);
    state.store.create(&club)?;

    tracing::info!(club = %club.name, id = %club.id, "Created club");
    Ok((StatusCode::CREATED, Json(club)))
}

pub async fn update_club(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<ClubInput>,
) -> Result<Json<Club>, ApiError> {
    if input.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(ApiError::BadRequest("Club name cannot be blank".to_string()));
    }

    let _guard = state.write_lock.lock().await;
    input.check_references(&state.store)?;

    let mut club: Club = state.store.require(&EntityId::from(id))?;
    input.apply(&mut club);
    state.store.update(&club)?;

    Ok(Json(club))
}

pub async fn delete_club(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let _guard = state.write_lock.lock().await;
    state.store.delete::<Club>(&EntityId::from(id))?;
    Ok(StatusCode::NO_CONTENT)
}
