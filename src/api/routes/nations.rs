use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::Nation;

#[derive(Debug, Serialize)]
pub struct NationListResponse {
    pub nations: Vec<Nation>,
}

pub async fn list_nations(
    State(state): State<AppState>,
) -> Result<Json<NationListResponse>, ApiError> {
    let mut nations: Vec<Nation> = state.store.list()?;
    nations.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(Json(NationListResponse { nations }))
}

#[derive(Debug, Deserialize)]
pub struct NewNation {
    pub name: String,
}

pub async fn create_nation(
    State(state): State<AppState>,
    Json(input): Json<NewNation>,
) -> Result<(StatusCode, Json<Nation>), ApiError> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest("Nation name is required".to_string()));
    }

    let nation = Nation::new(name.to_string());
    let _guard = state.write_lock.lock().await;
    state.store.create(&nation)?;

    Ok((StatusCode::CREATED, Json(nation)))
}
