pub mod clubs;
pub mod leagues;
pub mod nations;
pub mod seasons;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{Club, League, LeagueTableEntry, Nation, Season};

#[derive(Debug, Serialize)]
pub struct RecordCounts {
    pub nations: usize,
    pub leagues: usize,
    pub clubs: usize,
    pub seasons: usize,
    pub table_rows: usize,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub records: RecordCounts,
}

pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let store = &state.store;
    let records = RecordCounts {
        nations: store.count::<Nation>()?,
        leagues: store.count::<League>()?,
        clubs: store.count::<Club>()?,
        seasons: store.count::<Season>()?,
        table_rows: store.count::<LeagueTableEntry>()?,
    };

    Ok(Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        records,
    }))
}
