//! REST API endpoints.
//!
//! Axum-based HTTP API for managing nations, leagues and clubs, and for
//! generating, regenerating and saving simulated seasons.

pub mod routes;
pub mod state;

use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::season::SeasonError;
use crate::storage::StorageError;
use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        if let ApiError::Internal(message) = &self {
            tracing::error!("Request failed: {}", message);
        }

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            StorageError::Duplicate { .. } => ApiError::Conflict(err.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<SeasonError> for ApiError {
    fn from(err: SeasonError) -> Self {
        match err {
            SeasonError::Storage(e) => e.into(),
            SeasonError::LeagueNotFound(_) | SeasonError::ClubNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            SeasonError::Simulation(_)
            | SeasonError::EmptyDraft
            | SeasonError::DraftMismatch(_) => ApiError::BadRequest(err.to_string()),
        }
    }
}

/// Reads an optional field where an explicit `null` means "clear" and an
/// omitted field (via `#[serde(default)]`) means "keep".
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Pagination parameters.
#[derive(Debug, Clone)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 50,
        }
    }
}

impl Pagination {
    pub fn new(page: Option<u32>, page_size: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            page_size: page_size.unwrap_or(50).clamp(1, 100),
        }
    }

    pub fn offset(&self) -> u32 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    /// The slice of `items` on this page.
    pub fn page_of<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.offset() as usize).min(items.len());
        let end = start.saturating_add(self.page_size as usize).min(items.len());
        &items[start..end]
    }
}

/// Pagination metadata in responses.
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub page: u32,
    pub page_size: u32,
    pub total_items: u32,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginationMeta {
    pub fn new(pagination: &Pagination, total_items: u32) -> Self {
        let total_pages = total_items.div_ceil(pagination.page_size);
        Self {
            page: pagination.page,
            page_size: pagination.page_size,
            total_items,
            total_pages,
            has_next: pagination.page < total_pages,
            has_prev: pagination.page > 1,
        }
    }
}

fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match origin {
        "*" => layer.allow_origin(Any),
        other => match HeaderValue::from_str(other) {
            Ok(value) => layer.allow_origin(value),
            Err(_) => {
                tracing::warn!("Invalid CORS origin {:?}, allowing any", other);
                layer.allow_origin(Any)
            }
        },
    }
}

/// Build the API router with permissive CORS.
pub fn build_router(state: AppState) -> Router {
    build_router_with_cors(state, "*")
}

/// Build the API router.
pub fn build_router_with_cors(state: AppState, cors_origin: &str) -> Router {
    use routes::{clubs, leagues, nations, seasons};

    Router::new()
        .route("/api/health", get(routes::health))
        .route(
            "/api/nations",
            get(nations::list_nations).post(nations::create_nation),
        )
        .route("/api/clubs", get(clubs::list_clubs).post(clubs::create_club))
        .route(
            "/api/clubs/:id",
            get(clubs::get_club)
                .put(clubs::update_club)
                .delete(clubs::delete_club),
        )
        .route(
            "/api/leagues",
            get(leagues::list_leagues).post(leagues::create_league),
        )
        .route(
            "/api/leagues/:id",
            get(leagues::get_league)
                .put(leagues::update_league)
                .delete(leagues::delete_league),
        )
        .route("/api/leagues/:id/simulate", post(seasons::simulate_season))
        .route(
            "/api/leagues/:id/seasons",
            get(seasons::list_seasons).post(seasons::save_season),
        )
        .route("/api/seasons/:id/table", get(seasons::get_season_table))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origin))
        .with_state(state)
}
