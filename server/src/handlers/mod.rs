use std::any::Any;

use axum::{extract::State, http::Uri, response::IntoResponse, response::Response};
use chrono::Utc;
use serde::Serialize;

use crate::aggregate::upcoming_counts;
use crate::db;
use crate::models::{Artist, Venue};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{page, success};

pub mod artists;
pub mod shows;
pub mod venues;

const RECENT_LISTINGS: i64 = 10;

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Response {
    let payload = HealthPayload {
        status: "ok",
        service: "booking-server",
    };

    success(payload, "Health check successful")
}

#[derive(Serialize)]
struct HomePage {
    service: &'static str,
    venue_count: i64,
    artist_count: i64,
    upcoming_show_count: usize,
    recent_venues: Vec<Venue>,
    recent_artists: Vec<Artist>,
}

pub async fn home(State(state): State<AppState>) -> Result<Response, AppError> {
    let now = Utc::now();
    let pool = &state.pool;

    let upcoming = upcoming_counts(&db::shows::list(pool).await?, now, |show| show.venue_id);

    Ok(page(HomePage {
        service: "booking-server",
        venue_count: db::venues::count(pool).await?,
        artist_count: db::artists::count(pool).await?,
        upcoming_show_count: upcoming.values().sum(),
        recent_venues: db::venues::recent(pool, RECENT_LISTINGS).await?,
        recent_artists: db::artists::recent(pool, RECENT_LISTINGS).await?,
    }))
}

pub async fn not_found(uri: Uri) -> Response {
    AppError::NotFound(format!("No page at '{}'", uri.path())).into_response()
}

/// Turns a handler panic into the 500 envelope.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::Internal(detail).into_response()
}
