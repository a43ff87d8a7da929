use axum::extract::State;
use axum::response::Response;
use serde::Serialize;
use tracing::info;

use crate::db;
use crate::forms::ShowForm;
use crate::models::ShowListing;
use crate::state::AppState;
use crate::utils::error::{persistence, AppError};
use crate::utils::extract::FormData;
use crate::utils::response::{created, page};

#[derive(Serialize)]
struct ShowsPage {
    shows: Vec<ShowListing>,
}

pub async fn list_shows(State(state): State<AppState>) -> Result<Response, AppError> {
    let shows = db::shows::listings(&state.pool).await?;
    Ok(page(ShowsPage { shows }))
}

pub async fn create_show_form() -> Response {
    page(ShowForm::descriptor())
}

/// The artist and venue ids are not looked up first; a dangling id fails the
/// insert on its foreign key and comes back as a persistence error.
pub async fn create_show(
    State(state): State<AppState>,
    FormData(form): FormData<ShowForm>,
) -> Result<Response, AppError> {
    let new_show = form.into_new()?;

    let show = db::shows::insert(&state.pool, &new_show)
        .await
        .map_err(persistence("An error occurred. Show could not be listed."))?;

    info!(
        show_id = show.id,
        artist_id = show.artist_id,
        venue_id = show.venue_id,
        "Show listed"
    );
    Ok(created(show, "Show was successfully listed!"))
}
