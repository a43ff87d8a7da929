use axum::extract::State;
use axum::response::Response;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::aggregate::{group_by_area, partition_shows, search, upcoming_counts, Area};
use crate::aggregate::{ShowBreakdown, VenueShow};
use crate::db;
use crate::forms::{FormDescriptor, VenueForm};
use crate::models::Venue;
use crate::state::AppState;
use crate::utils::error::{persistence, AppError};
use crate::utils::extract::{FormData, RecordId};
use crate::utils::response::{created, empty_success, page, success};

#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    pub search_term: Option<String>,
}

#[derive(Serialize)]
struct AreasPage {
    areas: Vec<Area>,
}

#[derive(Serialize)]
struct VenueDetail {
    #[serde(flatten)]
    venue: Venue,
    #[serde(flatten)]
    shows: ShowBreakdown<VenueShow>,
}

#[derive(Serialize)]
struct EditVenuePage {
    form: FormDescriptor,
    venue: Venue,
}

pub async fn list_venues(State(state): State<AppState>) -> Result<Response, AppError> {
    let now = Utc::now();
    let venues = db::venues::list(&state.pool).await?;
    let shows = db::shows::list(&state.pool).await?;

    let upcoming = upcoming_counts(&shows, now, |show| show.venue_id);
    let areas = group_by_area(&venues, &upcoming);

    Ok(page(AreasPage { areas }))
}

pub async fn search_venues(
    State(state): State<AppState>,
    FormData(form): FormData<SearchForm>,
) -> Result<Response, AppError> {
    let now = Utc::now();
    let term = form.search_term.unwrap_or_default();
    info!(search_term = %term, "Searching venues");

    let venues = db::venues::list(&state.pool).await?;
    let shows = db::shows::list(&state.pool).await?;
    let upcoming = upcoming_counts(&shows, now, |show| show.venue_id);

    Ok(page(search(&venues, &term, &upcoming)))
}

pub async fn show_venue(
    State(state): State<AppState>,
    RecordId(venue_id): RecordId,
) -> Result<Response, AppError> {
    let now = Utc::now();
    let venue = db::venues::find(&state.pool, venue_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Venue {venue_id} does not exist")))?;

    let shows = db::shows::for_venue(&state.pool, venue_id).await?;

    Ok(page(VenueDetail {
        venue,
        shows: partition_shows(shows, now),
    }))
}

pub async fn create_venue_form() -> Response {
    page(VenueForm::descriptor(
        "List a new venue",
        "/venues/create".to_string(),
    ))
}

pub async fn create_venue(
    State(state): State<AppState>,
    FormData(form): FormData<VenueForm>,
) -> Result<Response, AppError> {
    let new_venue = form.into_new()?;

    let venue = db::venues::insert(&state.pool, &new_venue)
        .await
        .map_err(persistence(format!(
            "An error occurred. Venue {} could not be listed.",
            new_venue.name
        )))?;

    info!(venue_id = venue.id, name = %venue.name, "Venue listed");
    let message = format!("Venue {} was successfully listed!", venue.name);
    Ok(created(venue, message))
}

pub async fn edit_venue_form(
    State(state): State<AppState>,
    RecordId(venue_id): RecordId,
) -> Result<Response, AppError> {
    let venue = db::venues::find(&state.pool, venue_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Venue {venue_id} does not exist")))?;

    Ok(page(EditVenuePage {
        form: VenueForm::descriptor("Edit venue", format!("/venues/{venue_id}/edit")),
        venue,
    }))
}

pub async fn edit_venue(
    State(state): State<AppState>,
    RecordId(venue_id): RecordId,
    FormData(form): FormData<VenueForm>,
) -> Result<Response, AppError> {
    let changes = form.into_changes()?;

    let venue = db::venues::update(&state.pool, venue_id, changes)
        .await
        .map_err(persistence(format!(
            "An error occurred. Venue {venue_id} could not be updated."
        )))?
        .ok_or_else(|| AppError::NotFound(format!("Venue {venue_id} does not exist")))?;

    info!(venue_id, "Venue updated");
    let message = format!("Venue {} was successfully updated!", venue.name);
    Ok(success(venue, message))
}

/// Deleting a venue that does not exist is not an error; the store is left as it was.
pub async fn delete_venue(
    State(state): State<AppState>,
    RecordId(venue_id): RecordId,
) -> Result<Response, AppError> {
    let deleted = db::venues::delete(&state.pool, venue_id)
        .await
        .map_err(persistence(format!(
            "An error occurred. Venue {venue_id} could not be deleted."
        )))?;

    if deleted {
        info!(venue_id, "Venue deleted");
        Ok(empty_success(format!("Venue {venue_id} was successfully deleted.")))
    } else {
        info!(venue_id, "Delete requested for missing venue");
        Ok(empty_success(format!(
            "Venue {venue_id} does not exist, nothing was deleted."
        )))
    }
}
