use axum::extract::State;
use axum::response::Response;
use chrono::Utc;
use serde::Serialize;
use tracing::info;

use super::venues::SearchForm;
use crate::aggregate::{partition_shows, search, upcoming_counts, ArtistShow, ShowBreakdown};
use crate::db;
use crate::forms::{ArtistForm, FormDescriptor};
use crate::models::Artist;
use crate::state::AppState;
use crate::utils::error::{persistence, AppError};
use crate::utils::extract::{FormData, RecordId};
use crate::utils::response::{created, empty_success, page, success};

#[derive(Serialize)]
struct ArtistEntry {
    id: i64,
    name: String,
}

#[derive(Serialize)]
struct ArtistsPage {
    artists: Vec<ArtistEntry>,
}

#[derive(Serialize)]
struct ArtistDetail {
    #[serde(flatten)]
    artist: Artist,
    #[serde(flatten)]
    shows: ShowBreakdown<ArtistShow>,
}

#[derive(Serialize)]
struct EditArtistPage {
    form: FormDescriptor,
    artist: Artist,
}

fn missing(artist_id: i64) -> AppError {
    AppError::NotFound(format!("Artist {artist_id} does not exist"))
}

pub async fn list_artists(State(state): State<AppState>) -> Result<Response, AppError> {
    let artists = db::artists::list(&state.pool)
        .await?
        .into_iter()
        .map(|artist| ArtistEntry {
            id: artist.id,
            name: artist.name,
        })
        .collect();

    Ok(page(ArtistsPage { artists }))
}

pub async fn search_artists(
    State(state): State<AppState>,
    FormData(form): FormData<SearchForm>,
) -> Result<Response, AppError> {
    let now = Utc::now();
    let term = form.search_term.unwrap_or_default();
    info!(search_term = %term, "Searching artists");

    let artists = db::artists::list(&state.pool).await?;
    let shows = db::shows::list(&state.pool).await?;
    let upcoming = upcoming_counts(&shows, now, |show| show.artist_id);

    Ok(page(search(&artists, &term, &upcoming)))
}

pub async fn show_artist(
    State(state): State<AppState>,
    RecordId(artist_id): RecordId,
) -> Result<Response, AppError> {
    let now = Utc::now();
    let artist = db::artists::find(&state.pool, artist_id)
        .await?
        .ok_or_else(|| missing(artist_id))?;

    let shows = db::shows::for_artist(&state.pool, artist_id).await?;

    Ok(page(ArtistDetail {
        artist,
        shows: partition_shows(shows, now),
    }))
}

pub async fn create_artist_form() -> Response {
    page(ArtistForm::descriptor(
        "List a new artist",
        "/artists/create".to_string(),
    ))
}

pub async fn create_artist(
    State(state): State<AppState>,
    FormData(form): FormData<ArtistForm>,
) -> Result<Response, AppError> {
    let new_artist = form.into_new()?;

    let artist = db::artists::insert(&state.pool, &new_artist)
        .await
        .map_err(persistence(format!(
            "An error occurred. Artist {} could not be listed.",
            new_artist.name
        )))?;

    info!(artist_id = artist.id, name = %artist.name, "Artist listed");
    let message = format!("Artist {} was successfully listed!", artist.name);
    Ok(created(artist, message))
}

pub async fn edit_artist_form(
    State(state): State<AppState>,
    RecordId(artist_id): RecordId,
) -> Result<Response, AppError> {
    let artist = db::artists::find(&state.pool, artist_id)
        .await?
        .ok_or_else(|| missing(artist_id))?;

    Ok(page(EditArtistPage {
        form: ArtistForm::descriptor("Edit artist", format!("/artists/{artist_id}/edit")),
        artist,
    }))
}

pub async fn edit_artist(
    State(state): State<AppState>,
    RecordId(artist_id): RecordId,
    FormData(form): FormData<ArtistForm>,
) -> Result<Response, AppError> {
    let changes = form.into_changes()?;

    let artist = db::artists::update(&state.pool, artist_id, changes)
        .await
        .map_err(persistence(format!(
            "An error occurred. Artist {artist_id} could not be updated."
        )))?
        .ok_or_else(|| missing(artist_id))?;

    info!(artist_id, "Artist updated");
    let message = format!("Artist {} was successfully updated!", artist.name);
    Ok(success(artist, message))
}

pub async fn delete_artist(
    State(state): State<AppState>,
    RecordId(artist_id): RecordId,
) -> Result<Response, AppError> {
    let deleted = db::artists::delete(&state.pool, artist_id)
        .await
        .map_err(persistence(format!(
            "An error occurred. Artist {artist_id} could not be deleted."
        )))?;

    let message = if deleted {
        info!(artist_id, "Artist deleted");
        format!("Artist {artist_id} was successfully deleted.")
    } else {
        format!("Artist {artist_id} does not exist, nothing was deleted.")
    };
    Ok(empty_success(message))
}
