use sqlx::SqlitePool;

use crate::models::{NewShow, Show, ShowCounterpart, ShowListing};

/// Inserts a show. Unknown artist or venue ids are left to the foreign keys,
/// which reject the insert with a constraint violation.
pub async fn insert(pool: &SqlitePool, show: &NewShow) -> Result<Show, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let id = sqlx::query("INSERT INTO shows (artist_id, venue_id, start_time) VALUES (?, ?, ?)")
        .bind(show.artist_id)
        .bind(show.venue_id)
        .bind(show.start_time)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

    tx.commit().await?;

    Ok(Show {
        id,
        artist_id: show.artist_id,
        venue_id: show.venue_id,
        start_time: show.start_time,
    })
}

pub async fn list(pool: &SqlitePool) -> Result<Vec<Show>, sqlx::Error> {
    sqlx::query_as::<_, Show>("SELECT id, artist_id, venue_id, start_time FROM shows ORDER BY id")
        .fetch_all(pool)
        .await
}

pub async fn listings(pool: &SqlitePool) -> Result<Vec<ShowListing>, sqlx::Error> {
    sqlx::query_as::<_, ShowListing>(
        r#"
        SELECT s.venue_id, v.name AS venue_name,
               s.artist_id, a.name AS artist_name, a.image_link AS artist_image_link,
               s.start_time
        FROM shows s
        JOIN venues v ON v.id = s.venue_id
        JOIN artists a ON a.id = s.artist_id
        ORDER BY s.start_time, s.id
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Shows at a venue, each joined with the artist playing it.
pub async fn for_venue(pool: &SqlitePool, venue_id: i64) -> Result<Vec<ShowCounterpart>, sqlx::Error> {
    sqlx::query_as::<_, ShowCounterpart>(
        r#"
        SELECT s.id AS show_id, s.artist_id AS counterpart_id,
               a.name AS counterpart_name, a.image_link AS counterpart_image_link,
               s.start_time
        FROM shows s
        LEFT JOIN artists a ON a.id = s.artist_id
        WHERE s.venue_id = ?
        ORDER BY s.start_time, s.id
        "#,
    )
    .bind(venue_id)
    .fetch_all(pool)
    .await
}

/// Shows an artist plays, each joined with the venue hosting it.
pub async fn for_artist(
    pool: &SqlitePool,
    artist_id: i64,
) -> Result<Vec<ShowCounterpart>, sqlx::Error> {
    sqlx::query_as::<_, ShowCounterpart>(
        r#"
        SELECT s.id AS show_id, s.venue_id AS counterpart_id,
               v.name AS counterpart_name, v.image_link AS counterpart_image_link,
               s.start_time
        FROM shows s
        LEFT JOIN venues v ON v.id = s.venue_id
        WHERE s.artist_id = ?
        ORDER BY s.start_time, s.id
        "#,
    )
    .bind(artist_id)
    .fetch_all(pool)
    .await
}
