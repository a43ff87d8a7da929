use sqlx::types::Json;
use sqlx::SqlitePool;

use crate::models::{NewVenue, Venue, VenueChanges};

const SELECT_VENUE: &str = r#"
    SELECT id, name, city, state, address, phone, image_link, facebook_link,
           website, genres, seeking_talent, seeking_description
    FROM venues
"#;

pub async fn list(pool: &SqlitePool) -> Result<Vec<Venue>, sqlx::Error> {
    sqlx::query_as::<_, Venue>(&format!("{SELECT_VENUE} ORDER BY id"))
        .fetch_all(pool)
        .await
}

pub async fn recent(pool: &SqlitePool, limit: i64) -> Result<Vec<Venue>, sqlx::Error> {
    sqlx::query_as::<_, Venue>(&format!("{SELECT_VENUE} ORDER BY id DESC LIMIT ?"))
        .bind(limit)
        .fetch_all(pool)
        .await
}

pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM venues")
        .fetch_one(pool)
        .await
}

pub async fn find(pool: &SqlitePool, id: i64) -> Result<Option<Venue>, sqlx::Error> {
    sqlx::query_as::<_, Venue>(&format!("{SELECT_VENUE} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn insert(pool: &SqlitePool, venue: &NewVenue) -> Result<Venue, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let id = sqlx::query(
        r#"
        INSERT INTO venues (name, city, state, address, phone, image_link, facebook_link,
                            website, genres, seeking_talent, seeking_description)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&venue.name)
    .bind(&venue.city)
    .bind(&venue.state)
    .bind(&venue.address)
    .bind(&venue.phone)
    .bind(&venue.image_link)
    .bind(&venue.facebook_link)
    .bind(&venue.website)
    .bind(Json(&venue.genres))
    .bind(venue.seeking_talent)
    .bind(&venue.seeking_description)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    let stored = sqlx::query_as::<_, Venue>(&format!("{SELECT_VENUE} WHERE id = ?"))
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(stored)
}

/// Applies `changes` to the stored venue. Returns `None` when no venue has `id`.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    changes: VenueChanges,
) -> Result<Option<Venue>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let Some(mut venue) = sqlx::query_as::<_, Venue>(&format!("{SELECT_VENUE} WHERE id = ?"))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
    else {
        return Ok(None);
    };

    if changes.is_empty() {
        tx.commit().await?;
        return Ok(Some(venue));
    }
    changes.apply(&mut venue);

    sqlx::query(
        r#"
        UPDATE venues
        SET name = ?, city = ?, state = ?, address = ?, phone = ?, image_link = ?,
            facebook_link = ?, website = ?, genres = ?, seeking_talent = ?,
            seeking_description = ?
        WHERE id = ?
        "#,
    )
    .bind(&venue.name)
    .bind(&venue.city)
    .bind(&venue.state)
    .bind(&venue.address)
    .bind(&venue.phone)
    .bind(&venue.image_link)
    .bind(&venue.facebook_link)
    .bind(&venue.website)
    .bind(&venue.genres)
    .bind(venue.seeking_talent)
    .bind(&venue.seeking_description)
    .bind(venue.id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(Some(venue))
}

/// Deletes the venue and, through the foreign key cascade, its shows.
/// Returns whether a row was removed.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query("DELETE FROM venues WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
pub(crate) fn new_venue(name: &str, city: &str, state: &str) -> NewVenue {
    NewVenue {
        name: name.to_string(),
        city: city.to_string(),
        state: state.to_string(),
        address: "335 Delancey Street".to_string(),
        phone: Some("914-003-1132".to_string()),
        image_link: None,
        facebook_link: None,
        website: None,
        genres: vec!["Jazz".to_string(), "Blues".to_string()],
        seeking_talent: true,
        seeking_description: Some("We are looking for local artists".to_string()),
    }
}
