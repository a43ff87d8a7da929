use sqlx::types::Json;
use sqlx::SqlitePool;

use crate::models::{Artist, ArtistChanges, NewArtist};

const SELECT_ARTIST: &str = r#"
    SELECT id, name, city, state, phone, image_link, facebook_link, website,
           genres, seeking_venue, seeking_description
    FROM artists
"#;

pub async fn list(pool: &SqlitePool) -> Result<Vec<Artist>, sqlx::Error> {
    sqlx::query_as::<_, Artist>(&format!("{SELECT_ARTIST} ORDER BY id"))
        .fetch_all(pool)
        .await
}

pub async fn recent(pool: &SqlitePool, limit: i64) -> Result<Vec<Artist>, sqlx::Error> {
    sqlx::query_as::<_, Artist>(&format!("{SELECT_ARTIST} ORDER BY id DESC LIMIT ?"))
        .bind(limit)
        .fetch_all(pool)
        .await
}

pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM artists")
        .fetch_one(pool)
        .await
}

pub async fn find(pool: &SqlitePool, id: i64) -> Result<Option<Artist>, sqlx::Error> {
    sqlx::query_as::<_, Artist>(&format!("{SELECT_ARTIST} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn insert(pool: &SqlitePool, artist: &NewArtist) -> Result<Artist, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let id = sqlx::query(
        r#"
        INSERT INTO artists (name, city, state, phone, image_link, facebook_link, website,
                             genres, seeking_venue, seeking_description)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&artist.name)
    .bind(&artist.city)
    .bind(&artist.state)
    .bind(&artist.phone)
    .bind(&artist.image_link)
    .bind(&artist.facebook_link)
    .bind(&artist.website)
    .bind(Json(&artist.genres))
    .bind(artist.seeking_venue)
    .bind(&artist.seeking_description)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    let stored = sqlx::query_as::<_, Artist>(&format!("{SELECT_ARTIST} WHERE id = ?"))
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(stored)
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    changes: ArtistChanges,
) -> Result<Option<Artist>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let Some(mut artist) = sqlx::query_as::<_, Artist>(&format!("{SELECT_ARTIST} WHERE id = ?"))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
    else {
        return Ok(None);
    };

    if changes.is_empty() {
        tx.commit().await?;
        return Ok(Some(artist));
    }
    changes.apply(&mut artist);

    sqlx::query(
        r#"
        UPDATE artists
        SET name = ?, city = ?, state = ?, phone = ?, image_link = ?, facebook_link = ?,
            website = ?, genres = ?, seeking_venue = ?, seeking_description = ?
        WHERE id = ?
        "#,
    )
    .bind(&artist.name)
    .bind(&artist.city)
    .bind(&artist.state)
    .bind(&artist.phone)
    .bind(&artist.image_link)
    .bind(&artist.facebook_link)
    .bind(&artist.website)
    .bind(&artist.genres)
    .bind(artist.seeking_venue)
    .bind(&artist.seeking_description)
    .bind(artist.id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(Some(artist))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query("DELETE FROM artists WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
pub(crate) fn new_artist(name: &str) -> NewArtist {
    NewArtist {
        name: name.to_string(),
        city: "San Francisco".to_string(),
        state: "CA".to_string(),
        phone: Some("326-123-5000".to_string()),
        image_link: Some("https://images.example/artist.jpg".to_string()),
        facebook_link: None,
        website: None,
        genres: vec!["Rock n Roll".to_string()],
        seeking_venue: false,
        seeking_description: None,
    }
}
