use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub genres: Json<Vec<String>>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewArtist {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub genres: Vec<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

/// The editable subset of an artist.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArtistChanges {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<Option<String>>,
    pub image_link: Option<Option<String>>,
    pub facebook_link: Option<Option<String>>,
    pub website: Option<Option<String>>,
    pub genres: Option<Vec<String>>,
    pub seeking_venue: Option<bool>,
    pub seeking_description: Option<Option<String>>,
}

impl ArtistChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(self, artist: &mut Artist) {
        if let Some(name) = self.name {
            artist.name = name;
        }
        if let Some(city) = self.city {
            artist.city = city;
        }
        if let Some(state) = self.state {
            artist.state = state;
        }
        if let Some(phone) = self.phone {
            artist.phone = phone;
        }
        if let Some(image_link) = self.image_link {
            artist.image_link = image_link;
        }
        if let Some(facebook_link) = self.facebook_link {
            artist.facebook_link = facebook_link;
        }
        if let Some(website) = self.website {
            artist.website = website;
        }
        if let Some(genres) = self.genres {
            artist.genres = Json(genres);
        }
        if let Some(seeking_venue) = self.seeking_venue {
            artist.seeking_venue = seeking_venue;
        }
        if let Some(seeking_description) = self.seeking_description {
            artist.seeking_description = seeking_description;
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_artist(id: i64, name: &str) -> Artist {
    Artist {
        id,
        name: name.to_string(),
        city: "San Francisco".to_string(),
        state: "CA".to_string(),
        phone: None,
        image_link: Some("https://images.example/artist.jpg".to_string()),
        facebook_link: None,
        website: None,
        genres: Json(vec!["Rock n Roll".to_string()]),
        seeking_venue: false,
        seeking_description: None,
    }
}
