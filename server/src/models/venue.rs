use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub genres: Json<Vec<String>>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

/// A validated venue listing, ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewVenue {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub genres: Vec<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

/// The editable subset of a venue. Fields left `None` keep their stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VenueChanges {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    pub phone: Option<Option<String>>,
    pub image_link: Option<Option<String>>,
    pub facebook_link: Option<Option<String>>,
    pub website: Option<Option<String>>,
    pub genres: Option<Vec<String>>,
    pub seeking_talent: Option<bool>,
    pub seeking_description: Option<Option<String>>,
}

impl VenueChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(self, venue: &mut Venue) {
        if let Some(name) = self.name {
            venue.name = name;
        }
        if let Some(city) = self.city {
            venue.city = city;
        }
        if let Some(state) = self.state {
            venue.state = state;
        }
        if let Some(address) = self.address {
            venue.address = address;
        }
        if let Some(phone) = self.phone {
            venue.phone = phone;
        }
        if let Some(image_link) = self.image_link {
            venue.image_link = image_link;
        }
        if let Some(facebook_link) = self.facebook_link {
            venue.facebook_link = facebook_link;
        }
        if let Some(website) = self.website {
            venue.website = website;
        }
        if let Some(genres) = self.genres {
            venue.genres = Json(genres);
        }
        if let Some(seeking_talent) = self.seeking_talent {
            venue.seeking_talent = seeking_talent;
        }
        if let Some(seeking_description) = self.seeking_description {
            venue.seeking_description = seeking_description;
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_venue(id: i64, name: &str, city: &str, state: &str) -> Venue {
    Venue {
        id,
        name: name.to_string(),
        city: city.to_string(),
        state: state.to_string(),
        address: "1015 Folsom Street".to_string(),
        phone: None,
        image_link: None,
        facebook_link: None,
        website: None,
        genres: Json(vec!["Jazz".to_string()]),
        seeking_talent: false,
        seeking_description: None,
    }
}
