use serde::Deserialize;

use super::venue::state;
use super::{
    optional, optional_change, parse_flag, required, required_change, split_genres, FieldKind,
    FieldSpec, FormDescriptor, GENRES, LONG_TEXT_MAX, SHORT_TEXT_MAX, STATES,
};
use crate::models::{ArtistChanges, NewArtist};
use crate::utils::error::AppError;

#[derive(Debug, Default, Deserialize)]
pub struct ArtistForm {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub genres: Option<String>,
    pub seeking_venue: Option<String>,
    pub seeking_description: Option<String>,
}

impl ArtistForm {
    pub fn into_new(self) -> Result<NewArtist, AppError> {
        Ok(NewArtist {
            name: required("name", self.name, SHORT_TEXT_MAX)?,
            city: required("city", self.city, SHORT_TEXT_MAX)?,
            state: state(self.state)?,
            phone: optional("phone", self.phone, SHORT_TEXT_MAX)?,
            image_link: optional("image_link", self.image_link, LONG_TEXT_MAX)?,
            facebook_link: optional("facebook_link", self.facebook_link, SHORT_TEXT_MAX)?,
            website: optional("website", self.website, LONG_TEXT_MAX)?,
            genres: self.genres.as_deref().map(split_genres).unwrap_or_default(),
            seeking_venue: parse_flag(self.seeking_venue.as_deref()),
            seeking_description: optional(
                "seeking_description",
                self.seeking_description,
                LONG_TEXT_MAX,
            )?,
        })
    }

    pub fn into_changes(self) -> Result<ArtistChanges, AppError> {
        Ok(ArtistChanges {
            name: required_change("name", self.name, SHORT_TEXT_MAX)?,
            city: required_change("city", self.city, SHORT_TEXT_MAX)?,
            state: self.state.map(|s| state(Some(s))).transpose()?,
            phone: optional_change("phone", self.phone, SHORT_TEXT_MAX)?,
            image_link: optional_change("image_link", self.image_link, LONG_TEXT_MAX)?,
            facebook_link: optional_change("facebook_link", self.facebook_link, SHORT_TEXT_MAX)?,
            website: optional_change("website", self.website, LONG_TEXT_MAX)?,
            genres: self.genres.as_deref().map(split_genres),
            seeking_venue: self.seeking_venue.as_deref().map(|v| parse_flag(Some(v))),
            seeking_description: optional_change(
                "seeking_description",
                self.seeking_description,
                LONG_TEXT_MAX,
            )?,
        })
    }

    pub fn descriptor(title: &'static str, action: String) -> FormDescriptor {
        FormDescriptor {
            title,
            action,
            fields: vec![
                FieldSpec::new("name", "Name", FieldKind::Text).required(),
                FieldSpec::new("city", "City", FieldKind::Text).required(),
                FieldSpec::new("state", "State", FieldKind::Select)
                    .required()
                    .choices(STATES),
                FieldSpec::new("phone", "Phone", FieldKind::Tel),
                FieldSpec::new("image_link", "Image link", FieldKind::Url),
                FieldSpec::new("genres", "Genres", FieldKind::MultiSelect).choices(GENRES),
                FieldSpec::new("facebook_link", "Facebook link", FieldKind::Url),
                FieldSpec::new("website", "Website", FieldKind::Url),
                FieldSpec::new("seeking_venue", "Seeking venue", FieldKind::Checkbox),
                FieldSpec::new("seeking_description", "Seeking description", FieldKind::Text),
            ],
        }
    }
}
