use serde::Deserialize;

use super::{
    optional, optional_change, parse_flag, required, required_change, split_genres, FieldKind,
    FieldSpec, FormDescriptor, GENRES, LONG_TEXT_MAX, SHORT_TEXT_MAX, STATES,
};
use crate::models::{NewVenue, VenueChanges};
use crate::utils::error::AppError;

/// A submitted venue form. Keys outside this list, `id` included, are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct VenueForm {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub genres: Option<String>,
    pub seeking_talent: Option<String>,
    pub seeking_description: Option<String>,
}

impl VenueForm {
    pub fn into_new(self) -> Result<NewVenue, AppError> {
        Ok(NewVenue {
            name: required("name", self.name, SHORT_TEXT_MAX)?,
            city: required("city", self.city, SHORT_TEXT_MAX)?,
            state: state(self.state)?,
            address: required("address", self.address, SHORT_TEXT_MAX)?,
            phone: optional("phone", self.phone, SHORT_TEXT_MAX)?,
            image_link: optional("image_link", self.image_link, LONG_TEXT_MAX)?,
            facebook_link: optional("facebook_link", self.facebook_link, SHORT_TEXT_MAX)?,
            website: optional("website", self.website, LONG_TEXT_MAX)?,
            genres: self.genres.as_deref().map(split_genres).unwrap_or_default(),
            seeking_talent: parse_flag(self.seeking_talent.as_deref()),
            seeking_description: optional(
                "seeking_description",
                self.seeking_description,
                LONG_TEXT_MAX,
            )?,
        })
    }

    pub fn into_changes(self) -> Result<VenueChanges, AppError> {
        Ok(VenueChanges {
            name: required_change("name", self.name, SHORT_TEXT_MAX)?,
            city: required_change("city", self.city, SHORT_TEXT_MAX)?,
            state: self.state.map(|s| state(Some(s))).transpose()?,
            address: required_change("address", self.address, SHORT_TEXT_MAX)?,
            phone: optional_change("phone", self.phone, SHORT_TEXT_MAX)?,
            image_link: optional_change("image_link", self.image_link, LONG_TEXT_MAX)?,
            facebook_link: optional_change("facebook_link", self.facebook_link, SHORT_TEXT_MAX)?,
            website: optional_change("website", self.website, LONG_TEXT_MAX)?,
            genres: self.genres.as_deref().map(split_genres),
            seeking_talent: self.seeking_talent.as_deref().map(|v| parse_flag(Some(v))),
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
                FieldSpec::new("address", "Address", FieldKind::Text).required(),
                FieldSpec::new("phone", "Phone", FieldKind::Tel),
                FieldSpec::new("image_link", "Image link", FieldKind::Url),
                FieldSpec::new("genres", "Genres", FieldKind::MultiSelect).choices(GENRES),
                FieldSpec::new("facebook_link", "Facebook link", FieldKind::Url),
                FieldSpec::new("website", "Website", FieldKind::Url),
                FieldSpec::new("seeking_talent", "Seeking talent", FieldKind::Checkbox),
                FieldSpec::new("seeking_description", "Seeking description", FieldKind::Text),
            ],
        }
    }
}

pub(super) fn state(raw: Option<String>) -> Result<String, AppError> {
    let value = required("state", raw, SHORT_TEXT_MAX)?.to_ascii_uppercase();
    if !STATES.contains(&value.as_str()) {
        return Err(AppError::Validation(format!("'{value}' is not a known state")));
    }
    Ok(value)
}
