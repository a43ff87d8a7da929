//! Form submissions and the descriptors the create/edit pages are built from.
//!
//! Submissions arrive as form-encoded strings. Each form type turns them into
//! a validated create payload or an allow-listed change set, rejecting bad
//! input with `AppError::Validation`.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::utils::error::AppError;

pub mod artist;
pub mod show;
pub mod venue;

pub use artist::ArtistForm;
pub use show::ShowForm;
pub use venue::VenueForm;

pub const SHORT_TEXT_MAX: usize = 120;
pub const LONG_TEXT_MAX: usize = 500;

pub const GENRES: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

pub const STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH",
    "OK", "OR", "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

/// Keys a multi-select sends once per chosen option.
const MULTI_VALUE_FIELDS: &[&str] = &["genres"];

/// Older key names still accepted, paired with the field they fill.
const FIELD_ALIASES: &[(&str, &str)] = &[("description", "seeking_description")];

/// Folds decoded key/value pairs into one string per field.
///
/// Repeated multi-value keys are joined with commas, so `genres=Jazz&genres=Blues`
/// reads the same as `genres=Jazz,Blues`. Any other repeated key keeps its last
/// value. An alias only fills its field when the field itself was not submitted.
pub fn collect_fields(pairs: Vec<(String, String)>) -> Map<String, Value> {
    let mut fields = Map::new();
    let mut aliased = Map::new();

    for (key, value) in pairs {
        match FIELD_ALIASES.iter().find(|(alias, _)| *alias == key) {
            Some((_, field)) => merge_field(&mut aliased, field.to_string(), value),
            None => merge_field(&mut fields, key, value),
        }
    }

    for (field, value) in aliased {
        fields.entry(field).or_insert(value);
    }
    fields
}

fn merge_field(fields: &mut Map<String, Value>, key: String, value: String) {
    if MULTI_VALUE_FIELDS.contains(&key.as_str()) {
        if let Some(Value::String(existing)) = fields.get_mut(&key) {
            existing.push(',');
            existing.push_str(&value);
            return;
        }
    }
    fields.insert(key, Value::String(value));
}

/// Splits the comma-delimited genres field. Entries are trimmed and blanks dropped.
pub fn split_genres(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|genre| !genre.is_empty())
        .map(str::to_string)
        .collect()
}

/// Checkbox semantics: browsers send `y`/`on` when ticked and nothing otherwise.
pub fn parse_flag(raw: Option<&str>) -> bool {
    matches!(
        raw.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("y" | "yes" | "on" | "true" | "1")
    )
}

pub(crate) fn required(field: &str, raw: Option<String>, max: usize) -> Result<String, AppError> {
    let value = raw.map(|v| v.trim().to_string()).unwrap_or_default();
    if value.is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    check_length(field, &value, max)?;
    Ok(value)
}

/// Blank input becomes `None`.
pub(crate) fn optional(field: &str, raw: Option<String>, max: usize) -> Result<Option<String>, AppError> {
    let Some(value) = raw.map(|v| v.trim().to_string()) else {
        return Ok(None);
    };
    if value.is_empty() {
        return Ok(None);
    }
    check_length(field, &value, max)?;
    Ok(Some(value))
}

/// Edit semantics for a nullable column: absent keeps it, blank clears it.
pub(crate) fn optional_change(
    field: &str,
    raw: Option<String>,
    max: usize,
) -> Result<Option<Option<String>>, AppError> {
    match raw {
        None => Ok(None),
        Some(value) => optional(field, Some(value), max).map(Some),
    }
}

/// Edit semantics for a required column: absent keeps it, blank is rejected.
pub(crate) fn required_change(
    field: &str,
    raw: Option<String>,
    max: usize,
) -> Result<Option<String>, AppError> {
    match raw {
        None => Ok(None),
        Some(value) => required(field, Some(value), max).map(Some),
    }
}

fn check_length(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.chars().count() > max {
        return Err(AppError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Tel,
    Url,
    Number,
    DateTime,
    Select,
    MultiSelect,
    Checkbox,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<&'static [&'static str]>,
}

impl FieldSpec {
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
            choices: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn choices(mut self, choices: &'static [&'static str]) -> Self {
        self.choices = Some(choices);
        self
    }
}

/// What a create or edit page needs to render its form.
#[derive(Debug, Clone, Serialize)]
pub struct FormDescriptor {
    pub title: &'static str,
    pub action: String,
    pub fields: Vec<FieldSpec>,
}
