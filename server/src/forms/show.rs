use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

use super::{FieldKind, FieldSpec, FormDescriptor};
use crate::models::NewShow;
use crate::utils::error::AppError;

/// Naive formats accepted besides RFC 3339, read as UTC.
const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

#[derive(Debug, Default, Deserialize)]
pub struct ShowForm {
    pub artist_id: Option<String>,
    pub venue_id: Option<String>,
    pub start_time: Option<String>,
}

impl ShowForm {
    /// Only the shape of the ids is checked here. Whether they exist is up to the store.
    pub fn into_new(self) -> Result<NewShow, AppError> {
        Ok(NewShow {
            artist_id: parse_id("artist_id", self.artist_id)?,
            venue_id: parse_id("venue_id", self.venue_id)?,
            start_time: parse_start_time(self.start_time)?,
        })
    }

    pub fn descriptor() -> FormDescriptor {
        FormDescriptor {
            title: "List a new show",
            action: "/shows/create".to_string(),
            fields: vec![
                FieldSpec::new("artist_id", "Artist ID", FieldKind::Number).required(),
                FieldSpec::new("venue_id", "Venue ID", FieldKind::Number).required(),
                FieldSpec::new("start_time", "Start time", FieldKind::DateTime).required(),
            ],
        }
    }
}

fn parse_id(field: &str, raw: Option<String>) -> Result<i64, AppError> {
    let raw = raw.unwrap_or_default();
    raw.trim()
        .parse::<i64>()
        .map_err(|_| AppError::Validation(format!("{field} must be a numeric id, got '{raw}'")))
}

pub fn parse_start_time(raw: Option<String>) -> Result<DateTime<Utc>, AppError> {
    let raw = raw.unwrap_or_default();
    let text = raw.trim();
    if text.is_empty() {
        return Err(AppError::Validation("start_time is required".to_string()));
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Ok(parsed.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| AppError::Validation(format!("'{text}' is not a valid start time")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_start_time_formats() {
        let expected = Utc.with_ymd_and_hms(2035, 4, 1, 20, 0, 0).unwrap();
        for text in [
            "2035-04-01T20:00:00Z",
            "2035-04-01T22:00:00+02:00",
            "2035-04-01 20:00:00",
            "2035-04-01T20:00",
        ] {
            assert_eq!(parse_start_time(Some(text.to_string())).unwrap(), expected, "{text}");
        }
    }

    #[test]
    fn test_bad_start_time() {
        assert!(matches!(
            parse_start_time(Some("next friday".into())),
            Err(AppError::Validation(_))
        ));
        assert!(parse_start_time(None).is_err());
    }

    #[test]
    fn test_into_new() {
        let show = ShowForm {
            artist_id: Some(" 4 ".into()),
            venue_id: Some("1".into()),
            start_time: Some("2019-05-21 21:30:00".into()),
        }
        .into_new()
        .unwrap();

        assert_eq!(show.artist_id, 4);
        assert_eq!(show.venue_id, 1);
    }

    #[test]
    fn test_non_numeric_id() {
        let form = ShowForm {
            artist_id: Some("abc".into()),
            venue_id: Some("1".into()),
            start_time: Some("2019-05-21 21:30:00".into()),
        };
        assert!(matches!(form.into_new(), Err(AppError::Validation(_))));
    }
}
