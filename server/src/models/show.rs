use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Show {
    pub id: i64,
    pub artist_id: i64,
    pub venue_id: i64,
    pub start_time: DateTime<Utc>,
}

impl Show {
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.start_time > now
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewShow {
    pub artist_id: i64,
    pub venue_id: i64,
    pub start_time: DateTime<Utc>,
}

/// A show seen from one side, with the other side's listing joined in.
/// The counterpart fields are `None` when the referenced record is missing.
#[derive(Debug, Clone, FromRow)]
pub struct ShowCounterpart {
    pub show_id: i64,
    pub counterpart_id: i64,
    pub counterpart_name: Option<String>,
    pub counterpart_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// One row of the show listing page.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ShowListing {
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    #[serde(serialize_with = "serialize_start_time")]
    pub start_time: DateTime<Utc>,
}

pub fn format_start_time(start_time: DateTime<Utc>) -> String {
    start_time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn serialize_start_time<S>(start_time: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&format_start_time(*start_time))
}
