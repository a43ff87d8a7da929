use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use crate::models::show::format_start_time;
use crate::models::ShowCounterpart;

/// A show whose counterpart record was found.
#[derive(Debug, Clone)]
pub struct ResolvedShow {
    pub counterpart_id: i64,
    pub counterpart_name: String,
    pub counterpart_image_link: Option<String>,
    pub start_time: String,
}

/// A show on a venue page: who plays and when.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueShow {
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

impl From<ResolvedShow> for VenueShow {
    fn from(show: ResolvedShow) -> Self {
        Self {
            artist_id: show.counterpart_id,
            artist_name: show.counterpart_name,
            artist_image_link: show.counterpart_image_link,
            start_time: show.start_time,
        }
    }
}

/// A show on an artist page: where and when.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistShow {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: String,
}

impl From<ResolvedShow> for ArtistShow {
    fn from(show: ResolvedShow) -> Self {
        Self {
            venue_id: show.counterpart_id,
            venue_name: show.counterpart_name,
            venue_image_link: show.counterpart_image_link,
            start_time: show.start_time,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ShowBreakdown<T> {
    pub past_shows: Vec<T>,
    pub upcoming_shows: Vec<T>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// Splits an entity's shows into past (start <= now) and upcoming (start > now).
///
/// A show whose counterpart no longer resolves is dropped from both lists and
/// logged, since the foreign keys should make that impossible.
pub fn partition_shows<T>(shows: Vec<ShowCounterpart>, now: DateTime<Utc>) -> ShowBreakdown<T>
where
    T: From<ResolvedShow>,
{
    let mut past_shows = Vec::new();
    let mut upcoming_shows = Vec::new();

    for show in shows {
        let Some(name) = show.counterpart_name else {
            warn!(
                show_id = show.show_id,
                counterpart_id = show.counterpart_id,
                "Show references a missing record, leaving it out"
            );
            continue;
        };

        let upcoming = show.start_time > now;
        let resolved = T::from(ResolvedShow {
            counterpart_id: show.counterpart_id,
            counterpart_name: name,
            counterpart_image_link: show.counterpart_image_link,
            start_time: format_start_time(show.start_time),
        });

        if upcoming {
            upcoming_shows.push(resolved);
        } else {
            past_shows.push(resolved);
        }
    }

    ShowBreakdown {
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }
}
