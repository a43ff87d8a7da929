//! Derived views over venues, artists and shows.
//!
//! Every function here is pure. Callers capture one `now` per request and
//! pass it to each of them, so a request never classifies the same show two
//! different ways.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::models::Show;

pub mod detail;
pub mod listing;
pub mod search;

pub use detail::{partition_shows, ArtistShow, ShowBreakdown, VenueShow};
pub use listing::{group_by_area, Area, Listed, ListingSummary};
pub use search::{search, SearchResults};

/// Counts upcoming shows per key (a venue id or an artist id).
pub fn upcoming_counts<F>(shows: &[Show], now: DateTime<Utc>, key: F) -> HashMap<i64, usize>
where
    F: Fn(&Show) -> i64,
{
    let mut counts = HashMap::new();
    for show in shows.iter().filter(|show| show.is_upcoming(now)) {
        *counts.entry(key(show)).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
pub(crate) fn show_at(id: i64, artist_id: i64, venue_id: i64, start_time: DateTime<Utc>) -> Show {
    Show {
        id,
        artist_id,
        venue_id,
        start_time,
    }
}
