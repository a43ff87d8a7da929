use std::collections::HashMap;

use serde::Serialize;

use crate::models::{Artist, Venue};

/// Id and name of a listed record, as the listing and search pages show it.
pub trait Listed {
    fn id(&self) -> i64;
    fn name(&self) -> &str;
}

impl Listed for Venue {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Listed for Artist {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingSummary {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: usize,
}

impl ListingSummary {
    pub fn of<R: Listed>(record: &R, upcoming: &HashMap<i64, usize>) -> Self {
        Self {
            id: record.id(),
            name: record.name().to_string(),
            num_upcoming_shows: upcoming.get(&record.id()).copied().unwrap_or(0),
        }
    }
}

/// Venues sharing one city and state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<ListingSummary>,
}

/// Groups venues by (city, state). Groups keep the order in which their first
/// venue appears, and venues keep their input order within a group.
pub fn group_by_area(venues: &[Venue], upcoming: &HashMap<i64, usize>) -> Vec<Area> {
    let mut areas: Vec<Area> = Vec::new();
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();

    for venue in venues {
        let summary = ListingSummary::of(venue, upcoming);
        match index.get(&(venue.city.as_str(), venue.state.as_str())) {
            Some(&slot) => areas[slot].venues.push(summary),
            None => {
                index.insert((venue.city.as_str(), venue.state.as_str()), areas.len());
                areas.push(Area {
                    city: venue.city.clone(),
                    state: venue.state.clone(),
                    venues: vec![summary],
                });
            }
        }
    }

    areas
}
