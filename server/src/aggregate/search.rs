use std::collections::HashMap;

use serde::Serialize;

use super::listing::{Listed, ListingSummary};

#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub search_term: String,
    pub count: usize,
    pub data: Vec<ListingSummary>,
}

/// Case-insensitive substring match. An empty term matches every name.
pub fn matches(name: &str, term: &str) -> bool {
    name.to_lowercase().contains(&term.to_lowercase())
}

/// Keeps the records whose name contains `term`, annotated with upcoming show counts.
pub fn search<R: Listed>(records: &[R], term: &str, upcoming: &HashMap<i64, usize>) -> SearchResults {
    let data: Vec<ListingSummary> = records
        .iter()
        .filter(|record| matches(record.name(), term))
        .map(|record| ListingSummary::of(record, upcoming))
        .collect();

    SearchResults {
        search_term: term.to_string(),
        count: data.len(),
        data,
    }
}
