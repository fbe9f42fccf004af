use biblio_corpus::{fields, Record};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const DEFAULT_VENUE_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueCount {
    pub venue: String,
    pub count: u64,
}

/// Venue identifier of a record: journal name, else ISSN.
///
/// Empty values are skipped the same way as absent ones.
pub fn resolve_venue(record: &Record) -> Option<&str> {
    record
        .get(fields::JOURNAL)
        .filter(|v| !v.is_empty())
        .or_else(|| record.get(fields::ISSN).filter(|v| !v.is_empty()))
}

/// Venues with the most records, descending; ties keep first-seen order
pub fn top_venues(records: &[Record], limit: usize) -> Vec<VenueCount> {
    let mut counts: IndexMap<&str, u64> = IndexMap::new();
    for venue in records.iter().filter_map(resolve_venue) {
        *counts.entry(venue).or_insert(0) += 1;
    }

    let mut ranked: Vec<VenueCount> = counts
        .into_iter()
        .map(|(venue, count)| VenueCount {
            venue: venue.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(limit);
    ranked
}
