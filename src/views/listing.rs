use super::format_show_time;
use crate::booking_store::{SearchMatch, ShowListing, VenueSummary};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AreaVenue {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: usize,
}

/// Venues sharing one (city, state) pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AreaGroup {
    pub city: String,
    pub state: String,
    pub venues: Vec<AreaVenue>,
}

/// Buckets venues by their exact (city, state) pair.
///
/// Groups appear in the order their key is first seen and venues keep their
/// input order within a group. Input does not need to be sorted.
pub fn group_venues_by_area(venues: Vec<VenueSummary>) -> Vec<AreaGroup> {
    let mut groups: Vec<AreaGroup> = Vec::new();
    let mut index_by_area: HashMap<(String, String), usize> = HashMap::new();

    for venue in venues {
        let key = (venue.city, venue.state);
        let index = match index_by_area.get(&key) {
            Some(index) => *index,
            None => {
                groups.push(AreaGroup {
                    city: key.0.clone(),
                    state: key.1.clone(),
                    venues: Vec::new(),
                });
                index_by_area.insert(key, groups.len() - 1);
                groups.len() - 1
            }
        };
        groups[index].venues.push(AreaVenue {
            id: venue.id,
            name: venue.name,
            num_upcoming_shows: venue.num_upcoming_shows,
        });
    }

    groups
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<SearchMatch>,
    pub search_term: String,
}

pub fn search_results(search_term: String, matches: Vec<SearchMatch>) -> SearchResults {
    SearchResults {
        count: matches.len(),
        data: matches,
        search_term,
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ShowListItem {
    pub id: i64,
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: String,
}

pub fn show_listing(shows: Vec<ShowListing>) -> Vec<ShowListItem> {
    shows
        .into_iter()
        .map(|show| ShowListItem {
            id: show.show_id,
            venue_id: show.venue_id,
            venue_name: show.venue_name,
            artist_id: show.artist_id,
            artist_name: show.artist_name,
            artist_image_link: show.artist_image_link,
            start_time: format_show_time(show.show_time),
        })
        .collect()
}
