use super::{format_show_time, is_upcoming};
use crate::booking_store::{Artist, ArtistShow, Venue, VenueShow};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Splits `shows` into (past, upcoming) relative to `now`, keeping order.
pub fn partition_shows<T>(
    shows: Vec<T>,
    now: DateTime<Utc>,
    show_time: impl Fn(&T) -> DateTime<Utc>,
) -> (Vec<T>, Vec<T>) {
    let (upcoming, past): (Vec<T>, Vec<T>) = shows
        .into_iter()
        .partition(|show| is_upcoming(show_time(show), now));
    (past, upcoming)
}

// =============================================================================
// Venue
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ShowByArtist {
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: String,
}

impl From<VenueShow> for ShowByArtist {
    fn from(show: VenueShow) -> Self {
        ShowByArtist {
            artist_id: show.artist_id,
            artist_name: show.artist_name,
            artist_image_link: show.artist_image_link,
            start_time: format_show_time(show.show_time),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VenueDetail {
    #[serde(flatten)]
    pub venue: Venue,
    pub past_shows: Vec<ShowByArtist>,
    pub upcoming_shows: Vec<ShowByArtist>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

pub fn venue_detail(venue: Venue, shows: Vec<VenueShow>, now: DateTime<Utc>) -> VenueDetail {
    let (past, upcoming) = partition_shows(shows, now, |show| show.show_time);
    let past_shows: Vec<ShowByArtist> = past.into_iter().map(Into::into).collect();
    let upcoming_shows: Vec<ShowByArtist> = upcoming.into_iter().map(Into::into).collect();
    VenueDetail {
        venue,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }
}

// =============================================================================
// Artist
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ShowAtVenue {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: String,
    pub start_time: String,
}

impl From<ArtistShow> for ShowAtVenue {
    fn from(show: ArtistShow) -> Self {
        ShowAtVenue {
            venue_id: show.venue_id,
            venue_name: show.venue_name,
            venue_image_link: show.venue_image_link,
            start_time: format_show_time(show.show_time),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ArtistDetail {
    #[serde(flatten)]
    pub artist: Artist,
    pub past_shows: Vec<ShowAtVenue>,
    pub upcoming_shows: Vec<ShowAtVenue>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

pub fn artist_detail(artist: Artist, shows: Vec<ArtistShow>, now: DateTime<Utc>) -> ArtistDetail {
    let (past, upcoming) = partition_shows(shows, now, |show| show.show_time);
    let past_shows: Vec<ShowAtVenue> = past.into_iter().map(Into::into).collect();
    let upcoming_shows: Vec<ShowAtVenue> = upcoming.into_iter().map(Into::into).collect();
    ArtistDetail {
        artist,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }
}
