//! Display-ready view data built from store rows.
//!
//! Everything here is a pure function of its inputs; the instant used to tell
//! upcoming shows from past ones is always passed in by the caller.

mod detail;
mod listing;

pub use detail::{
    artist_detail, partition_shows, venue_detail, ArtistDetail, ShowAtVenue, ShowByArtist,
    VenueDetail,
};
pub use listing::{
    group_venues_by_area, search_results, show_listing, AreaGroup, AreaVenue, SearchResults,
    ShowListItem,
};

use chrono::{DateTime, Utc};

pub const SHOW_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A show is upcoming strictly after `now`; a show starting at `now` is past.
pub fn is_upcoming(show_time: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    show_time > now
}

pub fn format_show_time(show_time: DateTime<Utc>) -> String {
    show_time.format(SHOW_TIME_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_upcoming_boundary() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        assert!(!is_upcoming(now, now));
        assert!(!is_upcoming(now - Duration::seconds(1), now));
        assert!(is_upcoming(now + Duration::seconds(1), now));
    }

    #[test]
    fn test_format_show_time() {
        let t = Utc.with_ymd_and_hms(2035, 4, 1, 20, 0, 5).unwrap();
        assert_eq!(format_show_time(t), "2035-04-01 20:00:05");
    }
}
