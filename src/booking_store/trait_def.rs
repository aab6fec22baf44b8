//! BookingStore trait definition.
//!
//! Handlers only see this trait, so the server can be exercised against any
//! backend holding venues, artists and shows.

use super::error::StoreResult;
use super::models::*;
use chrono::{DateTime, Utc};

/// Storage backend of the booking directory.
///
/// Every read that classifies shows as upcoming takes the evaluation instant
/// `now` from the caller. Every write runs in a single transaction.
pub trait BookingStore: Send + Sync {
    // =========================================================================
    // Venues
    // =========================================================================

    /// All venues ordered by (city, state, id) with their upcoming show counts.
    fn venues_with_upcoming_counts(&self, now: DateTime<Utc>) -> StoreResult<Vec<VenueSummary>>;

    /// Venues whose name contains `term`, ignoring case.
    fn search_venues(&self, term: &str, now: DateTime<Utc>) -> StoreResult<Vec<SearchMatch>>;

    fn get_venue(&self, id: i64) -> StoreResult<Option<Venue>>;

    /// Shows hosted by the venue, ordered by show_time ascending.
    fn get_venue_shows(&self, venue_id: i64) -> StoreResult<Vec<VenueShow>>;

    fn create_venue(&self, venue: &NewVenue) -> StoreResult<i64>;

    /// Overwrites every mutable field of the venue, genres included.
    fn update_venue(&self, id: i64, venue: &NewVenue) -> StoreResult<()>;

    /// Fails with a constraint violation while the venue still has shows.
    fn delete_venue(&self, id: i64) -> StoreResult<()>;

    // =========================================================================
    // Artists
    // =========================================================================

    /// All artists ordered by id.
    fn list_artists(&self) -> StoreResult<Vec<ArtistSummary>>;

    fn search_artists(&self, term: &str, now: DateTime<Utc>) -> StoreResult<Vec<SearchMatch>>;

    fn get_artist(&self, id: i64) -> StoreResult<Option<Artist>>;

    fn get_artist_shows(&self, artist_id: i64) -> StoreResult<Vec<ArtistShow>>;

    fn create_artist(&self, artist: &NewArtist) -> StoreResult<i64>;

    fn update_artist(&self, id: i64, artist: &NewArtist) -> StoreResult<()>;

    fn delete_artist(&self, id: i64) -> StoreResult<()>;

    // =========================================================================
    // Shows
    // =========================================================================

    /// All shows joined with venue and artist, ordered by (show_time, id).
    fn list_shows(&self) -> StoreResult<Vec<ShowListing>>;

    fn create_show(&self, show: &NewShow) -> StoreResult<i64>;

    // =========================================================================
    // Counts
    // =========================================================================

    fn counts(&self) -> StoreResult<DirectoryCounts>;
}
