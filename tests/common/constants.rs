//! Shared constants for end-to-end tests
//!
//! Ids follow insertion order of the seeded directory; when the fixtures
//! change, update only this file and `fixtures.rs`.

#![allow(dead_code)]

// ============================================================================
// Seeded Venues
// ============================================================================

pub const VENUE_1_ID: i64 = 1;
pub const VENUE_1_NAME: &str = "The Musical Hop";

pub const VENUE_2_ID: i64 = 2;
pub const VENUE_2_NAME: &str = "The Dueling Pianos Bar";

pub const VENUE_3_ID: i64 = 3;
pub const VENUE_3_NAME: &str = "Park Square Live Music & Coffee";

// ============================================================================
// Seeded Artists
// ============================================================================

pub const ARTIST_1_ID: i64 = 1;
pub const ARTIST_1_NAME: &str = "Guns N Petals";

pub const ARTIST_2_ID: i64 = 2;
pub const ARTIST_2_NAME: &str = "Matt Quevedo";

pub const ARTIST_3_ID: i64 = 3;
pub const ARTIST_3_NAME: &str = "The Wild Sax Band";

// ============================================================================
// Seeded Shows
// ============================================================================

/// Total seeded shows: venue 1 hosts one past show, venue 3 one past and two
/// upcoming. Venue 2 has none.
pub const SEEDED_SHOWS_COUNT: usize = 4;

// ============================================================================
// Server Settings
// ============================================================================

/// Maximum time to wait for server to become ready (milliseconds)
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Default request timeout for test HTTP client (seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Polling interval when waiting for server readiness (milliseconds)
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 50;
