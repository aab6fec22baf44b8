mod error;
mod models;
mod schema;
mod store;
mod trait_def;
mod validation;

pub use error::{StoreError, StoreResult};
pub use models::*;
pub use schema::BOOKING_VERSIONED_SCHEMAS;
pub use store::SqliteBookingStore;
pub use trait_def::BookingStore;
pub use validation::{validate_artist, validate_venue, ValidationError, ValidationResult};
