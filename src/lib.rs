//! Booking Server Library
//!
//! A directory of music venues and artists with the shows that link them.
//! This library exposes the internal modules for testing and reuse by the
//! `booking-server` binary.

pub mod booking_store;
pub mod config;
pub mod forms;
pub mod server;
pub mod sqlite_persistence;
pub mod views;

// Re-export commonly used types for convenience
pub use booking_store::{BookingStore, SqliteBookingStore};
pub use server::{run_server, RequestsLoggingLevel};
