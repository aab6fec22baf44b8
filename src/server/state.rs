use axum::extract::FromRef;

use crate::booking_store::BookingStore;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedBookingStore = Arc<dyn BookingStore>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub booking_store: GuardedBookingStore,
    pub hash: String,
}

impl ServerState {
    pub fn new(config: ServerConfig, booking_store: GuardedBookingStore) -> Self {
        ServerState {
            config,
            start_time: Instant::now(),
            booking_store,
            hash: env!("GIT_HASH").to_string(),
        }
    }
}

impl FromRef<ServerState> for GuardedBookingStore {
    fn from_ref(input: &ServerState) -> Self {
        input.booking_store.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
