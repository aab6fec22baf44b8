//! HTTP client for end-to-end tests
//!
//! This module provides a high-level HTTP client that wraps reqwest
//! and provides methods for all booking-server endpoints.
//!
//! When API routes or request formats change, update only this file.

#![allow(dead_code)]

use super::constants::*;
use reqwest::Response;
use std::time::Duration;

/// HTTP test client. Form bodies are urlencoded; repeated keys (e.g.
/// `genres`) are sent as given.
pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    async fn get(&self, path: &str) -> Response {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .expect("GET request failed")
    }

    async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> Response {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .form(fields)
            .send()
            .await
            .expect("POST request failed")
    }

    async fn delete(&self, path: &str) -> Response {
        self.client
            .delete(format!("{}{}", self.base_url, path))
            .send()
            .await
            .expect("DELETE request failed")
    }

    /// GET /
    pub async fn get_home(&self) -> Response {
        self.get("/").await
    }

    /// GET any path, for routing tests
    pub async fn get_path(&self, path: &str) -> Response {
        self.get(path).await
    }

    // ========================================================================
    // Venue Endpoints
    // ========================================================================

    /// GET /venues
    pub async fn get_venues(&self) -> Response {
        self.get("/venues").await
    }

    /// POST /venues/search
    pub async fn search_venues(&self, term: &str) -> Response {
        self.post_form("/venues/search", &[("search_term", term)])
            .await
    }

    /// GET /venues/{id}
    pub async fn get_venue(&self, id: i64) -> Response {
        self.get(&format!("/venues/{}", id)).await
    }

    /// GET /venues/create
    pub async fn get_create_venue_form(&self) -> Response {
        self.get("/venues/create").await
    }

    /// POST /venues/create
    pub async fn create_venue(&self, fields: &[(&str, &str)]) -> Response {
        self.post_form("/venues/create", fields).await
    }

    /// GET /venues/{id}/edit
    pub async fn get_edit_venue_form(&self, id: i64) -> Response {
        self.get(&format!("/venues/{}/edit", id)).await
    }

    /// POST /venues/{id}/edit
    pub async fn edit_venue(&self, id: i64, fields: &[(&str, &str)]) -> Response {
        self.post_form(&format!("/venues/{}/edit", id), fields)
            .await
    }

    /// DELETE /venues/{id}
    pub async fn delete_venue(&self, id: i64) -> Response {
        self.delete(&format!("/venues/{}", id)).await
    }

    // ========================================================================
    // Artist Endpoints
    // ========================================================================

    /// GET /artists
    pub async fn get_artists(&self) -> Response {
        self.get("/artists").await
    }

    /// POST /artists/search
    pub async fn search_artists(&self, term: &str) -> Response {
        self.post_form("/artists/search", &[("search_term", term)])
            .await
    }

    /// GET /artists/{id}
    pub async fn get_artist(&self, id: i64) -> Response {
        self.get(&format!("/artists/{}", id)).await
    }

    /// POST /artists/create
    pub async fn create_artist(&self, fields: &[(&str, &str)]) -> Response {
        self.post_form("/artists/create", fields).await
    }

    /// GET /artists/{id}/edit
    pub async fn get_edit_artist_form(&self, id: i64) -> Response {
        self.get(&format!("/artists/{}/edit", id)).await
    }

    /// POST /artists/{id}/edit
    pub async fn edit_artist(&self, id: i64, fields: &[(&str, &str)]) -> Response {
        self.post_form(&format!("/artists/{}/edit", id), fields)
            .await
    }

    /// DELETE /artists/{id}
    pub async fn delete_artist(&self, id: i64) -> Response {
        self.delete(&format!("/artists/{}", id)).await
    }

    // ========================================================================
    // Show Endpoints
    // ========================================================================

    /// GET /shows
    pub async fn get_shows(&self) -> Response {
        self.get("/shows").await
    }

    /// GET /shows/create
    pub async fn get_create_show_form(&self) -> Response {
        self.get("/shows/create").await
    }

    /// POST /shows/create
    pub async fn create_show(&self, venue_id: i64, artist_id: i64, start_time: &str) -> Response {
        let venue_id = venue_id.to_string();
        let artist_id = artist_id.to_string();
        self.post_form(
            "/shows/create",
            &[
                ("venue_id", venue_id.as_str()),
                ("artist_id", artist_id.as_str()),
                ("start_time", start_time),
            ],
        )
        .await
    }
}
