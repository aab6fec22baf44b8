//! Artist routes, nested under `/artists`.

use super::flash::settle;
use super::record_id::RecordId;
use super::state::{GuardedBookingStore, ServerState};
use super::{ApiError, Flash};
use crate::booking_store::{ArtistSummary, StoreError};
use crate::forms::{ArtistForm, SearchForm};
use crate::views::{artist_detail, search_results, ArtistDetail, SearchResults};
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::Form;
use chrono::Utc;
use tracing::info;

async fn list_artists(
    State(store): State<GuardedBookingStore>,
) -> Result<Json<Vec<ArtistSummary>>, ApiError> {
    Ok(Json(store.list_artists()?))
}

async fn search_artists(
    State(store): State<GuardedBookingStore>,
    Form(form): Form<SearchForm>,
) -> Result<Json<SearchResults>, ApiError> {
    let matches = store.search_artists(&form.search_term, Utc::now())?;
    Ok(Json(search_results(form.search_term, matches)))
}

async fn get_artist(
    State(store): State<GuardedBookingStore>,
    RecordId(id): RecordId,
) -> Result<Json<ArtistDetail>, ApiError> {
    let now = Utc::now();
    let artist = store
        .get_artist(id)?
        .ok_or(StoreError::NotFound { entity: "Artist", id })?;
    let shows = store.get_artist_shows(id)?;
    Ok(Json(artist_detail(artist, shows, now)))
}

async fn create_artist_form() -> Json<ArtistForm> {
    Json(ArtistForm::default())
}

async fn create_artist(
    State(store): State<GuardedBookingStore>,
    Form(form): Form<ArtistForm>,
) -> Result<Flash, ApiError> {
    let artist = form
        .validate()
        .map_err(|errors| ApiError::validation(&form, errors))?;

    settle(
        store.create_artist(&artist),
        |id| {
            info!("Created artist {} ({})", id, artist.name);
            Flash::success(format!("Artist {} was successfully created!", artist.name))
        },
        || Flash::error(format!("An error occurred. Artist {} could not be created.", artist.name)),
    )
}

async fn edit_artist_form(
    State(store): State<GuardedBookingStore>,
    RecordId(id): RecordId,
) -> Result<Json<ArtistForm>, ApiError> {
    let artist = store
        .get_artist(id)?
        .ok_or(StoreError::NotFound { entity: "Artist", id })?;
    Ok(Json(ArtistForm::from_artist(&artist)))
}

async fn edit_artist(
    State(store): State<GuardedBookingStore>,
    RecordId(id): RecordId,
    Form(form): Form<ArtistForm>,
) -> Result<Flash, ApiError> {
    if store.get_artist(id)?.is_none() {
        return Err(StoreError::NotFound { entity: "Artist", id }.into());
    }
    let artist = form
        .validate()
        .map_err(|errors| ApiError::validation(&form, errors))?;

    let detail_path = format!("/artists/{}", id);
    settle(
        store.update_artist(id, &artist),
        |_| {
            Flash::success(format!("Artist {} was successfully updated.", artist.name))
                .redirect_to(detail_path.clone())
        },
        || {
            Flash::error(format!("An error occurred. Artist {} could not be updated.", artist.name))
                .redirect_to(detail_path.clone())
        },
    )
}

async fn delete_artist(
    State(store): State<GuardedBookingStore>,
    RecordId(id): RecordId,
) -> Result<Flash, ApiError> {
    settle(
        store.delete_artist(id),
        |_| {
            info!("Deleted artist {}", id);
            Flash::success(format!("Artist {} was successfully deleted.", id)).redirect_to("/")
        },
        || Flash::error(format!("An error occurred. Artist {} could not be deleted.", id)).redirect_to("/"),
    )
}

pub fn make_artist_routes(state: ServerState) -> Router {
    Router::new()
        .route("/", get(list_artists))
        .route("/search", post(search_artists))
        .route("/create", get(create_artist_form).post(create_artist))
        .route("/{id}", get(get_artist).delete(delete_artist))
        .route("/{id}/edit", get(edit_artist_form).post(edit_artist))
        .with_state(state)
}
