//! Venue routes, nested under `/venues`.

use super::flash::settle;
use super::record_id::RecordId;
use super::state::{GuardedBookingStore, ServerState};
use super::{ApiError, Flash};
use crate::booking_store::StoreError;
use crate::forms::{SearchForm, VenueForm};
use crate::views::{
    group_venues_by_area, search_results, venue_detail, AreaGroup, SearchResults, VenueDetail,
};
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::Form;
use chrono::Utc;
use tracing::info;

async fn list_venues(
    State(store): State<GuardedBookingStore>,
) -> Result<Json<Vec<AreaGroup>>, ApiError> {
    let venues = store.venues_with_upcoming_counts(Utc::now())?;
    Ok(Json(group_venues_by_area(venues)))
}

async fn search_venues(
    State(store): State<GuardedBookingStore>,
    Form(form): Form<SearchForm>,
) -> Result<Json<SearchResults>, ApiError> {
    let matches = store.search_venues(&form.search_term, Utc::now())?;
    Ok(Json(search_results(form.search_term, matches)))
}

async fn get_venue(
    State(store): State<GuardedBookingStore>,
    RecordId(id): RecordId,
) -> Result<Json<VenueDetail>, ApiError> {
    let now = Utc::now();
    let venue = store
        .get_venue(id)?
        .ok_or(StoreError::NotFound { entity: "Venue", id })?;
    let shows = store.get_venue_shows(id)?;
    Ok(Json(venue_detail(venue, shows, now)))
}

async fn create_venue_form() -> Json<VenueForm> {
    Json(VenueForm::default())
}

async fn create_venue(
    State(store): State<GuardedBookingStore>,
    Form(form): Form<VenueForm>,
) -> Result<Flash, ApiError> {
    let venue = form
        .validate()
        .map_err(|errors| ApiError::validation(&form, errors))?;

    settle(
        store.create_venue(&venue),
        |id| {
            info!("Listed venue {} ({})", id, venue.name);
            Flash::success(format!("Venue {} was successfully listed!", venue.name))
        },
        || Flash::error(format!("An error occurred. Venue {} could not be listed.", venue.name)),
    )
}

async fn edit_venue_form(
    State(store): State<GuardedBookingStore>,
    RecordId(id): RecordId,
) -> Result<Json<VenueForm>, ApiError> {
    let venue = store
        .get_venue(id)?
        .ok_or(StoreError::NotFound { entity: "Venue", id })?;
    Ok(Json(VenueForm::from_venue(&venue)))
}

async fn edit_venue(
    State(store): State<GuardedBookingStore>,
    RecordId(id): RecordId,
    Form(form): Form<VenueForm>,
) -> Result<Flash, ApiError> {
    if store.get_venue(id)?.is_none() {
        return Err(StoreError::NotFound { entity: "Venue", id }.into());
    }
    let venue = form
        .validate()
        .map_err(|errors| ApiError::validation(&form, errors))?;

    let detail_path = format!("/venues/{}", id);
    settle(
        store.update_venue(id, &venue),
        |_| {
            Flash::success(format!("Venue {} was successfully updated.", venue.name))
                .redirect_to(detail_path.clone())
        },
        || {
            Flash::error(format!("An error occurred. Venue {} could not be updated.", venue.name))
                .redirect_to(detail_path.clone())
        },
    )
}

async fn delete_venue(
    State(store): State<GuardedBookingStore>,
    RecordId(id): RecordId,
) -> Result<Flash, ApiError> {
    settle(
        store.delete_venue(id),
        |_| {
            info!("Deleted venue {}", id);
            Flash::success(format!("Venue {} was successfully deleted.", id)).redirect_to("/")
        },
        || Flash::error(format!("An error occurred. Venue {} could not be deleted.", id)).redirect_to("/"),
    )
}

pub fn make_venue_routes(state: ServerState) -> Router {
    Router::new()
        .route("/", get(list_venues))
        .route("/search", post(search_venues))
        .route("/create", get(create_venue_form).post(create_venue))
        .route("/{id}", get(get_venue).delete(delete_venue))
        .route("/{id}/edit", get(edit_venue_form).post(edit_venue))
        .with_state(state)
}
