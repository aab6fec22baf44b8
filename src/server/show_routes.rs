//! Show routes, nested under `/shows`.

use super::flash::settle;
use super::state::{GuardedBookingStore, ServerState};
use super::{ApiError, Flash};
use crate::forms::ShowForm;
use crate::views::{show_listing, ShowListItem};
use axum::{extract::State, routing::get, Json, Router};
use axum_extra::extract::Form;
use chrono::Utc;
use tracing::info;

async fn list_shows(
    State(store): State<GuardedBookingStore>,
) -> Result<Json<Vec<ShowListItem>>, ApiError> {
    Ok(Json(show_listing(store.list_shows()?)))
}

async fn create_show_form() -> Json<ShowForm> {
    Json(ShowForm::starting_at(Utc::now()))
}

async fn create_show(
    State(store): State<GuardedBookingStore>,
    Form(form): Form<ShowForm>,
) -> Result<Flash, ApiError> {
    let show = form
        .validate()
        .map_err(|errors| ApiError::validation(&form, errors))?;

    settle(
        store.create_show(&show),
        |id| {
            info!(
                "Created show {} (venue {}, artist {})",
                id, show.venue_id, show.artist_id
            );
            Flash::success("Show was successfully created!")
        },
        || Flash::error("An error occurred. Show could not be listed."),
    )
}

pub fn make_show_routes(state: ServerState) -> Router {
    Router::new()
        .route("/", get(list_shows))
        .route("/create", get(create_show_form).post(create_show))
        .with_state(state)
}
