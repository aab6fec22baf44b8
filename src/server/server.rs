use anyhow::{Context, Result};
use std::time::Duration;

use tracing::{error, info};

use tower_http::services::ServeDir;

use axum::{extract::State, http::Uri, middleware, routing::get, Json, Router};
use serde::Serialize;

use super::artist_routes::make_artist_routes;
use super::show_routes::make_show_routes;
use super::venue_routes::make_venue_routes;
use super::{log_requests, state::*, ApiError, ServerConfig};

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub hash: String,
    pub venues_count: usize,
    pub artists_count: usize,
    pub shows_count: usize,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> Result<Json<ServerStats>, ApiError> {
    let counts = state.booking_store.counts()?;
    Ok(Json(ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        hash: state.hash.clone(),
        venues_count: counts.venues,
        artists_count: counts.artists,
        shows_count: counts.shows,
    }))
}

async fn route_not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}

pub fn make_app(config: ServerConfig, booking_store: GuardedBookingStore) -> Result<Router> {
    let state = ServerState::new(config.clone(), booking_store);

    let home_router: Router = match config.frontend_dir_path {
        Some(frontend_path) => {
            let static_files_service =
                ServeDir::new(frontend_path).append_index_html_on_directories(true);
            Router::new().fallback_service(static_files_service)
        }
        None => Router::new()
            .route("/", get(home))
            .fallback(route_not_found)
            .with_state(state.clone()),
    };

    let mut app: Router = home_router
        .nest("/venues", make_venue_routes(state.clone()))
        .nest("/artists", make_artist_routes(state.clone()))
        .nest("/shows", make_show_routes(state.clone()));

    app = app.layer(middleware::from_fn_with_state(state.clone(), log_requests));

    Ok(app)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

pub async fn run_server(config: ServerConfig, booking_store: GuardedBookingStore) -> Result<()> {
    let address = format!("{}:{}", config.bind_address, config.port);
    let app = make_app(config, booking_store)?;

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("Listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
