mod api;
mod dto;
mod state;

use crate::state::AppState;
use arret::prelude::*;
use axum::routing::get;
use std::{path::Path, sync::Arc, time::Instant};
use tracing::{error, info, warn};

const PORT: u16 = 3000;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();

    info!("Starting server...");
    let repository = match std::env::args().nth(1) {
        Some(path) => match load(Path::new(&path)) {
            Ok(repository) => Some(repository),
            Err(err) => {
                error!("Failed to load gtfs feed {path}: {err}");
                std::process::exit(1);
            }
        },
        None => {
            warn!("No gtfs feed given, waiting for /fetch");
            None
        }
    };
    let state = Arc::new(AppState::new(repository));

    let port = std::env::var("PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(PORT);

    let app = axum::Router::new()
        .route("/stops", get(api::stops))
        .route("/routes", get(api::routes))
        .route("/stops_by_route", get(api::stops_by_route))
        .route("/fetch", get(api::fetch_url))
        .with_state(state);
    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("Failed to bind port {port}: {err}");
            std::process::exit(1);
        }
    };
    info!("Listening to port {port}");
    if let Err(err) = axum::serve(listener, app).await {
        error!("Server stopped: {err}");
    }
}

/// Loads a feed from a directory or zip archive, `.txt` or `.csv` tables alike.
fn load(path: &Path) -> Result<Repository, gtfs::Error> {
    info!("Loading data...");
    let now = Instant::now();
    let config = if path.join(Config::csv().stops_file_name).is_file() {
        Config::csv()
    } else {
        Config::default()
    };
    let reader = GtfsReader::new(config).from_path(path);
    let repository = Repository::new().load_gtfs(&reader)?;
    info!(
        "Loading {} stops and {} routes took {:?}",
        repository.stops().len(),
        repository.routes().len(),
        now.elapsed()
    );
    Ok(repository)
}
