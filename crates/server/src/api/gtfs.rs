use crate::state::AppState;
use arret::prelude::*;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use reqwest::header::ACCEPT_ENCODING;
use std::{collections::HashMap, sync::Arc, time::Instant};
use tracing::{error, info};

/// Downloads the four tables found under the base url `q` and swaps in a new snapshot.
/// The current snapshot stays in place unless all four are fetched and read.
pub async fn fetch_url(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let Some(base) = params.get("q") else {
        return Err(StatusCode::BAD_REQUEST);
    };
    let config = match params.get("format").map(String::as_str) {
        Some("txt") => Config::default(),
        _ => Config::csv(),
    };

    let now = Instant::now();
    let client = reqwest::Client::new();
    let (stops, stop_times, trips, routes) = tokio::try_join!(
        fetch_table(&client, base, &config, GtfsTable::Stops),
        fetch_table(&client, base, &config, GtfsTable::StopTimes),
        fetch_table(&client, base, &config, GtfsTable::Trips),
        fetch_table(&client, base, &config, GtfsTable::Routes),
    )?;

    let repository = tokio::task::spawn_blocking(move || -> Result<Repository, gtfs::Error> {
        let data: GtfsData = [stops, stop_times, trips, routes]
            .into_iter()
            .map(|(table, body)| {
                gtfs::read_records(body.as_slice(), table).map(|records| (table, records))
            })
            .collect::<Result<Vec<_>, gtfs::Error>>()?
            .into();
        Ok(Repository::new().with_data(&data))
    })
    .await
    .map_err(|err| {
        error!("Failed to join loading task: {err}");
        StatusCode::INTERNAL_SERVER_ERROR
    })?
    .map_err(|err| {
        error!("Failed to read gtfs tables: {err}");
        StatusCode::BAD_GATEWAY
    })?;

    info!(
        "Loaded {} stops and {} routes from {base} in {:?}",
        repository.stops().len(),
        repository.routes().len(),
        now.elapsed()
    );
    state.replace(repository).await;
    Ok(().into_response())
}

async fn fetch_table(
    client: &reqwest::Client,
    base: &str,
    config: &Config,
    table: GtfsTable,
) -> Result<(GtfsTable, Vec<u8>), StatusCode> {
    let url = format!("{}/{}", base.trim_end_matches('/'), config.file_name(table));
    let response = client
        .get(&url)
        .header(ACCEPT_ENCODING, "gzip, deflate")
        .send()
        .await
        .map_err(|err| {
            error!("Failed to fetch {url}: {err}");
            StatusCode::BAD_GATEWAY
        })?;

    if !response.status().is_success() {
        error!("Fetching {url} returned {}", response.status());
        return Err(StatusCode::BAD_GATEWAY);
    }

    let body = response.bytes().await.map_err(|err| {
        error!("Failed to read body of {url}: {err}");
        StatusCode::BAD_GATEWAY
    })?;
    Ok((table, body.to_vec()))
}
