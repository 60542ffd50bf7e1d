use crate::{
    dto::{RouteDto, StopDto},
    state::AppState,
};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::{collections::HashMap, sync::Arc};

pub async fn stops(State(state): State<Arc<AppState>>) -> Result<Response, StatusCode> {
    let repository = state.snapshot().await?;
    let result: Vec<_> = repository.stops().iter().map(StopDto::from).collect();
    Ok(Json(result).into_response())
}

pub async fn routes(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let stop_id = params.get("stop").ok_or(StatusCode::BAD_REQUEST)?;
    let repository = state.snapshot().await?;
    let result: Vec<_> = repository
        .routes_for_stop(stop_id)
        .iter()
        .map(RouteDto::from)
        .collect();
    Ok(Json(result).into_response())
}

pub async fn stops_by_route(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let route_id = params.get("route").ok_or(StatusCode::BAD_REQUEST)?;
    let repository = state.snapshot().await?;
    let result: Vec<_> = repository
        .stops_by_route_id(route_id)
        .into_iter()
        .map(StopDto::from)
        .collect();
    Ok(Json(result).into_response())
}
