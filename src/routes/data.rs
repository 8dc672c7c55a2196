use axum::{
    extract::State,
    response::{IntoResponse, Json},
};

use crate::{
    dto::data_dto::{ParameterCatalog, StationCatalog},
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/parameters",
    responses((status = 200, description = "Parameters, standards and legend colors"))
)]
pub async fn parameters() -> impl IntoResponse {
    Json(ParameterCatalog::build())
}

#[utoipa::path(
    get,
    path = "/api/stations",
    responses((status = 200, description = "Monitoring stations and map center"))
)]
pub async fn stations() -> impl IntoResponse {
    Json(StationCatalog::default())
}

#[utoipa::path(
    get,
    path = "/api/readings/dates",
    responses((status = 200, description = "Dates with readings, oldest first"))
)]
#[axum::debug_handler]
pub async fn dates(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.dataset.available_dates())
}
