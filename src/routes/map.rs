use axum::{
    extract::State,
    response::{IntoResponse, Json},
};

use crate::{
    dto::data_dto::{MarkersQuery, ZonesQuery},
    error::Result,
    extract::Query,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/map/markers",
    params(
        ("date" = String, Query, description = "Reading date, M/D/YYYY or YYYY-MM-DD"),
        ("parameters" = Option<String>, Query, description = "Comma-separated parameter names")
    ),
    responses(
        (status = 200, description = "Station markers for the date"),
        (status = 400, description = "Invalid date or parameter")
    )
)]
#[axum::debug_handler]
pub async fn markers(
    State(state): State<AppState>,
    Query(query): Query<MarkersQuery>,
) -> Result<impl IntoResponse> {
    let date = query.date()?;
    let parameters = query.parameters()?;
    Ok(Json(state.map_service.markers(date, &parameters)))
}

#[utoipa::path(
    get,
    path = "/api/map/zones",
    params(
        ("area_type" = Option<String>, Query, description = "agricultural or industrial"),
        ("year" = Option<i32>, Query, description = "Layer year")
    ),
    responses(
        (status = 200, description = "Zone layers joined with station readings"),
        (status = 400, description = "Unknown area type")
    )
)]
#[axum::debug_handler]
pub async fn zones(
    State(state): State<AppState>,
    Query(query): Query<ZonesQuery>,
) -> Result<impl IntoResponse> {
    let area_type = query.area_type()?;
    Ok(Json(state.map_service.zones(area_type, query.year)?))
}
