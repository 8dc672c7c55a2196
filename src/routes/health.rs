use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::{error::Result, AppState};

#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Database reachable"),
        (status = 500, description = "Database unreachable")
    )
)]
#[axum::debug_handler]
pub async fn health(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let time = state.store.now().await?;
    let body = json!({
        "status": "ok",
        "time": time,
    });
    Ok((StatusCode::OK, Json(body)))
}
