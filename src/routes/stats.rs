use axum::{
    extract::State,
    response::{IntoResponse, Json},
};

use crate::{
    dto::user_dto::{ReportsCount, UsersCount},
    error::Result,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/stats/users",
    responses((status = 200, description = "Registered users", body = UsersCount))
)]
#[axum::debug_handler]
pub async fn users_count(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let users_count = state.user_service.count_users().await?;
    Ok(Json(UsersCount { users_count }))
}

#[utoipa::path(
    get,
    path = "/api/stats/reports",
    responses((status = 200, description = "Exported reports", body = ReportsCount))
)]
#[axum::debug_handler]
pub async fn reports_count(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let reports_count = state.user_service.count_reports().await?;
    Ok(Json(ReportsCount { reports_count }))
}
