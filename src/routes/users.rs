use axum::{extract::State, response::IntoResponse};
use serde_json::json;
use uuid::Uuid;

use crate::{
    dto::auth_dto::SignupResponse,
    dto::user_dto::{UpdateRolePayload, UserResponse},
    error::Result,
    extract::{Json, Path},
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All users, newest first", body = [UserResponse]),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Not an admin")
    )
)]
#[axum::debug_handler]
pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let users: Vec<UserResponse> = state
        .user_service
        .list()
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();
    Ok(Json(users))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted"),
        (status = 404, description = "User not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.user_service.delete(id).await?;
    Ok(Json(json!({ "message": "User deleted successfully" })))
}

#[utoipa::path(
    patch,
    path = "/api/users/{id}/role",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = UpdateRolePayload,
    responses(
        (status = 200, description = "Role updated", body = SignupResponse),
        (status = 400, description = "Valid role required"),
        (status = 404, description = "User not found")
    )
)]
#[axum::debug_handler]
pub async fn update_role(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRolePayload>,
) -> Result<impl IntoResponse> {
    let user = state
        .user_service
        .update_role(id, payload.role())
        .await?;
    Ok(Json(SignupResponse::from(user)))
}
