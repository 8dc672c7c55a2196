use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension};
use serde_json::json;

use crate::{
    dto::auth_dto::{LoginPayload, LoginResponse, SignupPayload, SignupResponse},
    error::Result,
    extract::Json,
    utils::token::Claims,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/signup",
    request_body = SignupPayload,
    responses(
        (status = 201, description = "User created", body = SignupResponse),
        (status = 400, description = "Missing fields or malformed email"),
        (status = 403, description = "Invalid passkey"),
        (status = 409, description = "Username or email already exists")
    )
)]
#[axum::debug_handler]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupPayload>,
) -> Result<impl IntoResponse> {
    let user = state.auth_service.signup(payload).await?;
    Ok((StatusCode::CREATED, Json(SignupResponse::from(user))))
}

#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Signed in", body = LoginResponse),
        (status = 400, description = "Missing username or password"),
        (status = 401, description = "Invalid credentials")
    )
)]
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse> {
    let (token, user) = state.auth_service.login(payload).await?;
    Ok(Json(LoginResponse::new(token, user)))
}

#[utoipa::path(
    get,
    path = "/api/protected",
    responses(
        (status = 200, description = "Token is valid", body = Claims),
        (status = 401, description = "Missing or invalid token")
    )
)]
#[axum::debug_handler]
pub async fn protected(Extension(claims): Extension<Claims>) -> impl IntoResponse {
    Json(json!({ "msg": "secret", "user": claims }))
}
