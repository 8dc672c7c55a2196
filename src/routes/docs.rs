use axum::response::{IntoResponse, Json};
use utoipa::OpenApi;

use crate::dto::auth_dto::{
    LoginPayload, LoginResponse, SessionUser, SignupPayload, SignupResponse,
};
use crate::dto::user_dto::{ReportsCount, UpdateRolePayload, UserResponse, UsersCount};
use crate::models::user::Role;
use crate::utils::token::Claims;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "LaWatch API",
        description = "Laguna de Bay contamination monitoring: accounts, map layers and reports"
    ),
    paths(
        crate::routes::health::health,
        crate::routes::auth::signup,
        crate::routes::auth::login,
        crate::routes::auth::protected,
        crate::routes::users::list_users,
        crate::routes::users::delete_user,
        crate::routes::users::update_role,
        crate::routes::stats::users_count,
        crate::routes::stats::reports_count,
        crate::routes::data::parameters,
        crate::routes::data::stations,
        crate::routes::data::dates,
        crate::routes::map::markers,
        crate::routes::map::zones,
        crate::routes::reports::report,
        crate::routes::reports::export_csv,
        crate::routes::reports::export_xlsx,
    ),
    components(schemas(
        SignupPayload,
        SignupResponse,
        LoginPayload,
        LoginResponse,
        SessionUser,
        UserResponse,
        UpdateRolePayload,
        UsersCount,
        ReportsCount,
        Claims,
        Role,
    ))
)]
pub struct ApiDoc;

pub async fn openapi() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
