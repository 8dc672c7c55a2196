pub mod auth;
pub mod data;
pub mod docs;
pub mod health;
pub mod map;
pub mod reports;
pub mod stats;
pub mod users;

use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::{compression::CompressionLayer, services::ServeDir, trace::TraceLayer};

use crate::middleware::{
    auth::{require_admin, require_auth},
    cors::cors_layer,
    rate_limit::{rps_middleware, RateLimiter},
};
use crate::AppState;

const MAX_BODY_BYTES: usize = 1024 * 1024;

/// The full HTTP surface: JSON API under `/api`, dataset files under `/data`.
pub fn router(state: AppState) -> Router {
    let config = state.config.clone();

    let auth_api = Router::new()
        .route("/api/signup", post(auth::signup))
        .route("/api/login", post(auth::login))
        .layer(from_fn_with_state(
            RateLimiter::new(config.auth_rps),
            rps_middleware,
        ));

    let admin_api = Router::new()
        .route("/api/users", get(users::list_users))
        .route("/api/users/:id", delete(users::delete_user))
        .route("/api/users/:id/role", patch(users::update_role))
        .route_layer(from_fn_with_state(state.clone(), require_admin));

    let member_api = Router::new()
        .route("/api/protected", get(auth::protected))
        .route("/api/reports/export.csv", get(reports::export_csv))
        .route("/api/reports/export.xlsx", get(reports::export_xlsx))
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    let public_api = Router::new()
        .route("/api/health", get(health::health))
        .route("/api/stats/users", get(stats::users_count))
        .route("/api/stats/reports", get(stats::reports_count))
        .route("/api/parameters", get(data::parameters))
        .route("/api/stations", get(data::stations))
        .route("/api/readings/dates", get(data::dates))
        .route("/api/map/markers", get(map::markers))
        .route("/api/map/zones", get(map::zones))
        .route("/api/reports", get(reports::report))
        .route("/api/openapi.json", get(docs::openapi));

    Router::new()
        .merge(auth_api)
        .merge(admin_api)
        .merge(member_api)
        .merge(public_api)
        .nest_service("/data", ServeDir::new(&config.data_dir))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(cors_layer(config.cors_origins()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
