use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::error::{Error, Result};
use crate::utils::token::Claims;
use crate::AppState;

fn bearer_claims(state: &AppState, req: &Request) -> Result<Claims> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::Unauthorized("No token provided".to_string()))?;
    let token = header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| Error::Unauthorized("Malformed authorization header".to_string()))?;
    state.auth_service.verify(token)
}

/// Any valid bearer token; the decoded [`Claims`] are added to the request
/// extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response> {
    let claims = bearer_claims(&state, &req)?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// A valid bearer token carrying the admin role.
pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response> {
    let claims = bearer_claims(&state, &req)?;
    if !claims.is_admin() {
        tracing::warn!(user_id = %claims.sub, path = %req.uri().path(), "admin route refused");
        return Err(Error::Forbidden(
            "Access denied. Admin privileges required.".to_string(),
        ));
    }
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
