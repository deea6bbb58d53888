use axum::{Json, extract::State, http::HeaderMap};
use serde_json::{Value, json};
use tracing::info;
use validator::Validate;

use crate::auth::{CurrentUser, LoginResponse, parse_bearer};
use crate::error::DashError;
use crate::middleware::MaybeUser;
use crate::middleware::auth::authorization;
use crate::router::DashState;
use crate::types::LoginRequest;

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<DashState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, DashError> {
    req.validate()?;
    let resp = state.auth.login(&req.email, &req.password).await?;
    Ok(Json(resp))
}

/// POST /api/v1/auth/logout -> revokes the presented token whether or not it is still live.
pub async fn logout(
    State(state): State<DashState>,
    MaybeUser(current): MaybeUser,
    headers: HeaderMap,
) -> Result<Json<Value>, DashError> {
    let header = authorization(&headers);
    let token = parse_bearer(header.as_deref())?;
    state.auth.logout(token).await?;
    info!(user_id = current.map(|c| c.user_id), "logout processed");
    Ok(Json(json!({ "message": "Logged out successfully" })))
}

/// GET /api/v1/auth/me
pub async fn me(current: CurrentUser) -> Json<Value> {
    Json(json!({ "user": current.user }))
}
