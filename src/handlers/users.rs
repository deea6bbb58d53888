use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::{Value, json};
use validator::Validate;

use crate::error::DashError;
use crate::router::DashState;
use crate::types::{CreateUserRequest, UpdateUserRequest};

pub async fn list(State(state): State<DashState>) -> Result<Json<Value>, DashError> {
    let users = state.users.list().await?;
    Ok(Json(json!({ "users": users })))
}

pub async fn get(
    State(state): State<DashState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, DashError> {
    let user = state.users.get(id).await?;
    Ok(Json(json!({ "user": user })))
}

pub async fn create(
    State(state): State<DashState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<Value>), DashError> {
    req.validate()?;
    let user = state.users.create(req).await?;
    Ok((StatusCode::CREATED, Json(json!({ "user": user }))))
}

pub async fn update(
    State(state): State<DashState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<Value>, DashError> {
    req.validate()?;
    let user = state.users.update(id, req).await?;
    Ok(Json(json!({ "user": user })))
}

pub async fn delete(
    State(state): State<DashState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, DashError> {
    state.users.delete(id).await?;
    Ok(Json(json!({ "message": "User deleted successfully" })))
}
