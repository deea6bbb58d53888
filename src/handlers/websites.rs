use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::{Value, json};
use validator::Validate;

use crate::error::DashError;
use crate::router::DashState;
use crate::types::{CreateWebsiteRequest, UpdateWebsiteRequest};

pub async fn list(State(state): State<DashState>) -> Result<Json<Value>, DashError> {
    let websites = state.websites.list().await?;
    Ok(Json(json!({ "websites": websites })))
}

pub async fn get(
    State(state): State<DashState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, DashError> {
    let website = state.websites.get(id).await?;
    Ok(Json(json!({ "website": website })))
}

pub async fn get_by_slug(
    State(state): State<DashState>,
    Path(slug): Path<String>,
) -> Result<Json<Value>, DashError> {
    let website = state.websites.get_by_slug(&slug).await?;
    Ok(Json(json!({ "website": website })))
}

pub async fn create(
    State(state): State<DashState>,
    Json(req): Json<CreateWebsiteRequest>,
) -> Result<(StatusCode, Json<Value>), DashError> {
    req.validate()?;
    let website = state.websites.create(req).await?;
    Ok((StatusCode::CREATED, Json(json!({ "website": website }))))
}

pub async fn update(
    State(state): State<DashState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateWebsiteRequest>,
) -> Result<Json<Value>, DashError> {
    req.validate()?;
    let website = state.websites.update(id, req).await?;
    Ok(Json(json!({ "website": website })))
}

pub async fn delete(
    State(state): State<DashState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, DashError> {
    state.websites.delete(id).await?;
    Ok(Json(json!({ "message": "Website deleted successfully" })))
}
