use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};
use validator::Validate;

use crate::error::DashError;
use crate::router::DashState;
use crate::types::{CreatePageRequest, UpdatePageRequest};

#[derive(Debug, Deserialize)]
pub struct ListPagesQuery {
    pub website_id: Option<String>,
}

/// GET /api/v1/pages[?website_id=N]
pub async fn list(
    State(state): State<DashState>,
    Query(query): Query<ListPagesQuery>,
) -> Result<Json<Value>, DashError> {
    let pages = match query.website_id.as_deref() {
        None | Some("") => state.pages.list_all().await?,
        Some(raw) => {
            let website_id: i64 = raw
                .parse()
                .map_err(|_| DashError::BadRequest("invalid website_id parameter".to_string()))?;
            state.pages.list(website_id).await?
        }
    };
    Ok(Json(json!({ "pages": pages })))
}

pub async fn get(
    State(state): State<DashState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, DashError> {
    let page = state.pages.get(id).await?;
    Ok(Json(json!({ "page": page })))
}

pub async fn get_by_slug(
    State(state): State<DashState>,
    Path(slug): Path<String>,
) -> Result<Json<Value>, DashError> {
    let page = state.pages.get_by_slug(&slug).await?;
    Ok(Json(json!({ "page": page })))
}

pub async fn create(
    State(state): State<DashState>,
    Json(req): Json<CreatePageRequest>,
) -> Result<(StatusCode, Json<Value>), DashError> {
    req.validate()?;
    let page = state.pages.create(req).await?;
    Ok((StatusCode::CREATED, Json(json!({ "page": page }))))
}

pub async fn update(
    State(state): State<DashState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdatePageRequest>,
) -> Result<Json<Value>, DashError> {
    req.validate()?;
    let page = state.pages.update(id, req).await?;
    Ok(Json(json!({ "page": page })))
}

pub async fn delete(
    State(state): State<DashState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, DashError> {
    state.pages.delete(id).await?;
    Ok(Json(json!({ "message": "Page deleted successfully" })))
}
