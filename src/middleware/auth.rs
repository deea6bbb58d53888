use axum::extract::{FromRequestParts, Request, State};
use axum::http::{HeaderMap, header::AUTHORIZATION, request::Parts};
use axum::middleware::Next;
use axum::response::Response;
use std::convert::Infallible;

use crate::auth::CurrentUser;
use crate::error::DashError;
use crate::router::DashState;

/// Raw `Authorization` value. Non-UTF-8 values count as absent.
pub fn authorization(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}

/// Reject the request unless it carries a valid session; attaches [`CurrentUser`].
pub async fn require_auth(
    State(state): State<DashState>,
    mut req: Request,
    next: Next,
) -> Result<Response, DashError> {
    let header = authorization(req.headers());
    let current = state.gate.require(header.as_deref()).await?;
    req.extensions_mut().insert(current);
    Ok(next.run(req).await)
}

/// Attach [`CurrentUser`] when the request carries a valid session; never rejects.
pub async fn optional_auth(
    State(state): State<DashState>,
    mut req: Request,
    next: Next,
) -> Response {
    let header = authorization(req.headers());
    if let Some(current) = state.gate.optional(header.as_deref()).await {
        req.extensions_mut().insert(current);
    }
    next.run(req).await
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = DashError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(DashError::MissingCredential)
    }
}

/// Identity attached by [`optional_auth`], if any.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.extensions.get::<CurrentUser>().cloned()))
    }
}
