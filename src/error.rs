use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum DashError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("user with email {0} already exists")]
    DuplicateEmail(String),

    #[error("{entity} with slug {slug} already exists")]
    DuplicateSlug { entity: &'static str, slug: String },

    #[error("website not found")]
    WebsiteNotFound,

    /// Login failure. Unknown email and wrong password share this variant.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("authorization header required; use 'Bearer <token>'")]
    MissingCredential,

    #[error("invalid or expired session token")]
    InvalidCredential,

    #[error("session not found or expired")]
    SessionNotFound,

    #[error("database error: {0}")]
    PersistenceFailure(#[from] SqlxError),

    #[error("password hashing failed: {0}")]
    HashingFailure(String),

    #[error("validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl DashError {
    pub fn status(&self) -> StatusCode {
        match self {
            DashError::NotFound(_) | DashError::WebsiteNotFound => StatusCode::NOT_FOUND,
            DashError::DuplicateEmail(_) | DashError::DuplicateSlug { .. } => StatusCode::CONFLICT,
            DashError::InvalidCredentials
            | DashError::MissingCredential
            | DashError::InvalidCredential
            | DashError::SessionNotFound => StatusCode::UNAUTHORIZED,
            DashError::Validation(_) | DashError::BadRequest(_) => StatusCode::BAD_REQUEST,
            DashError::PersistenceFailure(_)
            | DashError::HashingFailure(_)
            | DashError::InvalidConfig(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            DashError::NotFound(_) | DashError::WebsiteNotFound => "NOT_FOUND",
            DashError::DuplicateEmail(_) => "DUPLICATE_EMAIL",
            DashError::DuplicateSlug { .. } => "DUPLICATE_SLUG",
            DashError::InvalidCredentials => "INVALID_CREDENTIALS",
            DashError::MissingCredential => "MISSING_CREDENTIAL",
            DashError::InvalidCredential | DashError::SessionNotFound => "INVALID_CREDENTIAL",
            DashError::Validation(_) | DashError::BadRequest(_) => "BAD_REQUEST",
            DashError::PersistenceFailure(_)
            | DashError::HashingFailure(_)
            | DashError::InvalidConfig(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for DashError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = match &self {
            DashError::PersistenceFailure(_)
            | DashError::HashingFailure(_)
            | DashError::InvalidConfig(_) => {
                error!(error = %self, "request failed with internal error");
                "An internal server error occurred.".to_string()
            }
            other => other.to_string(),
        };
        let body = ApiErrorBody {
            code: self.code().to_string(),
            message,
        };
        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
