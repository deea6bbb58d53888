//! Request bodies accepted by the HTTP layer, validated before any service runs.
//!
//! Update requests follow the partial-update convention: an absent field and an
//! empty string both mean "leave unchanged".

pub mod page;
pub mod user;
pub mod website;

use crate::db::is_storable;
use chrono::{DateTime, Utc};
use validator::{ValidateEmail, ValidationError};

pub use page::{CreatePageRequest, UpdatePageRequest};
pub use user::{CreateUserRequest, LoginRequest, UpdateUserRequest};
pub use website::{CreateWebsiteRequest, UpdateWebsiteRequest};

/// Slugs are URL-safe: ASCII letters, digits, `-` and `_`.
pub(crate) fn validate_slug(value: &str) -> Result<(), ValidationError> {
    let ok = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if ok {
        Ok(())
    } else {
        Err(ValidationError::new("slug"))
    }
}

pub(crate) fn validate_slug_or_empty(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }
    validate_slug(value)
}

pub(crate) fn validate_email_or_empty(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.validate_email() {
        Ok(())
    } else {
        Err(ValidationError::new("email"))
    }
}

pub(crate) fn validate_storable_instant(value: &DateTime<Utc>) -> Result<(), ValidationError> {
    if is_storable(value) {
        Ok(())
    } else {
        Err(ValidationError::new("year_out_of_range"))
    }
}

pub(crate) fn validate_language_code_or_empty(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.chars().count() == 2 {
        Ok(())
    } else {
        Err(ValidationError::new("language_code"))
    }
}
