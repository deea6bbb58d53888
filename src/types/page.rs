use crate::db::PageStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePageRequest {
    pub website_id: i64,
    #[serde(default)]
    pub title: String,
    #[validate(custom(function = "super::validate_slug"))]
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub markdown_content: String,
    /// Empty becomes `"[]"` on create.
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub freeze_status: bool,
    pub status: PageStatus,
    #[serde(default)]
    #[validate(custom(function = "super::validate_storable_instant"))]
    pub scheduled_publish_at: Option<DateTime<Utc>>,
}

impl CreatePageRequest {
    pub fn new(website_id: i64, slug: impl Into<String>, status: PageStatus) -> Self {
        Self {
            website_id,
            title: String::new(),
            slug: slug.into(),
            description: String::new(),
            markdown_content: String::new(),
            tags: String::new(),
            freeze_status: false,
            status,
            scheduled_publish_at: None,
        }
    }
}

/// `freezeStatus` and `scheduledPublishAt` are true optionals; the text fields
/// and `status` treat an empty string like an absent field.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdatePageRequest {
    pub title: Option<String>,
    #[validate(custom(function = "super::validate_slug_or_empty"))]
    pub slug: Option<String>,
    pub description: Option<String>,
    pub markdown_content: Option<String>,
    pub tags: Option<String>,
    pub freeze_status: Option<bool>,
    #[serde(deserialize_with = "status_or_unchanged")]
    pub status: Option<PageStatus>,
    #[validate(custom(function = "super::validate_storable_instant"))]
    pub scheduled_publish_at: Option<DateTime<Utc>>,
}

fn status_or_unchanged<'de, D>(deserializer: D) -> Result<Option<PageStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}
