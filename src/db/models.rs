use chrono::{DateTime, Datelike, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};
use std::fmt;
use std::str::FromStr;

/// Current wall-clock instant at the precision the store keeps.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Latest year the text column can round-trip; RFC 3339 has four-digit years.
pub const MAX_STORABLE_YEAR: i32 = 9999;

/// Whether `ts` survives `format_ts` followed by `parse_ts`.
pub fn is_storable(ts: &DateTime<Utc>) -> bool {
    (0..=MAX_STORABLE_YEAR).contains(&ts.year())
}

pub(crate) fn format_ts(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_ts(raw: &str) -> Result<DateTime<Utc>, sqlx::Error> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| sqlx::Error::Decode(Box::new(e)))
}

fn ts_column(row: &SqliteRow, column: &str) -> Result<DateTime<Utc>, sqlx::Error> {
    let raw: String = row.try_get(column)?;
    parse_ts(&raw)
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, SqliteRow> for User {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(User {
            id: row.try_get("id")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            name: row.try_get("name")?,
            created_at: ts_column(row, "created_at")?,
            updated_at: ts_column(row, "updated_at")?,
        })
    }
}

/// A login session. The token is a bearer secret and is never serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub id: i64,
    pub user_id: i64,
    pub session_token: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

impl<'r> FromRow<'r, SqliteRow> for Session {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Session {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            session_token: row.try_get("session_token")?,
            expires_at: ts_column(row, "expires_at")?,
            created_at: ts_column(row, "created_at")?,
        })
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Website {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub slogan: String,
    pub domain: String,
    pub git_repo_owner: String,
    pub git_repo_name: String,
    pub git_repo_branch: String,
    #[serde(skip_serializing)]
    pub git_api_token: String,
    pub config: String,
    pub language_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, SqliteRow> for Website {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Website {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            slug: row.try_get("slug")?,
            description: row.try_get("description")?,
            slogan: row.try_get("slogan")?,
            domain: row.try_get("domain")?,
            git_repo_owner: row.try_get("git_repo_owner")?,
            git_repo_name: row.try_get("git_repo_name")?,
            git_repo_branch: row.try_get("git_repo_branch")?,
            git_api_token: row.try_get("git_api_token")?,
            config: row.try_get("config")?,
            language_code: row.try_get("language_code")?,
            created_at: ts_column(row, "created_at")?,
            updated_at: ts_column(row, "updated_at")?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageStatus {
    Draft,
    Translating,
    Translated,
    Ignored,
    Published,
}

impl PageStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PageStatus::Draft => "draft",
            PageStatus::Translating => "translating",
            PageStatus::Translated => "translated",
            PageStatus::Ignored => "ignored",
            PageStatus::Published => "published",
        }
    }
}

impl fmt::Display for PageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(PageStatus::Draft),
            "translating" => Ok(PageStatus::Translating),
            "translated" => Ok(PageStatus::Translated),
            "ignored" => Ok(PageStatus::Ignored),
            "published" => Ok(PageStatus::Published),
            other => Err(format!(
                "unknown page status `{other}`; expected one of draft, translating, translated, ignored, published"
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: i64,
    pub website_id: i64,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub markdown_content: String,
    pub tags: String,
    pub freeze_status: bool,
    pub status: PageStatus,
    pub last_status_change_at: DateTime<Utc>,
    pub scheduled_publish_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, SqliteRow> for Page {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let status_raw: String = row.try_get("status")?;
        let status = status_raw
            .parse::<PageStatus>()
            .map_err(|e| sqlx::Error::Decode(e.into()))?;
        let freeze_i: i64 = row.try_get("freeze_status")?;
        let scheduled_raw: Option<String> = row.try_get("scheduled_publish_at")?;
        let scheduled_publish_at = scheduled_raw.as_deref().map(parse_ts).transpose()?;

        Ok(Page {
            id: row.try_get("id")?,
            website_id: row.try_get("website_id")?,
            title: row.try_get("title")?,
            slug: row.try_get("slug")?,
            description: row.try_get("description")?,
            markdown_content: row.try_get("markdown_content")?,
            tags: row.try_get("tags")?,
            freeze_status: freeze_i != 0,
            status,
            last_status_change_at: ts_column(row, "last_status_change_at")?,
            scheduled_publish_at,
            created_at: ts_column(row, "created_at")?,
            updated_at: ts_column(row, "updated_at")?,
        })
    }
}
