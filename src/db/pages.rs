use crate::db::models::{Page, PageStatus, format_ts};
use crate::db::sqlite::Storage;
use chrono::{DateTime, Utc};

const PAGE_COLUMNS: &str = "id, website_id, title, slug, description, markdown_content, tags, \
     freeze_status, status, last_status_change_at, scheduled_publish_at, created_at, updated_at";

/// Mutable column values of a page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageFields {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub markdown_content: String,
    pub tags: String,
    pub freeze_status: bool,
    pub status: PageStatus,
    pub last_status_change_at: DateTime<Utc>,
    pub scheduled_publish_at: Option<DateTime<Utc>>,
}

impl From<Page> for PageFields {
    fn from(p: Page) -> Self {
        Self {
            title: p.title,
            slug: p.slug,
            description: p.description,
            markdown_content: p.markdown_content,
            tags: p.tags,
            freeze_status: p.freeze_status,
            status: p.status,
            last_status_change_at: p.last_status_change_at,
            scheduled_publish_at: p.scheduled_publish_at,
        }
    }
}

impl Storage {
    pub async fn insert_page(
        &self,
        website_id: i64,
        fields: &PageFields,
        now: DateTime<Utc>,
    ) -> Result<Page, sqlx::Error> {
        let now = format_ts(now);
        sqlx::query_as::<_, Page>(&format!(
            r#"INSERT INTO pages (
                   website_id, title, slug, description, markdown_content, tags,
                   freeze_status, status, last_status_change_at, scheduled_publish_at,
                   created_at, updated_at
               ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
               RETURNING {PAGE_COLUMNS}"#
        ))
        .bind(website_id)
        .bind(&fields.title)
        .bind(&fields.slug)
        .bind(&fields.description)
        .bind(&fields.markdown_content)
        .bind(&fields.tags)
        .bind(if fields.freeze_status { 1 } else { 0 })
        .bind(fields.status.as_str())
        .bind(format_ts(fields.last_status_change_at))
        .bind(fields.scheduled_publish_at.map(format_ts))
        .bind(&now)
        .bind(&now)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn get_page(&self, id: i64) -> Result<Option<Page>, sqlx::Error> {
        sqlx::query_as::<_, Page>(&format!("SELECT {PAGE_COLUMNS} FROM pages WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn find_page_by_slug(&self, slug: &str) -> Result<Option<Page>, sqlx::Error> {
        sqlx::query_as::<_, Page>(&format!("SELECT {PAGE_COLUMNS} FROM pages WHERE slug = ?"))
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn list_pages(&self) -> Result<Vec<Page>, sqlx::Error> {
        sqlx::query_as::<_, Page>(&format!(
            "SELECT {PAGE_COLUMNS} FROM pages ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await
    }

    pub async fn list_pages_by_website(&self, website_id: i64) -> Result<Vec<Page>, sqlx::Error> {
        sqlx::query_as::<_, Page>(&format!(
            "SELECT {PAGE_COLUMNS} FROM pages WHERE website_id = ? ORDER BY created_at DESC, id DESC"
        ))
        .bind(website_id)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn update_page(
        &self,
        id: i64,
        fields: &PageFields,
        now: DateTime<Utc>,
    ) -> Result<Option<Page>, sqlx::Error> {
        sqlx::query_as::<_, Page>(&format!(
            r#"UPDATE pages SET
                   title = ?, slug = ?, description = ?, markdown_content = ?, tags = ?,
                   freeze_status = ?, status = ?, last_status_change_at = ?,
                   scheduled_publish_at = ?, updated_at = ?
               WHERE id = ?
               RETURNING {PAGE_COLUMNS}"#
        ))
        .bind(&fields.title)
        .bind(&fields.slug)
        .bind(&fields.description)
        .bind(&fields.markdown_content)
        .bind(&fields.tags)
        .bind(if fields.freeze_status { 1 } else { 0 })
        .bind(fields.status.as_str())
        .bind(format_ts(fields.last_status_change_at))
        .bind(fields.scheduled_publish_at.map(format_ts))
        .bind(format_ts(now))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn delete_page(&self, id: i64) -> Result<u64, sqlx::Error> {
        let res = sqlx::query("DELETE FROM pages WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }
}
