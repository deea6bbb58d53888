use crate::db::{self, Page, PageFields, Storage};
use crate::error::DashError;
use crate::service::{apply_text, non_empty, on_unique_violation};
use crate::types::{CreatePageRequest, UpdatePageRequest};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

/// Stored in place of an empty tag list on create.
pub const EMPTY_TAGS: &str = "[]";

fn duplicate_slug(slug: String) -> DashError {
    DashError::DuplicateSlug {
        entity: "page",
        slug,
    }
}

/// Stored instants must parse back; see `db::is_storable`.
fn ensure_storable(at: Option<DateTime<Utc>>) -> Result<(), DashError> {
    match at {
        Some(ts) if !db::is_storable(&ts) => Err(DashError::BadRequest(format!(
            "scheduledPublishAt must fall within years 0000-{}",
            db::MAX_STORABLE_YEAR
        ))),
        _ => Ok(()),
    }
}

#[derive(Clone)]
pub struct PageService {
    storage: Storage,
}

impl PageService {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    pub async fn create(&self, req: CreatePageRequest) -> Result<Page, DashError> {
        self.create_at(req, db::now()).await
    }

    /// Page slugs are unique across every website, not per website.
    pub async fn create_at(
        &self,
        req: CreatePageRequest,
        now: DateTime<Utc>,
    ) -> Result<Page, DashError> {
        ensure_storable(req.scheduled_publish_at)?;
        self.ensure_website(req.website_id).await?;
        if self.storage.find_page_by_slug(&req.slug).await?.is_some() {
            return Err(duplicate_slug(req.slug));
        }

        let tags = if req.tags.is_empty() {
            EMPTY_TAGS.to_string()
        } else {
            req.tags
        };
        let fields = PageFields {
            title: req.title,
            slug: req.slug,
            description: req.description,
            markdown_content: req.markdown_content,
            tags,
            freeze_status: req.freeze_status,
            status: req.status,
            last_status_change_at: now,
            scheduled_publish_at: req.scheduled_publish_at,
        };
        let page = self
            .storage
            .insert_page(req.website_id, &fields, now)
            .await
            .map_err(|e| on_unique_violation(e, duplicate_slug(fields.slug.clone())))?;
        info!(page_id = page.id, website_id = page.website_id, slug = %page.slug, "page created");
        Ok(page)
    }

    pub async fn get(&self, id: i64) -> Result<Page, DashError> {
        self.storage
            .get_page(id)
            .await?
            .ok_or(DashError::NotFound("page"))
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Page, DashError> {
        self.storage
            .find_page_by_slug(slug)
            .await?
            .ok_or(DashError::NotFound("page"))
    }

    pub async fn list_all(&self) -> Result<Vec<Page>, DashError> {
        Ok(self.storage.list_pages().await?)
    }

    /// Pages of one website, newest first.
    pub async fn list(&self, website_id: i64) -> Result<Vec<Page>, DashError> {
        self.ensure_website(website_id).await?;
        Ok(self.storage.list_pages_by_website(website_id).await?)
    }

    pub async fn update(&self, id: i64, req: UpdatePageRequest) -> Result<Page, DashError> {
        self.update_at(id, req, db::now()).await
    }

    /// `last_status_change_at` moves to `now` only when the status value actually changes.
    pub async fn update_at(
        &self,
        id: i64,
        req: UpdatePageRequest,
        now: DateTime<Utc>,
    ) -> Result<Page, DashError> {
        ensure_storable(req.scheduled_publish_at)?;
        let mut fields = PageFields::from(self.get(id).await?);

        if let Some(slug) = non_empty(req.slug) {
            if let Some(other) = self.storage.find_page_by_slug(&slug).await?
                && other.id != id
            {
                return Err(duplicate_slug(slug));
            }
            fields.slug = slug;
        }
        apply_text(&mut fields.title, req.title);
        apply_text(&mut fields.description, req.description);
        apply_text(&mut fields.markdown_content, req.markdown_content);
        apply_text(&mut fields.tags, req.tags);
        if let Some(freeze) = req.freeze_status {
            fields.freeze_status = freeze;
        }
        if let Some(status) = req.status
            && status != fields.status
        {
            debug!(page_id = id, from = %fields.status, to = %status, "page status changed");
            fields.status = status;
            fields.last_status_change_at = now;
        }
        if let Some(at) = req.scheduled_publish_at {
            fields.scheduled_publish_at = Some(at);
        }

        self.storage
            .update_page(id, &fields, now)
            .await
            .map_err(|e| on_unique_violation(e, duplicate_slug(fields.slug.clone())))?
            .ok_or(DashError::NotFound("page"))
    }

    pub async fn delete(&self, id: i64) -> Result<(), DashError> {
        if self.storage.delete_page(id).await? == 0 {
            return Err(DashError::NotFound("page"));
        }
        info!(page_id = id, "page deleted");
        Ok(())
    }

    async fn ensure_website(&self, website_id: i64) -> Result<(), DashError> {
        match self.storage.get_website(website_id).await? {
            Some(_) => Ok(()),
            None => Err(DashError::WebsiteNotFound),
        }
    }
}
