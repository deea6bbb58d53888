use crate::db::{self, Storage, Website, WebsiteFields};
use crate::error::DashError;
use crate::service::{apply_text, non_empty, on_unique_violation};
use crate::types::{CreateWebsiteRequest, UpdateWebsiteRequest};
use tracing::info;

fn duplicate_slug(slug: String) -> DashError {
    DashError::DuplicateSlug {
        entity: "website",
        slug,
    }
}

#[derive(Clone)]
pub struct WebsiteService {
    storage: Storage,
}

impl WebsiteService {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Only the slug must be unique; names may repeat.
    pub async fn create(&self, req: CreateWebsiteRequest) -> Result<Website, DashError> {
        if self.storage.find_website_by_slug(&req.slug).await?.is_some() {
            return Err(duplicate_slug(req.slug));
        }
        let fields = WebsiteFields {
            name: req.name,
            slug: req.slug,
            description: req.description,
            slogan: req.slogan,
            domain: req.domain,
            git_repo_owner: req.git_repo_owner,
            git_repo_name: req.git_repo_name,
            git_repo_branch: req.git_repo_branch,
            git_api_token: req.git_api_token,
            config: req.config,
            language_code: req.language_code,
        };
        let website = self
            .storage
            .insert_website(&fields, db::now())
            .await
            .map_err(|e| on_unique_violation(e, duplicate_slug(fields.slug.clone())))?;
        info!(website_id = website.id, slug = %website.slug, "website created");
        Ok(website)
    }

    pub async fn get(&self, id: i64) -> Result<Website, DashError> {
        self.storage
            .get_website(id)
            .await?
            .ok_or(DashError::NotFound("website"))
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Website, DashError> {
        self.storage
            .find_website_by_slug(slug)
            .await?
            .ok_or(DashError::NotFound("website"))
    }

    pub async fn list(&self) -> Result<Vec<Website>, DashError> {
        Ok(self.storage.list_websites().await?)
    }

    pub async fn update(&self, id: i64, req: UpdateWebsiteRequest) -> Result<Website, DashError> {
        let mut fields = WebsiteFields::from(self.get(id).await?);

        if let Some(slug) = non_empty(req.slug) {
            if let Some(other) = self.storage.find_website_by_slug(&slug).await?
                && other.id != id
            {
                return Err(duplicate_slug(slug));
            }
            fields.slug = slug;
        }
        apply_text(&mut fields.name, req.name);
        apply_text(&mut fields.description, req.description);
        apply_text(&mut fields.slogan, req.slogan);
        apply_text(&mut fields.domain, req.domain);
        apply_text(&mut fields.git_repo_owner, req.git_repo_owner);
        apply_text(&mut fields.git_repo_name, req.git_repo_name);
        apply_text(&mut fields.git_repo_branch, req.git_repo_branch);
        apply_text(&mut fields.git_api_token, req.git_api_token);
        apply_text(&mut fields.config, req.config);
        apply_text(&mut fields.language_code, req.language_code);

        self.storage
            .update_website(id, &fields, db::now())
            .await
            .map_err(|e| on_unique_violation(e, duplicate_slug(fields.slug.clone())))?
            .ok_or(DashError::NotFound("website"))
    }

    /// Deleting a website deletes its pages.
    pub async fn delete(&self, id: i64) -> Result<(), DashError> {
        if self.storage.delete_website(id).await? == 0 {
            return Err(DashError::NotFound("website"));
        }
        info!(website_id = id, "website deleted");
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn website_request(slug: &str) -> CreateWebsiteRequest {
    CreateWebsiteRequest {
        name: "Acme Docs".into(),
        slug: slug.into(),
        description: "Documentation".into(),
        slogan: "Docs that ship".into(),
        domain: "docs.acme.test".into(),
        git_repo_owner: "acme".into(),
        git_repo_name: "docs".into(),
        git_repo_branch: "main".into(),
        git_api_token: "ghp_secret".into(),
        config: "{}".into(),
        language_code: "en".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::memory_storage;

    async fn service() -> WebsiteService {
        WebsiteService::new(memory_storage().await)
    }

    #[tokio::test]
    async fn slug_is_unique_but_name_is_not() {
        let websites = service().await;
        websites.create(website_request("acme")).await.unwrap();
        // same name, different slug
        websites.create(website_request("acme-2")).await.unwrap();
        assert!(matches!(
            websites.create(website_request("acme")).await,
            Err(DashError::DuplicateSlug { entity: "website", .. })
        ));
    }

    #[tokio::test]
    async fn empty_update_changes_nothing() {
        let websites = service().await;
        let created = websites.create(website_request("acme")).await.unwrap();
        let req = UpdateWebsiteRequest {
            name: Some(String::new()),
            slug: Some(String::new()),
            git_api_token: Some(String::new()),
            ..Default::default()
        };
        let updated = websites.update(created.id, req).await.unwrap();
        assert_eq!(WebsiteFields::from(updated), WebsiteFields::from(created));
    }

    #[tokio::test]
    async fn update_replaces_token_and_rechecks_slug() {
        let websites = service().await;
        let a = websites.create(website_request("a")).await.unwrap();
        websites.create(website_request("b")).await.unwrap();

        let updated = websites
            .update(
                a.id,
                UpdateWebsiteRequest {
                    git_api_token: Some("ghp_rotated".into()),
                    slug: Some("a".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.git_api_token, "ghp_rotated");
        assert_eq!(updated.slug, "a");

        assert!(matches!(
            websites
                .update(
                    a.id,
                    UpdateWebsiteRequest {
                        slug: Some("b".into()),
                        ..Default::default()
                    },
                )
                .await,
            Err(DashError::DuplicateSlug { .. })
        ));
    }

    #[tokio::test]
    async fn lookups_and_delete() {
        let websites = service().await;
        let w = websites.create(website_request("acme")).await.unwrap();
        assert_eq!(websites.get_by_slug("acme").await.unwrap().id, w.id);
        assert!(!serde_json::to_string(&w).unwrap().contains("ghp_secret"));

        websites.delete(w.id).await.unwrap();
        assert!(matches!(websites.get(w.id).await, Err(DashError::NotFound("website"))));
        assert!(matches!(websites.delete(w.id).await, Err(DashError::NotFound("website"))));
    }
}
