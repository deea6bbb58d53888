use crate::db::models::{Website, format_ts};
use crate::db::sqlite::Storage;
use chrono::{DateTime, Utc};

const WEBSITE_COLUMNS: &str = "id, name, slug, description, slogan, domain, \
     git_repo_owner, git_repo_name, git_repo_branch, git_api_token, config, language_code, \
     created_at, updated_at";

/// Column values of a website, without identity or timestamps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WebsiteFields {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub slogan: String,
    pub domain: String,
    pub git_repo_owner: String,
    pub git_repo_name: String,
    pub git_repo_branch: String,
    pub git_api_token: String,
    pub config: String,
    pub language_code: String,
}

impl From<Website> for WebsiteFields {
    fn from(w: Website) -> Self {
        Self {
            name: w.name,
            slug: w.slug,
            description: w.description,
            slogan: w.slogan,
            domain: w.domain,
            git_repo_owner: w.git_repo_owner,
            git_repo_name: w.git_repo_name,
            git_repo_branch: w.git_repo_branch,
            git_api_token: w.git_api_token,
            config: w.config,
            language_code: w.language_code,
        }
    }
}

impl Storage {
    pub async fn insert_website(
        &self,
        fields: &WebsiteFields,
        now: DateTime<Utc>,
    ) -> Result<Website, sqlx::Error> {
        let now = format_ts(now);
        sqlx::query_as::<_, Website>(&format!(
            r#"INSERT INTO websites (
                   name, slug, description, slogan, domain,
                   git_repo_owner, git_repo_name, git_repo_branch, git_api_token,
                   config, language_code, created_at, updated_at
               ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
               RETURNING {WEBSITE_COLUMNS}"#
        ))
        .bind(&fields.name)
        .bind(&fields.slug)
        .bind(&fields.description)
        .bind(&fields.slogan)
        .bind(&fields.domain)
        .bind(&fields.git_repo_owner)
        .bind(&fields.git_repo_name)
        .bind(&fields.git_repo_branch)
        .bind(&fields.git_api_token)
        .bind(&fields.config)
        .bind(&fields.language_code)
        .bind(&now)
        .bind(&now)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn get_website(&self, id: i64) -> Result<Option<Website>, sqlx::Error> {
        sqlx::query_as::<_, Website>(&format!(
            "SELECT {WEBSITE_COLUMNS} FROM websites WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn find_website_by_slug(&self, slug: &str) -> Result<Option<Website>, sqlx::Error> {
        sqlx::query_as::<_, Website>(&format!(
            "SELECT {WEBSITE_COLUMNS} FROM websites WHERE slug = ?"
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn list_websites(&self) -> Result<Vec<Website>, sqlx::Error> {
        sqlx::query_as::<_, Website>(&format!(
            "SELECT {WEBSITE_COLUMNS} FROM websites ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await
    }

    pub async fn update_website(
        &self,
        id: i64,
        fields: &WebsiteFields,
        now: DateTime<Utc>,
    ) -> Result<Option<Website>, sqlx::Error> {
        sqlx::query_as::<_, Website>(&format!(
            r#"UPDATE websites SET
                   name = ?, slug = ?, description = ?, slogan = ?, domain = ?,
                   git_repo_owner = ?, git_repo_name = ?, git_repo_branch = ?, git_api_token = ?,
                   config = ?, language_code = ?, updated_at = ?
               WHERE id = ?
               RETURNING {WEBSITE_COLUMNS}"#
        ))
        .bind(&fields.name)
        .bind(&fields.slug)
        .bind(&fields.description)
        .bind(&fields.slogan)
        .bind(&fields.domain)
        .bind(&fields.git_repo_owner)
        .bind(&fields.git_repo_name)
        .bind(&fields.git_repo_branch)
        .bind(&fields.git_api_token)
        .bind(&fields.config)
        .bind(&fields.language_code)
        .bind(format_ts(now))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Pages of the website go with it (`ON DELETE CASCADE`).
    pub async fn delete_website(&self, id: i64) -> Result<u64, sqlx::Error> {
        let res = sqlx::query("DELETE FROM websites WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }
}
