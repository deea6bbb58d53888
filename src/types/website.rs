use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateWebsiteRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(custom(function = "super::validate_slug"))]
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub slogan: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub git_repo_owner: String,
    #[serde(default)]
    pub git_repo_name: String,
    #[serde(default)]
    pub git_repo_branch: String,
    #[serde(default)]
    pub git_api_token: String,
    #[serde(default)]
    pub config: String,
    #[validate(length(equal = 2))]
    pub language_code: String,
}

/// Every field, the repository access token included, keeps its value when absent or empty.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateWebsiteRequest {
    pub name: Option<String>,
    #[validate(custom(function = "super::validate_slug_or_empty"))]
    pub slug: Option<String>,
    pub description: Option<String>,
    pub slogan: Option<String>,
    pub domain: Option<String>,
    pub git_repo_owner: Option<String>,
    pub git_repo_name: Option<String>,
    pub git_repo_branch: Option<String>,
    pub git_api_token: Option<String>,
    pub config: Option<String>,
    #[validate(custom(function = "super::validate_language_code_or_empty"))]
    pub language_code: Option<String>,
}
