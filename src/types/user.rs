use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
    #[validate(length(min = 1))]
    pub name: String,
}

/// Password is not updatable through this request.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(default)]
    #[validate(custom(function = "super::validate_email_or_empty"))]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_requires_a_real_email_and_password() {
        let req = CreateUserRequest {
            email: "nope".into(),
            password: "123".into(),
            name: "N".into(),
        };
        let errs = req.validate().unwrap_err();
        let fields = errs.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn update_accepts_empty_fields() {
        let req: UpdateUserRequest = serde_json::from_str(r#"{"email":"","name":""}"#).unwrap();
        assert!(req.validate().is_ok());
        let req: UpdateUserRequest = serde_json::from_str("{}").unwrap();
        assert!(req.email.is_none());
    }
}
