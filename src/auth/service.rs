use crate::auth::password::Hasher;
use crate::auth::session::{IssuedSession, SessionIssuer};
use crate::db::{Storage, User};
use crate::error::DashError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

/// Successful login: the user (without hash) and the one-time view of the token.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: User,
    pub session_token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct AuthService {
    storage: Storage,
    hasher: Hasher,
    sessions: SessionIssuer,
}

impl AuthService {
    pub fn new(storage: Storage, hasher: Hasher, sessions: SessionIssuer) -> Self {
        Self {
            storage,
            hasher,
            sessions,
        }
    }

    pub fn sessions(&self) -> &SessionIssuer {
        &self.sessions
    }

    /// Unknown email and wrong password fail identically.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, DashError> {
        let Some(user) = self.storage.find_user_by_email(email).await? else {
            info!("login rejected");
            return Err(DashError::InvalidCredentials);
        };
        if !self.hasher.verify(password, &user.password_hash) {
            info!("login rejected");
            return Err(DashError::InvalidCredentials);
        }

        let IssuedSession { token, expires_at } = self.sessions.issue(user.id).await?;
        info!(user_id = user.id, "user logged in");
        Ok(LoginResponse {
            user,
            session_token: token,
            expires_at,
        })
    }

    pub async fn logout(&self, token: &str) -> Result<(), DashError> {
        self.sessions.revoke(token).await
    }
}
