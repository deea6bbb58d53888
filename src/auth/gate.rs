use crate::auth::session::SessionIssuer;
use crate::db::{Storage, User};
use crate::error::DashError;
use tracing::debug;

pub const BEARER_SCHEME: &str = "Bearer";

/// The authenticated caller, attached to request extensions by the gate.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: i64,
    pub user: User,
}

/// Extract the token from an `Authorization` value of the exact shape `Bearer <token>`.
///
/// The value is split on single spaces; anything other than two parts with the
/// literal scheme first and a non-empty token second is malformed.
pub fn parse_bearer(header: Option<&str>) -> Result<&str, DashError> {
    let header = header.ok_or(DashError::MissingCredential)?;
    let mut parts = header.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(BEARER_SCHEME), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(DashError::MissingCredential),
    }
}

#[derive(Clone)]
pub struct AuthGate {
    sessions: SessionIssuer,
    storage: Storage,
}

impl AuthGate {
    pub fn new(sessions: SessionIssuer, storage: Storage) -> Self {
        Self { sessions, storage }
    }

    /// Required mode: a missing or malformed header is `MissingCredential`,
    /// a well-formed header whose session does not resolve is `InvalidCredential`.
    pub async fn require(&self, header: Option<&str>) -> Result<CurrentUser, DashError> {
        let token = parse_bearer(header)?;
        self.identify(token).await
    }

    /// Optional mode: every failure yields no identity.
    pub async fn optional(&self, header: Option<&str>) -> Option<CurrentUser> {
        match self.require(header).await {
            Ok(current) => Some(current),
            Err(e) => {
                debug!(reason = %e, "optional auth fell through");
                None
            }
        }
    }

    pub async fn identify(&self, token: &str) -> Result<CurrentUser, DashError> {
        let user_id = match self.sessions.validate(token).await {
            Ok(id) => id,
            Err(DashError::SessionNotFound) => return Err(DashError::InvalidCredential),
            Err(e) => return Err(e),
        };
        // the session may outlive a concurrently deleted user
        let user = self
            .storage
            .get_user(user_id)
            .await?
            .ok_or(DashError::InvalidCredential)?;
        Ok(CurrentUser { user_id, user })
    }
}
