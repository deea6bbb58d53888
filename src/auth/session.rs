use crate::db::{self, Storage};
use crate::db::sqlite::is_foreign_key_violation;
use crate::error::DashError;
use chrono::{DateTime, Duration, Utc};
use rand::{RngCore, rngs::OsRng};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Random bytes per token; hex-encoded to 64 characters.
pub const TOKEN_BYTES: usize = 32;

/// A freshly issued bearer token. This is the only place the token is handed out.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Issues, validates and revokes opaque session tokens with a fixed lifetime.
#[derive(Clone)]
pub struct SessionIssuer {
    storage: Storage,
    ttl: Duration,
}

impl SessionIssuer {
    pub fn new(storage: Storage, ttl: Duration) -> Self {
        Self { storage, ttl }
    }

    pub async fn issue(&self, user_id: i64) -> Result<IssuedSession, DashError> {
        self.issue_at(user_id, db::now()).await
    }

    pub async fn issue_at(
        &self,
        user_id: i64,
        now: DateTime<Utc>,
    ) -> Result<IssuedSession, DashError> {
        let expires_at = now
            .checked_add_signed(self.ttl)
            .filter(db::is_storable)
            .ok_or_else(|| {
                DashError::InvalidConfig(format!(
                    "session ttl of {}h puts expiry past year {}",
                    self.ttl.num_hours(),
                    db::MAX_STORABLE_YEAR
                ))
            })?;
        let token = generate_token();
        let session = self
            .storage
            .insert_session(user_id, &token, expires_at, now)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    DashError::NotFound("user")
                } else {
                    e.into()
                }
            })?;
        debug!(session_id = session.id, user_id, %expires_at, "session issued");
        Ok(IssuedSession {
            token,
            expires_at: session.expires_at,
        })
    }

    pub async fn validate(&self, token: &str) -> Result<i64, DashError> {
        self.validate_at(token, db::now()).await
    }

    /// Resolve `token` to its user id. Absent and expired sessions are indistinguishable.
    pub async fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<i64, DashError> {
        match self.storage.find_session_by_token(token).await? {
            Some(session) if session.is_valid_at(now) => Ok(session.user_id),
            _ => Err(DashError::SessionNotFound),
        }
    }

    /// Idempotent: revoking an unknown token is not an error.
    pub async fn revoke(&self, token: &str) -> Result<(), DashError> {
        let removed = self.storage.delete_session(token).await?;
        debug!(removed, "session revoked");
        Ok(())
    }

    pub async fn sweep(&self) -> Result<u64, DashError> {
        self.sweep_at(db::now()).await
    }

    pub async fn sweep_at(&self, now: DateTime<Utc>) -> Result<u64, DashError> {
        Ok(self.storage.delete_expired_sessions(now).await?)
    }
}

fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Periodically delete expired sessions until the runtime shuts down.
pub fn spawn_sweeper(issuer: SessionIssuer, every: std::time::Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(interval_secs = every.as_secs(), "session sweeper started");
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            match issuer.sweep().await {
                Ok(0) => {}
                Ok(removed) => info!(removed, "expired sessions swept"),
                Err(e) => warn!(error = %e, "session sweep failed"),
            }
        }
    })
}
