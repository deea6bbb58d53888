use crate::db::models::{Session, format_ts};
use crate::db::sqlite::Storage;
use chrono::{DateTime, Utc};

const SESSION_COLUMNS: &str = "id, user_id, session_token, expires_at, created_at";

impl Storage {
    pub async fn insert_session(
        &self,
        user_id: i64,
        token: &str,
        expires_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Session, sqlx::Error> {
        sqlx::query_as::<_, Session>(&format!(
            r#"INSERT INTO user_sessions (user_id, session_token, expires_at, created_at)
               VALUES (?, ?, ?, ?)
               RETURNING {SESSION_COLUMNS}"#
        ))
        .bind(user_id)
        .bind(token)
        .bind(format_ts(expires_at))
        .bind(format_ts(now))
        .fetch_one(&self.pool)
        .await
    }

    /// Exact token match. Expired rows are returned too; callers decide validity.
    pub async fn find_session_by_token(&self, token: &str) -> Result<Option<Session>, sqlx::Error> {
        sqlx::query_as::<_, Session>(&format!(
            "SELECT {SESSION_COLUMNS} FROM user_sessions WHERE session_token = ?"
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn delete_session(&self, token: &str) -> Result<u64, sqlx::Error> {
        let res = sqlx::query("DELETE FROM user_sessions WHERE session_token = ?")
            .bind(token)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }

    /// Remove every session whose expiry is at or before `now`.
    pub async fn delete_expired_sessions(&self, now: DateTime<Utc>) -> Result<u64, sqlx::Error> {
        let res = sqlx::query("DELETE FROM user_sessions WHERE expires_at <= ?")
            .bind(format_ts(now))
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }
}
