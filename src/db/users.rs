use crate::db::models::{User, format_ts};
use crate::db::sqlite::Storage;
use chrono::{DateTime, Utc};

const USER_COLUMNS: &str = "id, email, password_hash, name, created_at, updated_at";

impl Storage {
    pub async fn insert_user(
        &self,
        email: &str,
        password_hash: &str,
        name: &str,
        now: DateTime<Utc>,
    ) -> Result<User, sqlx::Error> {
        let now = format_ts(now);
        sqlx::query_as::<_, User>(&format!(
            r#"INSERT INTO users (email, password_hash, name, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?)
               RETURNING {USER_COLUMNS}"#
        ))
        .bind(email)
        .bind(password_hash)
        .bind(name)
        .bind(&now)
        .bind(&now)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn get_user(&self, id: i64) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Exact, case-sensitive lookup on the stored email.
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ?"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn list_users(&self) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await
    }

    /// Write email and name back; the password hash is left untouched.
    /// Returns `None` when the row no longer exists.
    pub async fn update_user(
        &self,
        user: &User,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            r#"UPDATE users SET email = ?, name = ?, updated_at = ?
               WHERE id = ?
               RETURNING {USER_COLUMNS}"#
        ))
        .bind(&user.email)
        .bind(&user.name)
        .bind(format_ts(now))
        .bind(user.id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Returns the number of rows removed (0 or 1).
    pub async fn delete_user(&self, id: i64) -> Result<u64, sqlx::Error> {
        let res = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }
}
