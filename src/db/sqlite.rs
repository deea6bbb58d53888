use crate::db::schema::SQLITE_INIT;
use crate::error::DashError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use tracing::info;

pub type SqlitePool = Pool<Sqlite>;

/// Open a pool against `database_url`, creating the file if needed.
///
/// Connections never idle out, so `sqlite::memory:` with a single connection
/// keeps its data for the life of the pool.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, DashError> {
    let connect_opts = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(connect_opts)
        .await?;
    info!(max_connections, "database pool ready");
    Ok(pool)
}

/// Handle to every table. Cheap to clone; all clones share one pool.
#[derive(Clone)]
pub struct Storage {
    pub(crate) pool: SqlitePool,
}

impl Storage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), DashError> {
        // sqlx::query runs one statement at a time
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}

#[cfg(test)]
pub(crate) async fn memory_storage() -> Storage {
    let pool = connect("sqlite::memory:", 1)
        .await
        .expect("failed to open in-memory sqlite");
    let storage = Storage::new(pool);
    storage.init_schema().await.expect("failed to init schema");
    storage
}
