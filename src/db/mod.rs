//! Database module: models, schema and queries for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows and their row decoding
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: pool bootstrap and the shared `Storage` handle
//! - `users.rs`, `sessions.rs`, `websites.rs`, `pages.rs`: per-table queries on `Storage`

pub mod models;
pub mod pages;
pub mod schema;
pub mod sessions;
pub mod sqlite;
pub mod users;
pub mod websites;

pub use models::{MAX_STORABLE_YEAR, Page, PageStatus, Session, User, Website, is_storable, now};
pub use pages::PageFields;
pub use schema::SQLITE_INIT;
pub use sqlite::{SqlitePool, Storage, connect};
pub use websites::WebsiteFields;
