//! Resource services: uniqueness checks and partial updates over `Storage`.
//!
//! Services keep no state between calls; each operation re-reads the rows it
//! needs. Concurrent updates to one row are last-write-wins.

pub mod pages;
pub mod users;
pub mod websites;

pub use pages::PageService;
pub use users::UserService;
pub use websites::WebsiteService;

use crate::db::sqlite::is_unique_violation;
use crate::error::DashError;

/// Partial-update rule: absent and empty both leave the current value alone.
pub(crate) fn non_empty(incoming: Option<String>) -> Option<String> {
    incoming.filter(|v| !v.is_empty())
}

/// Overwrite `slot` unless `incoming` is absent or empty.
pub(crate) fn apply_text(slot: &mut String, incoming: Option<String>) {
    if let Some(v) = non_empty(incoming) {
        *slot = v;
    }
}

/// A unique index can still fire if another request claimed the value after our probe.
pub(crate) fn on_unique_violation(err: sqlx::Error, conflict: DashError) -> DashError {
    if is_unique_violation(&err) {
        conflict
    } else {
        err.into()
    }
}
