pub mod auth;
pub mod trace;

pub use auth::{MaybeUser, optional_auth, require_auth};
pub use trace::log_request;
