//! Authentication core: password hashing, session lifecycle, the bearer gate
//! and the login/logout flow built on top of them.

pub mod gate;
pub mod password;
pub mod service;
pub mod session;

pub use gate::{AuthGate, CurrentUser, parse_bearer};
pub use password::Hasher;
pub use service::{AuthService, LoginResponse};
pub use session::{IssuedSession, SessionIssuer, spawn_sweeper};
