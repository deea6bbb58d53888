use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};
use chrono::Duration;

use crate::auth::{AuthGate, AuthService, Hasher, SessionIssuer};
use crate::db::Storage;
use crate::handlers;
use crate::middleware::{log_request, optional_auth, require_auth};
use crate::service::{PageService, UserService, WebsiteService};

/// Request bodies above this are rejected with 413 before any handler runs.
pub const BODY_LIMIT: usize = 2 * 1024 * 1024;

#[derive(Clone)]
pub struct DashState {
    pub auth: AuthService,
    pub gate: AuthGate,
    pub users: UserService,
    pub websites: WebsiteService,
    pub pages: PageService,
}

impl DashState {
    /// Login, the gate and the sweeper all share one `SessionIssuer`.
    pub fn new(storage: Storage, hasher: Hasher, session_ttl: Duration) -> Self {
        let sessions = SessionIssuer::new(storage.clone(), session_ttl);
        Self {
            auth: AuthService::new(storage.clone(), hasher.clone(), sessions.clone()),
            gate: AuthGate::new(sessions, storage.clone()),
            users: UserService::new(storage.clone(), hasher),
            websites: WebsiteService::new(storage.clone()),
            pages: PageService::new(storage),
        }
    }

    pub fn sessions(&self) -> &SessionIssuer {
        self.auth.sessions()
    }
}

pub fn dash_router(state: DashState) -> Router {
    let public_auth = Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route(
            "/auth/logout",
            post(handlers::auth::logout)
                .route_layer(from_fn_with_state(state.clone(), optional_auth)),
        );

    let protected = Router::new()
        .route("/auth/me", get(handlers::auth::me))
        .route(
            "/users",
            get(handlers::users::list).post(handlers::users::create),
        )
        .route(
            "/users/{id}",
            get(handlers::users::get)
                .put(handlers::users::update)
                .delete(handlers::users::delete),
        )
        .route(
            "/websites",
            get(handlers::websites::list).post(handlers::websites::create),
        )
        .route(
            "/websites/{id}",
            get(handlers::websites::get)
                .put(handlers::websites::update)
                .delete(handlers::websites::delete),
        )
        .route(
            "/websites/slug/{slug}",
            get(handlers::websites::get_by_slug),
        )
        .route(
            "/pages",
            get(handlers::pages::list).post(handlers::pages::create),
        )
        .route(
            "/pages/{id}",
            get(handlers::pages::get)
                .put(handlers::pages::update)
                .delete(handlers::pages::delete),
        )
        .route("/pages/slug/{slug}", get(handlers::pages::get_by_slug))
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api/v1", public_auth.merge(protected))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(from_fn(log_request))
        .with_state(state)
}
