use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header::AUTHORIZATION},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use sitedash::auth::Hasher;
use sitedash::db::{self, Storage};
use sitedash::router::{BODY_LIMIT, DashState, dash_router};
use sitedash::types::CreateUserRequest;

const EMAIL: &str = "editor@example.com";
const PASSWORD: &str = "correct horse";

async fn app_with_user() -> (Router, i64) {
    let pool = db::connect("sqlite::memory:", 1)
        .await
        .expect("failed to open in-memory sqlite");
    let storage = Storage::new(pool);
    storage.init_schema().await.expect("failed to init schema");

    let hasher = Hasher::with_params(1024, 1, 1).expect("invalid argon2 params");
    let state = DashState::new(storage, hasher, chrono::Duration::hours(24));
    let user = state
        .users
        .create(CreateUserRequest {
            email: EMAIL.to_string(),
            password: PASSWORD.to_string(),
            name: "Editor".to_string(),
        })
        .await
        .expect("failed to seed user");

    (dash_router(state), user.id)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let req = match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(v.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("failed to build request");

    let resp = app.clone().oneshot(req).await.expect("request failed");
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn login(app: &Router) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/v1/auth/login",
        None,
        Some(json!({ "email": EMAIL, "password": PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["user"].get("passwordHash").is_none());
    body["sessionToken"]
        .as_str()
        .expect("login response carries a token")
        .to_string()
}

#[tokio::test]
async fn health_is_public() {
    let (app, _) = app_with_user().await;
    let (status, body) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "UP");
}

#[tokio::test]
async fn login_then_me_resolves_the_same_user() {
    let (app, user_id) = app_with_user().await;
    let token = login(&app).await;
    assert_eq!(token.len(), 64);

    let (status, body) = send(&app, "GET", "/api/v1/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], user_id);
    assert_eq!(body["user"]["email"], EMAIL);
}

#[tokio::test]
async fn wrong_password_and_unknown_email_look_the_same() {
    let (app, _) = app_with_user().await;
    let (s1, b1) = send(
        &app,
        "POST",
        "/api/v1/auth/login",
        None,
        Some(json!({ "email": EMAIL, "password": "wrong-pass" })),
    )
    .await;
    let (s2, b2) = send(
        &app,
        "POST",
        "/api/v1/auth/login",
        None,
        Some(json!({ "email": "ghost@example.com", "password": PASSWORD })),
    )
    .await;
    assert_eq!(s1, StatusCode::UNAUTHORIZED);
    assert_eq!(s1, s2);
    assert_eq!(b1, b2);
    assert_eq!(b1["error"]["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn protected_routes_reject_missing_and_tampered_tokens() {
    let (app, _) = app_with_user().await;

    let (status, body) = send(&app, "GET", "/api/v1/websites", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "MISSING_CREDENTIAL");

    let token = login(&app).await;
    let mut tampered = token.clone();
    let last = if tampered.ends_with('0') { "1" } else { "0" };
    tampered.replace_range(63.., last);

    let (status, body) = send(&app, "GET", "/api/v1/auth/me", Some(&tampered), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "INVALID_CREDENTIAL");
}

#[tokio::test]
async fn logout_revokes_the_session() {
    let (app, _) = app_with_user().await;
    let token = login(&app).await;

    let (status, body) = send(&app, "POST", "/api/v1/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Logged out successfully");

    let (status, _) = send(&app, "GET", "/api/v1/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Revoking an already revoked token still succeeds.
    let (status, _) = send(&app, "POST", "/api/v1/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "POST", "/api/v1/auth/logout", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "MISSING_CREDENTIAL");
}

#[tokio::test]
async fn website_and_page_publish_flow() {
    let (app, _) = app_with_user().await;
    let token = login(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/websites",
        Some(&token),
        Some(json!({
            "name": "Acme Docs",
            "slug": "acme-docs",
            "languageCode": "en",
            "gitApiToken": "ghp_secret"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["website"].get("gitApiToken").is_none());
    let website_id = body["website"]["id"].as_i64().expect("website id");

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/pages",
        Some(&token),
        Some(json!({
            "websiteId": website_id,
            "title": "Getting started",
            "slug": "getting-started",
            "status": "draft"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["page"]["tags"], "[]");
    let page_id = body["page"]["id"].as_i64().expect("page id");

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/v1/pages/{page_id}"),
        Some(&token),
        Some(json!({ "status": "published", "title": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"]["status"], "published");
    assert_eq!(body["page"]["title"], "Getting started");

    let (status, body) = send(
        &app,
        "GET",
        "/api/v1/pages/slug/getting-started",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"]["id"], page_id);
    assert_eq!(body["page"]["status"], "published");

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/v1/pages?website_id={website_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pages"].as_array().map(Vec::len), Some(1));

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/v1/websites/{website_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        "GET",
        &format!("/api/v1/pages/{page_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_page_slug_conflicts() {
    let (app, _) = app_with_user().await;
    let token = login(&app).await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/v1/websites",
        Some(&token),
        Some(json!({ "name": "Blog", "slug": "blog", "languageCode": "en" })),
    )
    .await;
    let website_id = body["website"]["id"].as_i64().expect("website id");

    let page = json!({ "websiteId": website_id, "slug": "hello", "status": "draft" });
    let (status, _) = send(&app, "POST", "/api/v1/pages", Some(&token), Some(page.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "POST", "/api/v1/pages", Some(&token), Some(page)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "DUPLICATE_SLUG");
}

#[tokio::test]
async fn page_on_missing_website_is_not_found() {
    let (app, _) = app_with_user().await;
    let token = login(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/pages",
        Some(&token),
        Some(json!({ "websiteId": 999, "slug": "orphan", "status": "draft" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn malformed_website_filter_is_a_bad_request() {
    let (app, _) = app_with_user().await;
    let token = login(&app).await;

    let (status, body) = send(&app, "GET", "/api/v1/pages?website_id=abc", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let (app, _) = app_with_user().await;
    let token = login(&app).await;

    let oversized = "a".repeat(BODY_LIMIT + 1024);
    let payload = json!({
        "websiteId": 1,
        "slug": "big",
        "status": "draft",
        "markdownContent": oversized
    });
    let (status, _) = send(&app, "POST", "/api/v1/pages", Some(&token), Some(payload)).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn far_future_schedule_is_rejected_and_listing_survives() {
    let (app, _) = app_with_user().await;
    let token = login(&app).await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/v1/websites",
        Some(&token),
        Some(json!({ "name": "Docs", "slug": "docs", "languageCode": "en" })),
    )
    .await;
    let website_id = body["website"]["id"].as_i64().expect("website id");

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/pages",
        Some(&token),
        Some(json!({
            "websiteId": website_id,
            "slug": "someday",
            "status": "draft",
            "scheduledPublishAt": "+10000-01-01T00:00:00Z"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    // the rejected slug was never stored
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/pages",
        Some(&token),
        Some(json!({ "websiteId": website_id, "slug": "someday", "status": "draft" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let page_id = body["page"]["id"].as_i64().expect("page id");

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/v1/pages/{page_id}"),
        Some(&token),
        Some(json!({ "scheduledPublishAt": "+10000-01-01T00:00:00Z" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "GET", "/api/v1/pages", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pages"].as_array().map(Vec::len), Some(1));

    let (status, _) = send(
        &app,
        "GET",
        &format!("/api/v1/pages?website_id={website_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}
