//! End-to-end tests for the auth routes: registration, login and the
//! guard, driven through the router with an in-memory user store.

use frota_auth::{handlers, AuthConfig, AuthError, AuthService, User, UserStore};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::Utc;
use http_body_util::BodyExt;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use uuid::Uuid;

/// In-memory user store double
#[derive(Default)]
struct MemoryStore {
    users: Mutex<Vec<User>>,
}

impl MemoryStore {
    fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, email: &str, password_hash: &str) -> Result<User, AuthError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == email) {
            return Err(AuthError::EmailExists);
        }
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }
}

fn test_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "test-secret-test-secret-test-secret!".to_string(),
        token_ttl_secs: 86400,
        // Cheap hashing so the suite stays fast.
        argon2_memory_cost: 4096,
        argon2_time_cost: 1,
        argon2_parallelism: 1,
    }
}

fn app_with_store() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let auth = Arc::new(AuthService::new(store.clone(), &test_config()));
    (handlers::routes(auth), store)
}

fn app() -> Router {
    app_with_store().0
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn register(app: &Router, email: &str, password: &str) -> (StatusCode, serde_json::Value) {
    send(
        app,
        json_request(
            "POST",
            "/auth/register",
            serde_json::json!({ "email": email, "password": password }),
        ),
    )
    .await
}

async fn login(app: &Router, email: &str, password: &str) -> (StatusCode, serde_json::Value) {
    send(
        app,
        json_request(
            "POST",
            "/auth/login",
            serde_json::json!({ "email": email, "password": password }),
        ),
    )
    .await
}

#[tokio::test]
async fn register_then_login_then_me() {
    let app = app();

    let (status, _) = register(&app, "driver@frota.dev", "correct-horse-42").await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = login(&app, "driver@frota.dev", "correct-horse-42").await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();

    let req = Request::builder()
        .method("GET")
        .uri("/auth/me")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], "driver@frota.dev");
    // The password hash must never be serialized.
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn duplicate_registration_is_rejected() {
    let (app, store) = app_with_store();

    let (status, _) = register(&app, "driver@frota.dev", "correct-horse-42").await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = register(&app, "driver@frota.dev", "another-pass-99").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "email_exists");

    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn login_with_unknown_email_is_not_found() {
    let app = app();

    let (status, body) = login(&app, "nobody@frota.dev", "whatever-pass").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "user_not_found");
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let app = app();
    register(&app, "driver@frota.dev", "correct-horse-42").await;

    let (status, body) = login(&app, "driver@frota.dev", "wrong-password").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid_credentials");
    assert!(body.get("token").is_none());
}

#[tokio::test]
async fn invalid_registration_shape_is_rejected() {
    let app = app();

    let (status, body) = register(&app, "not-an-email", "correct-horse-42").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let (status, _) = register(&app, "driver@frota.dev", "short").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn protected_route_without_token_is_unauthorized() {
    let app = app();

    let req = Request::builder()
        .method("GET")
        .uri("/auth/me")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn protected_route_with_malformed_header_is_unauthorized() {
    let app = app();

    let req = Request::builder()
        .method("GET")
        .uri("/auth/me")
        .header(header::AUTHORIZATION, "Token abc123")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn protected_route_with_tampered_token_is_unauthorized() {
    let app = app();
    register(&app, "driver@frota.dev", "correct-horse-42").await;
    let (_, body) = login(&app, "driver@frota.dev", "correct-horse-42").await;

    let issued = body["token"].as_str().unwrap();
    let (head, sig) = issued.rsplit_once('.').unwrap();
    let mut sig = sig.to_string();
    let first = sig.remove(0);
    sig.insert(0, if first == 'A' { 'B' } else { 'A' });
    let token = format!("{head}.{sig}");

    let req = Request::builder()
        .method("GET")
        .uri("/auth/me")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid_token");
}

#[tokio::test]
async fn expired_token_is_rejected_by_the_guard() {
    let store = Arc::new(MemoryStore::default());
    let mut config = test_config();
    config.token_ttl_secs = -3600;
    let auth = Arc::new(AuthService::new(store, &config));
    let app = handlers::routes(auth);

    register(&app, "driver@frota.dev", "correct-horse-42").await;
    let (status, body) = login(&app, "driver@frota.dev", "correct-horse-42").await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap();

    let req = Request::builder()
        .method("GET")
        .uri("/auth/me")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid_token");
}
