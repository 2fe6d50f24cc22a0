#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use scout_core::clock::FixedClock;
use scout_core::identity::AuthType;
use scout_core::types::{DbId, Timestamp};
use scout_db::models::user::{CreateUser, User};
use scout_db::repositories::UserRepo;
use sqlx::PgPool;
use tower::ServiceExt;

use scout_api::auth::jwt::{generate_access_token, JwtConfig};
use scout_api::auth::password::hash_password;
use scout_api::auth::yandex::YandexConfig;
use scout_api::config::ServerConfig;
use scout_api::router::build_app_router;
use scout_api::state::AppState;

pub const TEST_BOT_TOKEN: &str = "123456:test-bot-token";
pub const TEST_PASSWORD: &str = "correct-horse";

/// 2025-03-05, a Wednesday.
pub fn wednesday() -> Timestamp {
    Utc.with_ymd_and_hms(2025, 3, 5, 14, 30, 0).unwrap()
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        },
        telegram_bot_token: TEST_BOT_TOKEN.to_string(),
        yandex: YandexConfig {
            client_id: String::new(),
            client_secret: String::new(),
            token_url: "http://127.0.0.1:9/token".to_string(),
            info_url: "http://127.0.0.1:9/info".to_string(),
        },
        launch_utc_offset_minutes: 0,
        launch_rotation_interval_secs: 3600,
    }
}

/// The application under test plus handles to steer it.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub clock: Arc<FixedClock>,
}

impl TestApp {
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    pub fn token_for(&self, user_id: DbId) -> String {
        generate_access_token(user_id, &self.state.config.jwt)
            .unwrap()
            .token
    }

    /// Create the launch that is active on [`wednesday`].
    pub async fn open_launch(&self) -> DbId {
        self.state.lifecycle.ensure_active_launch().await.unwrap().id
    }
}

/// Build the full application router, pinned to [`wednesday`], using the
/// same middleware stack as production.
pub fn build_test_app(pool: PgPool) -> TestApp {
    let clock = Arc::new(FixedClock::new(wednesday()));
    let state = AppState::new(pool, test_config(), clock.clone());
    TestApp {
        router: build_app_router(state.clone()),
        state,
        clock,
    }
}

/// Create an email user directly in the database with [`TEST_PASSWORD`].
pub async fn create_user(pool: &PgPool, username: &str) -> User {
    let email = format!("{username}@scout.io");
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: Some(email.clone()),
            password_hash: Some(hash_password(TEST_PASSWORD).expect("hashing should succeed")),
            avatar: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            auth_type: AuthType::Email,
            auth_id: email,
        },
    )
    .await
    .expect("user creation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
