//! HTTP-level tests for registration, login and account linking.

mod common;

use std::collections::BTreeMap;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, create_user, delete_auth, get_auth, post_json, post_json_auth,
    put_json_auth, wednesday, TEST_BOT_TOKEN, TEST_PASSWORD,
};
use scout_core::telegram::expected_hash;
use scout_db::repositories::UserRepo;
use serde_json::json;
use sqlx::PgPool;

/// A widget payload signed with [`TEST_BOT_TOKEN`], issued a minute before
/// the pinned test clock.
fn telegram_payload(telegram_id: i64) -> serde_json::Value {
    let auth_date = wednesday().timestamp() - 60;
    let mut fields = BTreeMap::new();
    fields.insert("id".to_string(), telegram_id.to_string());
    fields.insert("first_name".to_string(), "Ada".to_string());
    fields.insert("auth_date".to_string(), auth_date.to_string());
    let hash = expected_hash(&fields, TEST_BOT_TOKEN).unwrap();

    json!({
        "id": telegram_id,
        "first_name": "Ada",
        "auth_date": auth_date,
        "hash": hash,
    })
}

// ---------------------------------------------------------------------------
// Email
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_returns_token(pool: PgPool) {
    let t = build_test_app(pool);

    let response = post_json(
        t.app(),
        "/api/v1/auth/email/register",
        json!({ "email": "Founder@Scout.io", "username": "founder", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert!(json["access_token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(json["expires_in"], 15 * 60);
    assert_eq!(json["user"]["email"], "founder@scout.io");
    assert_eq!(json["user"]["auth_type"], "email");
    assert!(json["user"].get("password_hash").is_none());

    // The issued token authenticates the profile endpoint.
    let token = json["access_token"].as_str().unwrap();
    let profile = body_json(get_auth(t.app(), "/api/v1/profile", token).await).await;
    assert_eq!(profile["data"]["username"], "founder");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_conflicts(pool: PgPool) {
    let t = build_test_app(pool.clone());
    create_user(&pool, "taken").await;

    let response = post_json(
        t.app(),
        "/api/v1/auth/email/register",
        json!({ "email": "taken@scout.io", "username": "fresh", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = post_json(
        t.app(),
        "/api/v1/auth/email/register",
        json!({ "email": "fresh@scout.io", "username": "taken", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_rejects_weak_password(pool: PgPool) {
    let t = build_test_app(pool);

    let response = post_json(
        t.app(),
        "/api/v1/auth/email/register",
        json!({ "email": "a@scout.io", "username": "weakling", "password": "short" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login(pool: PgPool) {
    let t = build_test_app(pool.clone());
    create_user(&pool, "member").await;

    let response = post_json(
        t.app(),
        "/api/v1/auth/email/login",
        json!({ "email": "member@scout.io", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["user"]["username"], "member");

    let response = post_json(
        t.app(),
        "/api/v1/auth/email/login",
        json!({ "email": "member@scout.io", "password": "wrong-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = post_json(
        t.app(),
        "/api/v1/auth/email/login",
        json!({ "email": "nobody@scout.io", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deactivated_user_cannot_login(pool: PgPool) {
    let t = build_test_app(pool.clone());
    let user = create_user(&pool, "gone").await;
    let token = t.token_for(user.id);

    let response = delete_auth(t.app(), "/api/v1/profile", &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = delete_auth(t.app(), "/api/v1/profile", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let stats = body_json(common::get(t.app(), "/api/v1/stats").await).await;
    assert_eq!(stats["data"]["user_count"], 0);

    let response = post_json(
        t.app(),
        "/api/v1/auth/email/login",
        json!({ "email": "gone@scout.io", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_protected_route_rejects_bad_token(pool: PgPool) {
    let t = build_test_app(pool);

    let response = get_auth(t.app(), "/api/v1/profile", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Yandex
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_yandex_without_credentials_is_400(pool: PgPool) {
    let t = build_test_app(pool);

    let response = post_json(t.app(), "/api/v1/auth/yandex", json!({ "code": "abc" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Telegram
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_link_telegram(pool: PgPool) {
    let t = build_test_app(pool.clone());
    let user = create_user(&pool, "linker").await;
    let token = t.token_for(user.id);

    let response = post_json_auth(
        t.app(),
        "/api/v1/auth/telegram/link",
        telegram_payload(987_654_321),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["telegram_id"], 987_654_321i64);

    // Linking the same account again is fine.
    let response = post_json_auth(
        t.app(),
        "/api/v1/auth/telegram/link",
        telegram_payload(987_654_321),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_link_telegram_held_by_other_user_is_409(pool: PgPool) {
    let t = build_test_app(pool.clone());
    let holder = create_user(&pool, "holder").await;
    let other = create_user(&pool, "other").await;
    UserRepo::link_telegram(&pool, holder.id, 42).await.unwrap();

    let response = post_json_auth(
        t.app(),
        "/api/v1/auth/telegram/link",
        telegram_payload(42),
        &t.token_for(other.id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_link_telegram_with_bad_hash_is_401(pool: PgPool) {
    let t = build_test_app(pool.clone());
    let user = create_user(&pool, "forger").await;

    let mut payload = telegram_payload(7);
    payload["first_name"] = json!("Mallory");

    let response = post_json_auth(
        t.app(),
        "/api/v1/auth/telegram/link",
        payload,
        &t.token_for(user.id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_link_telegram_with_stale_payload_is_401(pool: PgPool) {
    let t = build_test_app(pool.clone());
    let user = create_user(&pool, "sleeper").await;
    t.clock.advance(chrono::Duration::days(2));

    let response = post_json_auth(
        t.app(),
        "/api/v1/auth/telegram/link",
        telegram_payload(9),
        &t.token_for(user.id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_profile_update_rejects_taken_username(pool: PgPool) {
    let t = build_test_app(pool.clone());
    let me = create_user(&pool, "me").await;
    create_user(&pool, "you").await;
    let token = t.token_for(me.id);

    let response = put_json_auth(t.app(), "/api/v1/profile", json!({ "username": "you" }), &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = put_json_auth(
        t.app(),
        "/api/v1/profile",
        json!({ "username": "me_renamed", "first_name": "Ada" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["username"], "me_renamed");
    assert_eq!(json["data"]["first_name"], "Ada");

    let response =
        put_json_auth(t.app(), "/api/v1/profile/avatar", json!({ "avatar": " " }), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
