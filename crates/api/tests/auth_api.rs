//! HTTP-level integration tests for login, refresh, logout and `/me`.

mod common;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, USER_AGENT};
use axum::http::{Method, Request, StatusCode};
use common::{body_json, create_user, get_auth, post_auth, post_json, send, TEST_PASSWORD};
use footlights_core::roles::{ROLE_ADMIN, ROLE_EDITOR};
use footlights_db::repositories::UserRepo;
use sqlx::PgPool;

async fn login(app: axum::Router, username: &str, password: &str) -> axum::response::Response {
    let body = serde_json::json!({ "username": username, "password": password });
    post_json(app, "/api/v1/auth/login", body).await
}

#[sqlx::test(migrations = "../db/migrations")]
async fn login_returns_tokens_and_user(pool: PgPool) {
    let user = create_user(&pool, "stagemanager", ROLE_ADMIN).await;
    let test = common::build_test_app(pool);

    let response = login(test.app(), "stagemanager", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert!(json["data"]["access_token"].is_string());
    assert!(json["data"]["refresh_token"].is_string());
    assert_eq!(json["data"]["expires_in"], 15 * 60);
    assert_eq!(json["data"]["user"]["id"], user.id.to_string());
    assert_eq!(json["data"]["user"]["role"], "admin");
    assert!(json["data"]["user"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn wrong_password_and_unknown_user_look_the_same(pool: PgPool) {
    create_user(&pool, "lighting", ROLE_EDITOR).await;
    let test = common::build_test_app(pool);

    let wrong = login(test.app(), "lighting", "not-the-password").await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    let wrong = body_json(wrong).await;

    let unknown = login(test.app(), "ghost", "whatever").await;
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    let unknown = body_json(unknown).await;

    assert_eq!(wrong["error"], unknown["error"]);
    assert_eq!(wrong["success"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn deactivated_account_cannot_log_in(pool: PgPool) {
    let user = create_user(&pool, "understudy", ROLE_EDITOR).await;
    UserRepo::deactivate(&pool, user.id).await.unwrap();
    let test = common::build_test_app(pool);

    let response = login(test.app(), "understudy", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn five_failures_lock_the_account(pool: PgPool) {
    create_user(&pool, "props", ROLE_EDITOR).await;
    let test = common::build_test_app(pool);

    for _ in 0..5 {
        let response = login(test.app(), "props", "wrong-password-123").await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    // Even the right password is refused while locked.
    let response = login(test.app(), "props", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn refresh_rotates_the_token(pool: PgPool) {
    create_user(&pool, "director", ROLE_ADMIN).await;
    let test = common::build_test_app(pool);

    let json = body_json(login(test.app(), "director", TEST_PASSWORD).await).await;
    let original = json["data"]["refresh_token"].as_str().unwrap().to_string();

    let body = serde_json::json!({ "refresh_token": original });
    let response = post_json(test.app(), "/api/v1/auth/refresh", body.clone()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let rotated = body_json(response).await;
    assert_ne!(rotated["data"]["refresh_token"].as_str().unwrap(), original);

    // The used token is gone.
    let replay = post_json(test.app(), "/api/v1/auth/refresh", body).await;
    assert_eq!(replay.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn concurrent_refreshes_with_one_token_yield_one_session(pool: PgPool) {
    create_user(&pool, "stagehand", ROLE_EDITOR).await;
    let test = common::build_test_app(pool);

    let json = body_json(login(test.app(), "stagehand", TEST_PASSWORD).await).await;
    let body = serde_json::json!({ "refresh_token": json["data"]["refresh_token"] });

    let (first, second) = tokio::join!(
        post_json(test.app(), "/api/v1/auth/refresh", body.clone()),
        post_json(test.app(), "/api/v1/auth/refresh", body.clone()),
    );
    let mut statuses = vec![first.status(), second.status()];
    statuses.sort();
    assert_eq!(statuses, vec![StatusCode::OK, StatusCode::UNAUTHORIZED]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn sessions_record_the_client_user_agent(pool: PgPool) {
    create_user(&pool, "usher", ROLE_EDITOR).await;
    let test = common::build_test_app(pool.clone());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/auth/login")
        .header(CONTENT_TYPE, "application/json")
        .header(USER_AGENT, "BoxOffice/2.1")
        .body(Body::from(
            serde_json::json!({ "username": "usher", "password": TEST_PASSWORD }).to_string(),
        ))
        .unwrap();
    let response = send(test.app(), request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let agent: Option<String> = sqlx::query_scalar("SELECT user_agent FROM user_sessions")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(agent.as_deref(), Some("BoxOffice/2.1"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn logout_revokes_refresh_tokens(pool: PgPool) {
    let user = create_user(&pool, "producer", ROLE_ADMIN).await;
    let test = common::build_test_app(pool);

    let json = body_json(login(test.app(), "producer", TEST_PASSWORD).await).await;
    let refresh_token = json["data"]["refresh_token"].as_str().unwrap().to_string();

    let response = post_auth(test.app(), "/api/v1/auth/logout", &test.token_for(&user)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["revoked_sessions"], 1);

    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = post_json(test.app(), "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn me_returns_the_current_user(pool: PgPool) {
    let user = create_user(&pool, "dramaturg", ROLE_EDITOR).await;
    let test = common::build_test_app(pool);

    let response = get_auth(test.app(), "/api/v1/auth/me", &test.token_for(&user)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["username"], "dramaturg");
    assert_eq!(json["data"]["role"], "editor");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn garbage_bearer_token_is_rejected(pool: PgPool) {
    let test = common::build_test_app(pool);

    let response = get_auth(test.app(), "/api/v1/auth/me", "not.a.jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}
