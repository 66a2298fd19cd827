//! Invitation lifecycle: invite, deliver, accept, revoke.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_user, data_id, delete_auth, get_auth, post_json, post_json_auth};
use footlights_core::roles::ROLE_ADMIN;
use serde_json::json;
use sqlx::PgPool;

const NEW_PASSWORD: &str = "opening-night-2026!";

fn token_from_url(url: &str) -> String {
    url.split("token=").nth(1).unwrap().to_string()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invitation_without_mailer_returns_the_link(pool: PgPool) {
    let admin = create_user(&pool, "admin", ROLE_ADMIN).await;
    let test = common::build_test_app(pool);
    let token = test.token_for(&admin);

    let response = post_json_auth(
        test.app(),
        "/api/v1/admin/invitations",
        json!({ "email": "New.Editor@Example.org", "role": "editor" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "new.editor@example.org");
    assert_eq!(json["data"]["state"], "pending");
    assert_eq!(json["data"]["invited_by"], admin.id.to_string());

    let url = json["data"]["accept_url"].as_str().unwrap();
    assert!(url.starts_with("https://theatre.test/admin/accept-invitation?token="));

    // Accept it.
    let response = post_json(
        test.app(),
        "/api/v1/auth/invitations/accept",
        json!({ "token": token_from_url(url), "username": "neweditor", "password": NEW_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let user = body_json(response).await;
    assert_eq!(user["data"]["email"], "new.editor@example.org");
    assert_eq!(user["data"]["role"], "editor");

    // The new account can sign in.
    let response = post_json(
        test.app(),
        "/api/v1/auth/login",
        json!({ "username": "neweditor", "password": NEW_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // The token is single use.
    let response = post_json(
        test.app(),
        "/api/v1/auth/invitations/accept",
        json!({ "token": token_from_url(url), "username": "someone", "password": NEW_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let listing = body_json(get_auth(test.app(), "/api/v1/admin/invitations", &token).await).await;
    assert_eq!(listing["data"][0]["state"], "accepted");
    assert!(listing["data"][0].get("accept_url").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invitation_with_mailer_is_mailed(pool: PgPool) {
    let admin = create_user(&pool, "admin", ROLE_ADMIN).await;
    let test = common::build_test_app_with_mailer(pool);

    let response = post_json_auth(
        test.app(),
        "/api/v1/admin/invitations",
        json!({ "email": "lights@example.org", "role": "admin" }),
        &test.token_for(&admin),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["data"].get("accept_url").is_none());

    let sent = test.mailer.as_ref().unwrap().sent.lock().unwrap().clone();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "lights@example.org");
    assert!(sent[0].body.contains("https://theatre.test/admin/accept-invitation?token="));
    assert!(sent[0].body.contains("as admin"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_invitations_are_conflicts(pool: PgPool) {
    let admin = create_user(&pool, "admin", ROLE_ADMIN).await;
    let test = common::build_test_app(pool);
    let token = test.token_for(&admin);

    let body = json!({ "email": "twice@example.org", "role": "editor" });
    let first = post_json_auth(test.app(), "/api/v1/admin/invitations", body.clone(), &token).await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let second = post_json_auth(test.app(), "/api/v1/admin/invitations", body, &token).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);

    // The admin's own address already has an account.
    let response = post_json_auth(
        test.app(),
        "/api/v1/admin/invitations",
        json!({ "email": "admin@theatre.test", "role": "editor" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_role_is_rejected(pool: PgPool) {
    let admin = create_user(&pool, "admin", ROLE_ADMIN).await;
    let test = common::build_test_app(pool);

    let response = post_json_auth(
        test.app(),
        "/api/v1/admin/invitations",
        json!({ "email": "boss@example.org", "role": "owner" }),
        &test.token_for(&admin),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["fields"]["role"].is_array());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn revoked_invitation_cannot_be_accepted(pool: PgPool) {
    let admin = create_user(&pool, "admin", ROLE_ADMIN).await;
    let test = common::build_test_app(pool);
    let token = test.token_for(&admin);

    let json = body_json(
        post_json_auth(
            test.app(),
            "/api/v1/admin/invitations",
            json!({ "email": "late@example.org", "role": "editor" }),
            &token,
        )
        .await,
    )
    .await;
    let id = data_id(&json);
    let url = json["data"]["accept_url"].as_str().unwrap().to_string();

    let response = delete_auth(test.app(), &format!("/api/v1/admin/invitations/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["state"], "revoked");

    let again = delete_auth(test.app(), &format!("/api/v1/admin/invitations/{id}"), &token).await;
    assert_eq!(again.status(), StatusCode::CONFLICT);

    let response = post_json(
        test.app(),
        "/api/v1/auth/invitations/accept",
        json!({ "token": token_from_url(&url), "username": "latecomer", "password": NEW_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await["error"],
        "Invitation is invalid or has expired"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_token_gets_the_same_answer(pool: PgPool) {
    let test = common::build_test_app(pool);

    let response = post_json(
        test.app(),
        "/api/v1/auth/invitations/accept",
        json!({ "token": "made-up", "username": "intruder", "password": NEW_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await["error"],
        "Invitation is invalid or has expired"
    );
}
