//! Role enforcement across the admin API.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_user, delete_auth, get, get_auth, post_json_auth, put_json_auth};
use footlights_core::roles::{ROLE_ADMIN, ROLE_EDITOR};
use serde_json::json;
use sqlx::PgPool;

const CONTENT_LISTINGS: &[&str] = &[
    "/api/v1/admin/shows",
    "/api/v1/admin/events",
    "/api/v1/admin/venues",
    "/api/v1/admin/team-members",
    "/api/v1/admin/partners",
    "/api/v1/admin/hero-slides",
    "/api/v1/admin/media",
    "/api/v1/admin/media-folders",
    "/api/v1/admin/press-releases",
    "/api/v1/admin/press-articles",
    "/api/v1/admin/contact-messages",
];

const ADMIN_LISTINGS: &[&str] = &[
    "/api/v1/admin/users",
    "/api/v1/admin/invitations",
    "/api/v1/admin/settings",
];

#[sqlx::test(migrations = "../db/migrations")]
async fn anonymous_requests_to_admin_routes_are_401(pool: PgPool) {
    let test = common::build_test_app(pool);

    for uri in CONTENT_LISTINGS.iter().chain(ADMIN_LISTINGS) {
        let response = get(test.app(), uri).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
        let json = body_json(response).await;
        assert_eq!(json["success"], false, "{uri}");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn editors_manage_content_but_not_accounts(pool: PgPool) {
    let editor = create_user(&pool, "editor", ROLE_EDITOR).await;
    let test = common::build_test_app(pool);
    let token = test.token_for(&editor);

    for uri in CONTENT_LISTINGS {
        let response = get_auth(test.app(), uri, &token).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
    }
    for uri in ADMIN_LISTINGS {
        let response = get_auth(test.app(), uri, &token).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{uri}");
        assert_eq!(body_json(response).await["code"], "FORBIDDEN");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn admins_reach_everything(pool: PgPool) {
    let admin = create_user(&pool, "admin", ROLE_ADMIN).await;
    let test = common::build_test_app(pool);
    let token = test.token_for(&admin);

    for uri in CONTENT_LISTINGS.iter().chain(ADMIN_LISTINGS) {
        let response = get_auth(test.app(), uri, &token).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn forbidden_response_does_not_reveal_existence(pool: PgPool) {
    let admin = create_user(&pool, "admin", ROLE_ADMIN).await;
    let editor = create_user(&pool, "editor", ROLE_EDITOR).await;
    let test = common::build_test_app(pool);
    let token = test.token_for(&editor);

    let existing = get_auth(test.app(), &format!("/api/v1/admin/users/{}", admin.id), &token).await;
    let missing = get_auth(test.app(), "/api/v1/admin/users/424242", &token).await;

    assert_eq!(existing.status(), StatusCode::FORBIDDEN);
    assert_eq!(missing.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(existing).await, body_json(missing).await);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn editor_cannot_promote_themselves(pool: PgPool) {
    let editor = create_user(&pool, "editor", ROLE_EDITOR).await;
    let test = common::build_test_app(pool);

    let response = put_json_auth(
        test.app(),
        &format!("/api/v1/admin/users/{}", editor.id),
        json!({ "role": "admin" }),
        &test.token_for(&editor),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_manages_accounts_but_not_their_own_lockout(pool: PgPool) {
    let admin = create_user(&pool, "admin", ROLE_ADMIN).await;
    let editor = create_user(&pool, "editor", ROLE_EDITOR).await;
    let test = common::build_test_app(pool);
    let token = test.token_for(&admin);

    let response = delete_auth(test.app(), &format!("/api/v1/admin/users/{}", admin.id), &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = put_json_auth(
        test.app(),
        &format!("/api/v1/admin/users/{}", admin.id),
        json!({ "role": "editor" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = post_json_auth(
        test.app(),
        &format!("/api/v1/admin/users/{}/reset-password", editor.id),
        json!({ "new_password": "a-brand-new-passphrase-42" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["id"], editor.id.to_string());

    let response = delete_auth(test.app(), &format!("/api/v1/admin/users/{}", editor.id), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["is_active"], false);

    let json = body_json(
        get_auth(test.app(), &format!("/api/v1/admin/users/{}", editor.id), &token).await,
    )
    .await;
    assert_eq!(json["data"]["is_active"], false);
}
