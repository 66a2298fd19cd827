//! The failure half of the response envelope, as seen over HTTP.

mod common;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use common::{body_json, create_user, get_auth, post_json, send};
use footlights_core::roles::ROLE_EDITOR;
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn malformed_json_is_a_json_400(pool: PgPool) {
    let editor = create_user(&pool, "editor", ROLE_EDITOR).await;
    let test = common::build_test_app(pool);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/admin/venues")
        .header(AUTHORIZATION, format!("Bearer {}", test.token_for(&editor)))
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{ \"name\": "))
        .unwrap();
    let response = send(test.app(), request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].is_string());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_content_type_is_a_json_400(pool: PgPool) {
    let test = common::build_test_app(pool);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/auth/login")
        .body(Body::from(r#"{"username":"a","password":"b"}"#))
        .unwrap();
    let response = send(test.app(), request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["success"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn non_numeric_id_is_a_json_400(pool: PgPool) {
    let editor = create_user(&pool, "editor", ROLE_EDITOR).await;
    let test = common::build_test_app(pool);

    let response = get_auth(
        test.app(),
        "/api/v1/admin/shows/not-a-number",
        &test.token_for(&editor),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn bad_query_parameter_is_a_json_400(pool: PgPool) {
    let test = common::build_test_app(pool);

    let response = common::get(test.app(), "/api/v1/public/agenda?limit=lots").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["success"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn field_errors_are_listed_per_field(pool: PgPool) {
    let editor = create_user(&pool, "editor", ROLE_EDITOR).await;
    let test = common::build_test_app(pool);

    let response = common::post_json_auth(
        test.app(),
        "/api/v1/admin/venues",
        json!({ "name": "", "capacity": 0, "website_url": "nope" }),
        &test.token_for(&editor),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    for field in ["name", "capacity", "website_url"] {
        assert!(json["fields"][field].is_array(), "{field}");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn public_routes_need_no_token(pool: PgPool) {
    let test = common::build_test_app(pool);

    for uri in [
        "/api/v1/public/shows",
        "/api/v1/public/agenda",
        "/api/v1/public/press",
        "/api/v1/public/team",
        "/api/v1/public/partners",
        "/api/v1/public/hero-slides",
        "/api/v1/public/company",
    ] {
        let response = common::get(test.app(), uri).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        assert_eq!(body_json(response).await["success"], true, "{uri}");
    }

    let response = post_json(test.app(), "/api/v1/public/contact", json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
