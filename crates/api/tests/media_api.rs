//! Media library uploads, stored files, and show galleries.

mod common;

use std::io::Cursor;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use common::{
    body_json, create_user, data_id, delete_auth, get, get_auth, post_json_auth, put_json_auth,
    send, TestApp,
};
use footlights_core::roles::ROLE_EDITOR;
use serde_json::json;
use sqlx::PgPool;

const BOUNDARY: &str = "footlights-test-boundary";

/// A `width` x `height` PNG.
fn png(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Cursor::new(Vec::new());
    image::RgbImage::new(width, height)
        .write_to(&mut bytes, image::ImageFormat::Png)
        .unwrap();
    bytes.into_inner()
}

/// Multipart body with one file part and any number of text parts.
fn multipart(file_name: &str, content_type: &str, data: &[u8], fields: &[(&str, &str)]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
             Content-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

async fn upload(test: &TestApp, token: &str, body: Vec<u8>) -> axum::response::Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/admin/media")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header(CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .unwrap();
    send(test.app(), request).await
}

async fn upload_png(test: &TestApp, token: &str, name: &str) -> serde_json::Value {
    let response = upload(test, token, multipart(name, "image/png", &png(3, 2), &[])).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[sqlx::test(migrations = "../db/migrations")]
async fn png_upload_records_dimensions_and_is_served(pool: PgPool) {
    let editor = create_user(&pool, "editor", ROLE_EDITOR).await;
    let test = common::build_test_app(pool);
    let token = test.token_for(&editor);

    let response = upload(
        &test,
        &token,
        multipart(
            "Poster Final.png",
            "image/png",
            &png(3, 2),
            &[("alt_text", "Cast on stage"), ("tags", "Poster, season-2026,poster")],
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let media = &json["data"];

    assert_eq!(media["mime_type"], "image/png");
    assert_eq!(media["width"], 3);
    assert_eq!(media["height"], 2);
    assert_eq!(media["alt_text"], "Cast on stage");
    assert_eq!(media["tags"], json!(["poster", "season-2026"]));
    assert_eq!(media["uploaded_by"], editor.id.to_string());

    let key = media["storage_path"].as_str().unwrap();
    assert!(key.ends_with("poster-final.png"), "{key}");
    assert!(test.media_dir.path().join(key).exists());

    let served = get(test.app(), &format!("/media/{key}")).await;
    assert_eq!(served.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn pdf_upload_has_no_dimensions(pool: PgPool) {
    let editor = create_user(&pool, "editor", ROLE_EDITOR).await;
    let test = common::build_test_app(pool);
    let token = test.token_for(&editor);

    let body = multipart("dossier.pdf", "application/octet-stream", b"%PDF-1.7 test", &[]);
    let response = upload(&test, &token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["mime_type"], "application/pdf");
    assert!(json["data"]["width"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn rejected_uploads_leave_nothing_behind(pool: PgPool) {
    let editor = create_user(&pool, "editor", ROLE_EDITOR).await;
    let test = common::build_test_app(pool);
    let token = test.token_for(&editor);

    let cases = [
        multipart("setup.exe", "application/x-msdownload", b"MZ....", &[]),
        multipart("broken.png", "image/png", b"not really a png", &[]),
        multipart("huge.pdf", "application/pdf", &vec![b'x'; 70 * 1024], &[]),
        multipart("empty.pdf", "application/pdf", b"", &[]),
    ];
    for body in cases {
        let response = upload(&test, &token, body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["success"], false);
    }

    let listing = body_json(get_auth(test.app(), "/api/v1/admin/media", &token).await).await;
    assert_eq!(listing["data"].as_array().unwrap().len(), 0);
    assert_eq!(std::fs::read_dir(test.media_dir.path()).unwrap().count(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn upload_without_file_part_is_rejected(pool: PgPool) {
    let editor = create_user(&pool, "editor", ROLE_EDITOR).await;
    let test = common::build_test_app(pool);

    let body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"alt_text\"\r\n\r\nhello\r\n--{BOUNDARY}--\r\n"
    );
    let response = upload(&test, &test.token_for(&editor), body.into_bytes()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn deleting_media_clears_references_and_the_file(pool: PgPool) {
    let editor = create_user(&pool, "editor", ROLE_EDITOR).await;
    let test = common::build_test_app(pool);
    let token = test.token_for(&editor);

    let media = upload_png(&test, &token, "poster.png").await;
    let media_id = data_id(&media);
    let key = media["data"]["storage_path"].as_str().unwrap().to_string();

    let show = post_json_auth(
        test.app(),
        "/api/v1/admin/shows",
        json!({ "title": "Les Bonnes", "poster_media_id": media_id }),
        &token,
    )
    .await;
    let show_id = data_id(&body_json(show).await);

    let response = delete_auth(test.app(), &format!("/api/v1/admin/media/{media_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!test.media_dir.path().join(&key).exists());

    let show = body_json(
        get_auth(test.app(), &format!("/api/v1/admin/shows/{show_id}"), &token).await,
    )
    .await;
    assert!(show["data"]["poster_media_id"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn gallery_follows_the_requested_order(pool: PgPool) {
    let editor = create_user(&pool, "editor", ROLE_EDITOR).await;
    let test = common::build_test_app(pool);
    let token = test.token_for(&editor);

    let show = post_json_auth(
        test.app(),
        "/api/v1/admin/shows",
        json!({ "title": "Ondine", "status": "published" }),
        &token,
    )
    .await;
    let show_id = data_id(&body_json(show).await);
    let gallery_uri = format!("/api/v1/admin/shows/{show_id}/gallery");

    let mut photo_ids = Vec::new();
    for name in ["one.png", "two.png", "three.png"] {
        let media_id = data_id(&upload_png(&test, &token, name).await);
        let response = post_json_auth(
            test.app(),
            &gallery_uri,
            json!({ "media_id": media_id, "caption": name }),
            &token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        photo_ids.push(data_id(&body_json(response).await));
    }

    let reversed: Vec<&String> = photo_ids.iter().rev().collect();
    let response = put_json_auth(
        test.app(),
        &format!("{gallery_uri}/reorder"),
        json!({ "ids": reversed }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let detail = body_json(get(test.app(), "/api/v1/public/shows/ondine").await).await;
    let captions: Vec<&str> = detail["data"]["gallery"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["caption"].as_str().unwrap())
        .collect();
    assert_eq!(captions, vec!["three.png", "two.png", "one.png"]);
    assert_eq!(detail["data"]["gallery"][0]["width"], 3);

    assert!(test.invalidator.all_tags().contains(&"shows/ondine".to_string()));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn gallery_of_a_missing_show_is_404(pool: PgPool) {
    let editor = create_user(&pool, "editor", ROLE_EDITOR).await;
    let test = common::build_test_app(pool);

    let response = get_auth(
        test.app(),
        "/api/v1/admin/shows/777777/gallery",
        &test.token_for(&editor),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
