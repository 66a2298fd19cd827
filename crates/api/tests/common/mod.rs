#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;

use footlights_api::auth::jwt::{generate_access_token, JwtConfig};
use footlights_api::auth::password::hash_password;
use footlights_api::config::{LogFormat, MediaConfig, ServerConfig};
use footlights_api::mailer::{MailError, Mailer, OutgoingMail};
use footlights_api::media_store::LocalMediaStore;
use footlights_api::revalidate::CacheInvalidator;
use footlights_api::router::build_app_router;
use footlights_api::state::AppState;
use footlights_db::models::user::{CreateUser, User};
use footlights_db::repositories::UserRepo;

pub const TEST_PASSWORD: &str = "correct-horse-battery-9";

/// Build a test `ServerConfig` with safe defaults and uploads under `media_root`.
pub fn test_config(media_root: PathBuf) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "postgres://unused".to_string(),
        site_url: "https://theatre.test".to_string(),
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
        media: MediaConfig {
            root: media_root,
            max_upload_bytes: 64 * 1024,
        },
        smtp: None,
        revalidate: None,
        invitation_expiry_hours: 72,
        log_format: LogFormat::Pretty,
        bootstrap_admin: None,
    }
}

/// Records every invalidation notice.
#[derive(Default)]
pub struct RecordingInvalidator {
    pub calls: Mutex<Vec<Vec<String>>>,
}

impl RecordingInvalidator {
    pub fn all_tags(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().flatten().cloned().collect()
    }
}

#[async_trait]
impl CacheInvalidator for RecordingInvalidator {
    async fn invalidate(&self, tags: Vec<String>) {
        self.calls.lock().unwrap().push(tags);
    }
}

/// Captures outgoing mail instead of sending it.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<OutgoingMail>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(mail.clone());
        Ok(())
    }
}

/// A router plus the fakes wired into it.
///
/// The media directory lives as long as this value.
pub struct TestApp {
    pub router: Router,
    pub config: ServerConfig,
    pub invalidator: Arc<RecordingInvalidator>,
    pub mailer: Option<Arc<RecordingMailer>>,
    pub media_dir: TempDir,
}

impl TestApp {
    /// A fresh handle to the router for one `oneshot` request.
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    pub fn token_for(&self, user: &User) -> String {
        generate_access_token(user.id, &user.role, &self.config.jwt).unwrap()
    }
}

/// Build the full application router, exactly as `main.rs` does, with no mailer.
pub fn build_test_app(pool: PgPool) -> TestApp {
    build(pool, false)
}

/// Same as [`build_test_app`] with a [`RecordingMailer`] installed.
pub fn build_test_app_with_mailer(pool: PgPool) -> TestApp {
    build(pool, true)
}

fn build(pool: PgPool, with_mailer: bool) -> TestApp {
    let media_dir = tempfile::tempdir().unwrap();
    let config = test_config(media_dir.path().to_path_buf());
    let invalidator = Arc::new(RecordingInvalidator::default());
    let mailer = with_mailer.then(|| Arc::new(RecordingMailer::default()));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        media_store: Arc::new(LocalMediaStore::new(media_dir.path())),
        mailer: mailer.clone().map(|m| m as Arc<dyn Mailer>),
        invalidator: invalidator.clone(),
    };

    let router = build_app_router(state, &config).unwrap();

    TestApp {
        router,
        config,
        invalidator,
        mailer,
        media_dir,
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Insert a user with [`TEST_PASSWORD`] directly in the database.
pub async fn create_user(pool: &PgPool, username: &str, role: &str) -> User {
    let input = CreateUser {
        username: username.to_string(),
        email: format!("{username}@theatre.test"),
        password_hash: hash_password(TEST_PASSWORD).unwrap(),
        role: role.to_string(),
    };
    UserRepo::create(pool, &input).await.unwrap()
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

fn builder(method: Method, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    }
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, builder(Method::GET, uri, None).body(Body::empty()).unwrap()).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(
        app,
        builder(Method::GET, uri, Some(token)).body(Body::empty()).unwrap(),
    )
    .await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    json_request(app, Method::POST, uri, body, None).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    json_request(app, Method::POST, uri, body, Some(token)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response {
    send(
        app,
        builder(Method::POST, uri, Some(token)).body(Body::empty()).unwrap(),
    )
    .await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    json_request(app, Method::PUT, uri, body, Some(token)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(
        app,
        builder(Method::DELETE, uri, Some(token)).body(Body::empty()).unwrap(),
    )
    .await
}

async fn json_request(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
    token: Option<&str>,
) -> Response {
    let request = builder(method, uri, token)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// `data.id` of an enveloped response, as the string the API emits.
pub fn data_id(json: &serde_json::Value) -> String {
    json["data"]["id"].as_str().unwrap().to_string()
}
