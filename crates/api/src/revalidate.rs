//! Cache invalidation notices for the public front-end.
//!
//! After a mutation that changes a public page, handlers name the affected
//! listings as tags. [`WebhookInvalidator`] posts `{ "tags": [...] }` to the
//! front-end's revalidation endpoint. A failed notice is logged and never
//! fails the mutation that triggered it.

use std::time::Duration;

use async_trait::async_trait;

use crate::config::RevalidateConfig;

/// Header carrying the shared revalidation secret.
pub const SECRET_HEADER: &str = "x-revalidate-secret";

/// HTTP timeout for a single notice.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Tags naming public listings.
pub mod tags {
    pub const HERO_SLIDES: &str = "hero-slides";
    pub const TEAM: &str = "team";
    pub const PARTNERS: &str = "partners";
    pub const SHOWS: &str = "shows";
    pub const AGENDA: &str = "agenda";
    pub const PRESS: &str = "press";
    pub const COMPANY: &str = "company";

    /// Detail page of one show.
    pub fn show(slug: &str) -> String {
        format!("shows/{slug}")
    }

    /// Detail page of one press release.
    pub fn press_release(slug: &str) -> String {
        format!("press/{slug}")
    }
}

/// Receives the tags of public listings that changed.
#[async_trait]
pub trait CacheInvalidator: Send + Sync {
    async fn invalidate(&self, tags: Vec<String>);
}

/// Used when no `REVALIDATE_URL` is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogInvalidator;

#[async_trait]
impl CacheInvalidator for LogInvalidator {
    async fn invalidate(&self, tags: Vec<String>) {
        tracing::debug!(?tags, "Cache invalidation skipped (no REVALIDATE_URL)");
    }
}

/// Posts invalidation notices to the front-end.
pub struct WebhookInvalidator {
    client: reqwest::Client,
    url: String,
    secret: Option<String>,
}

impl WebhookInvalidator {
    pub fn new(config: &RevalidateConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            url: config.url.clone(),
            secret: config.secret.clone(),
        })
    }
}

#[async_trait]
impl CacheInvalidator for WebhookInvalidator {
    async fn invalidate(&self, tags: Vec<String>) {
        if tags.is_empty() {
            return;
        }

        let mut request = self
            .client
            .post(&self.url)
            .json(&serde_json::json!({ "tags": tags }));
        if let Some(secret) = &self.secret {
            request = request.header(SECRET_HEADER, secret);
        }

        match request.send().await {
            Ok(response) if response.status().is_success() => {
                tracing::debug!(?tags, "Cache invalidation sent");
            }
            Ok(response) => {
                tracing::warn!(?tags, status = response.status().as_u16(), "Cache invalidation rejected");
            }
            Err(e) => {
                tracing::warn!(?tags, error = %e, "Cache invalidation failed");
            }
        }
    }
}
