use std::sync::Arc;

use crate::config::ServerConfig;
use crate::mailer::Mailer;
use crate::media_store::MediaStore;
use crate::revalidate::CacheInvalidator;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: every field is a pool handle or behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: footlights_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Where uploaded media files are stored.
    pub media_store: Arc<dyn MediaStore>,
    /// Invitation mail transport; `None` when SMTP is not configured.
    pub mailer: Option<Arc<dyn Mailer>>,
    /// Front-end cache invalidation notifier.
    pub invalidator: Arc<dyn CacheInvalidator>,
}
