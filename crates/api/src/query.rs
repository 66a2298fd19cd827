//! Query parameter types for handlers outside the repository layer.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Query parameters for the public agenda (`?from=&limit=`).
#[derive(Debug, Default, Deserialize)]
pub struct AgendaParams {
    /// Earliest start time; defaults to now.
    pub from: Option<DateTime<Utc>>,
    pub limit: Option<i64>,
}
