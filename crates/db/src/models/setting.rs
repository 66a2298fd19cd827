//! Site-wide key/value settings (company info, contact, social links).

use footlights_core::types::{option_id_string, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `site_settings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SiteSetting {
    pub key: String,
    pub value: serde_json::Value,
    #[serde(with = "option_id_string")]
    pub updated_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Body of `PUT /admin/settings/{key}`.
#[derive(Debug, Clone, Deserialize)]
pub struct PutSetting {
    pub value: serde_json::Value,
}
