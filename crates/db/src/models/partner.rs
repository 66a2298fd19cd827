//! Partner model and DTOs.

use footlights_core::types::{id_string, option_id_string, DbId, Timestamp};
use footlights_core::validation::{clear_blank, not_blank, trim_in_place, trim_present, Normalize};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::status::PartnerCategory;

/// A partner row from the `partners` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Partner {
    #[serde(with = "id_string")]
    pub id: DbId,
    pub name: String,
    pub category: PartnerCategory,
    #[serde(with = "option_id_string")]
    pub logo_media_id: Option<DbId>,
    pub website_url: Option<String>,
    pub is_active: bool,
    pub display_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PublicPartner {
    #[serde(with = "id_string")]
    pub id: DbId,
    pub name: String,
    pub category: PartnerCategory,
    pub website_url: Option<String>,
    pub logo_path: Option<String>,
    pub display_order: i32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePartner {
    #[validate(length(min = 1, max = 200), custom(function = "not_blank"))]
    pub name: String,
    pub category: Option<PartnerCategory>,
    #[serde(default, with = "option_id_string")]
    pub logo_media_id: Option<DbId>,
    #[validate(url)]
    pub website_url: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePartner {
    #[validate(length(min = 1, max = 200), custom(function = "not_blank"))]
    pub name: Option<String>,
    pub category: Option<PartnerCategory>,
    #[serde(default, with = "option_id_string")]
    pub logo_media_id: Option<DbId>,
    #[validate(url)]
    pub website_url: Option<String>,
    pub is_active: Option<bool>,
}

impl Normalize for CreatePartner {
    fn normalize(&mut self) {
        trim_in_place(&mut self.name);
        clear_blank(&mut self.website_url);
    }
}

impl Normalize for UpdatePartner {
    fn normalize(&mut self) {
        trim_present(&mut self.name);
        clear_blank(&mut self.website_url);
    }
}
