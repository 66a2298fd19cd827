//! Venue entity model and DTOs.

use footlights_core::types::{id_string, DbId, Timestamp};
use footlights_core::validation::{clear_blank, not_blank, trim_in_place, trim_present, Normalize};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A venue row from the `venues` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Venue {
    #[serde(with = "id_string")]
    pub id: DbId,
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub capacity: Option<i32>,
    pub website_url: Option<String>,
    pub map_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateVenue {
    #[validate(length(min = 1, max = 200), custom(function = "not_blank"))]
    pub name: String,
    #[validate(length(max = 300))]
    pub address: Option<String>,
    #[validate(length(max = 120))]
    pub city: Option<String>,
    #[validate(length(max = 20))]
    pub postal_code: Option<String>,
    #[validate(length(max = 120))]
    pub country: Option<String>,
    #[validate(range(min = 1))]
    pub capacity: Option<i32>,
    #[validate(url)]
    pub website_url: Option<String>,
    #[validate(url)]
    pub map_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateVenue {
    #[validate(length(min = 1, max = 200), custom(function = "not_blank"))]
    pub name: Option<String>,
    #[validate(length(max = 300))]
    pub address: Option<String>,
    #[validate(length(max = 120))]
    pub city: Option<String>,
    #[validate(length(max = 20))]
    pub postal_code: Option<String>,
    #[validate(length(max = 120))]
    pub country: Option<String>,
    #[validate(range(min = 1))]
    pub capacity: Option<i32>,
    #[validate(url)]
    pub website_url: Option<String>,
    #[validate(url)]
    pub map_url: Option<String>,
}

impl Normalize for CreateVenue {
    fn normalize(&mut self) {
        trim_in_place(&mut self.name);
        clear_blank(&mut self.address);
        clear_blank(&mut self.city);
        clear_blank(&mut self.postal_code);
        clear_blank(&mut self.country);
        clear_blank(&mut self.website_url);
        clear_blank(&mut self.map_url);
    }
}

impl Normalize for UpdateVenue {
    fn normalize(&mut self) {
        trim_present(&mut self.name);
        clear_blank(&mut self.address);
        clear_blank(&mut self.city);
        clear_blank(&mut self.postal_code);
        clear_blank(&mut self.country);
        clear_blank(&mut self.website_url);
        clear_blank(&mut self.map_url);
    }
}
