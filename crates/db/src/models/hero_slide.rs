//! Home page hero slide model and DTOs.

use footlights_core::types::{id_string, option_id_string, DbId, Timestamp};
use footlights_core::validation::{clear_blank, not_blank, trim_in_place, trim_present, Normalize};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A hero slide row from the `hero_slides` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HeroSlide {
    #[serde(with = "id_string")]
    pub id: DbId,
    pub title: String,
    pub subtitle: Option<String>,
    #[serde(with = "option_id_string")]
    pub image_media_id: Option<DbId>,
    pub cta_label: Option<String>,
    pub cta_url: Option<String>,
    pub is_active: bool,
    pub display_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PublicHeroSlide {
    #[serde(with = "id_string")]
    pub id: DbId,
    pub title: String,
    pub subtitle: Option<String>,
    pub image_path: Option<String>,
    pub cta_label: Option<String>,
    pub cta_url: Option<String>,
    pub display_order: i32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateHeroSlide {
    #[validate(length(min = 1, max = 200), custom(function = "not_blank"))]
    pub title: String,
    #[validate(length(max = 300))]
    pub subtitle: Option<String>,
    #[serde(default, with = "option_id_string")]
    pub image_media_id: Option<DbId>,
    #[validate(length(max = 60))]
    pub cta_label: Option<String>,
    #[validate(url)]
    pub cta_url: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateHeroSlide {
    #[validate(length(min = 1, max = 200), custom(function = "not_blank"))]
    pub title: Option<String>,
    #[validate(length(max = 300))]
    pub subtitle: Option<String>,
    #[serde(default, with = "option_id_string")]
    pub image_media_id: Option<DbId>,
    #[validate(length(max = 60))]
    pub cta_label: Option<String>,
    #[validate(url)]
    pub cta_url: Option<String>,
    pub is_active: Option<bool>,
}

impl Normalize for CreateHeroSlide {
    fn normalize(&mut self) {
        trim_in_place(&mut self.title);
        clear_blank(&mut self.subtitle);
        clear_blank(&mut self.cta_label);
        clear_blank(&mut self.cta_url);
    }
}

impl Normalize for UpdateHeroSlide {
    fn normalize(&mut self) {
        trim_present(&mut self.title);
        clear_blank(&mut self.subtitle);
        clear_blank(&mut self.cta_label);
        clear_blank(&mut self.cta_url);
    }
}
