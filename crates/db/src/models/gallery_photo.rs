//! Show gallery photo model and DTOs. Ordering is scoped per show.

use footlights_core::types::{id_string, DbId, Timestamp};
use footlights_core::validation::{clear_blank, Normalize};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A gallery photo row from the `gallery_photos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GalleryPhoto {
    #[serde(with = "id_string")]
    pub id: DbId,
    #[serde(with = "id_string")]
    pub show_id: DbId,
    #[serde(with = "id_string")]
    pub media_id: DbId,
    pub caption: Option<String>,
    pub display_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Gallery photo joined with its media for the public show page.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PublicGalleryPhoto {
    #[serde(with = "id_string")]
    pub id: DbId,
    pub caption: Option<String>,
    pub image_path: String,
    pub alt_text: Option<String>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub display_order: i32,
}

/// The show comes from the route, not the body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGalleryPhoto {
    #[serde(with = "id_string")]
    pub media_id: DbId,
    #[validate(length(max = 300))]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateGalleryPhoto {
    #[validate(length(max = 300))]
    pub caption: Option<String>,
}

impl Normalize for CreateGalleryPhoto {
    fn normalize(&mut self) {
        clear_blank(&mut self.caption);
    }
}

impl Normalize for UpdateGalleryPhoto {
    fn normalize(&mut self) {
        clear_blank(&mut self.caption);
    }
}
