//! Show entity model and DTOs.

use footlights_core::types::{id_string, option_id_string, Date, DbId, Timestamp};
use footlights_core::validation::{
    clear_blank, not_blank, slug_format, trim_in_place, trim_present, Normalize,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::status::ShowStatus;

/// A show row from the `shows` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Show {
    #[serde(with = "id_string")]
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub status: ShowStatus,
    pub premiere_date: Option<Date>,
    pub closing_date: Option<Date>,
    pub duration_minutes: Option<i32>,
    #[serde(with = "option_id_string")]
    pub poster_media_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Published show as listed on the public site.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PublicShow {
    #[serde(with = "id_string")]
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub premiere_date: Option<Date>,
    pub closing_date: Option<Date>,
    pub duration_minutes: Option<i32>,
    /// Storage key of the poster image, if any.
    pub poster_path: Option<String>,
}

/// DTO for creating a new show. The slug is derived from the title when omitted.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateShow {
    #[validate(length(min = 1, max = 200), custom(function = "not_blank"))]
    pub title: String,
    #[validate(custom(function = "slug_format"))]
    pub slug: Option<String>,
    #[validate(length(max = 300))]
    pub subtitle: Option<String>,
    #[validate(length(max = 20000))]
    pub description: Option<String>,
    pub status: Option<ShowStatus>,
    pub premiere_date: Option<Date>,
    pub closing_date: Option<Date>,
    #[validate(range(min = 1, max = 600))]
    pub duration_minutes: Option<i32>,
    #[serde(default, with = "option_id_string")]
    pub poster_media_id: Option<DbId>,
}

/// DTO for updating an existing show. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateShow {
    #[validate(length(min = 1, max = 200), custom(function = "not_blank"))]
    pub title: Option<String>,
    #[validate(custom(function = "slug_format"))]
    pub slug: Option<String>,
    #[validate(length(max = 300))]
    pub subtitle: Option<String>,
    #[validate(length(max = 20000))]
    pub description: Option<String>,
    pub status: Option<ShowStatus>,
    pub premiere_date: Option<Date>,
    pub closing_date: Option<Date>,
    #[validate(range(min = 1, max = 600))]
    pub duration_minutes: Option<i32>,
    #[serde(default, with = "option_id_string")]
    pub poster_media_id: Option<DbId>,
}

/// Query parameters for the admin show list.
#[derive(Debug, Default, Deserialize)]
pub struct ShowListParams {
    pub status: Option<ShowStatus>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl Normalize for CreateShow {
    fn normalize(&mut self) {
        trim_in_place(&mut self.title);
        trim_present(&mut self.slug);
        clear_blank(&mut self.subtitle);
        clear_blank(&mut self.description);
    }
}

impl Normalize for UpdateShow {
    fn normalize(&mut self) {
        trim_present(&mut self.title);
        trim_present(&mut self.slug);
        clear_blank(&mut self.subtitle);
        clear_blank(&mut self.description);
    }
}
