//! Media library models: uploaded files and the folders that group them.

use footlights_core::types::{id_string, option_id_string, DbId, Timestamp};
use footlights_core::validation::{
    clear_blank, normalize_tags, not_blank, tag_list, trim_in_place, Normalize,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A media row from the `media` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Media {
    #[serde(with = "id_string")]
    pub id: DbId,
    #[serde(with = "option_id_string")]
    pub folder_id: Option<DbId>,
    pub file_name: String,
    /// Key inside the media store, e.g. `2025/03/9f1c...-poster.jpg`.
    pub storage_path: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub alt_text: Option<String>,
    pub tags: Vec<String>,
    #[serde(with = "option_id_string")]
    pub uploaded_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a media row after the file has been stored.
#[derive(Debug, Clone)]
pub struct CreateMedia {
    pub folder_id: Option<DbId>,
    pub file_name: String,
    pub storage_path: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub alt_text: Option<String>,
    pub tags: Vec<String>,
    pub uploaded_by: Option<DbId>,
}

/// Metadata patch. The file itself is immutable; upload a new one instead.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateMedia {
    #[serde(default, with = "option_id_string")]
    pub folder_id: Option<DbId>,
    #[validate(length(max = 300))]
    pub alt_text: Option<String>,
    #[validate(custom(function = "tag_list"))]
    pub tags: Option<Vec<String>>,
}

/// Query parameters for the media library listing.
#[derive(Debug, Default, Deserialize)]
pub struct MediaListParams {
    #[serde(default, with = "option_id_string")]
    pub folder_id: Option<DbId>,
    pub tag: Option<String>,
    /// Prefix match on the mime type, e.g. `image/`.
    pub mime: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// A folder row from the `media_folders` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MediaFolder {
    #[serde(with = "id_string")]
    pub id: DbId,
    pub name: String,
    #[serde(with = "option_id_string")]
    pub parent_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMediaFolder {
    #[validate(length(min = 1, max = 120), custom(function = "not_blank"))]
    pub name: String,
    #[serde(default, with = "option_id_string")]
    pub parent_id: Option<DbId>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateMediaFolder {
    #[validate(length(min = 1, max = 120), custom(function = "not_blank"))]
    pub name: String,
}

impl Normalize for UpdateMedia {
    fn normalize(&mut self) {
        clear_blank(&mut self.alt_text);
        if let Some(tags) = &mut self.tags {
            *tags = normalize_tags(tags);
        }
    }
}

impl Normalize for CreateMediaFolder {
    fn normalize(&mut self) {
        trim_in_place(&mut self.name);
    }
}

impl Normalize for UpdateMediaFolder {
    fn normalize(&mut self) {
        trim_in_place(&mut self.name);
    }
}
