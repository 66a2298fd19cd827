//! Team member model and DTOs.

use footlights_core::types::{id_string, option_id_string, DbId, Timestamp};
use footlights_core::validation::{clear_blank, not_blank, trim_in_place, trim_present, Normalize};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A team member row from the `team_members` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TeamMember {
    #[serde(with = "id_string")]
    pub id: DbId,
    pub name: String,
    pub role: String,
    pub bio: Option<String>,
    #[serde(with = "option_id_string")]
    pub photo_media_id: Option<DbId>,
    pub is_active: bool,
    pub display_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Active team member as shown on the company page.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PublicTeamMember {
    #[serde(with = "id_string")]
    pub id: DbId,
    pub name: String,
    pub role: String,
    pub bio: Option<String>,
    pub photo_path: Option<String>,
    pub display_order: i32,
}

/// New members are appended at the end of the ordering.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTeamMember {
    #[validate(length(min = 1, max = 120), custom(function = "not_blank"))]
    pub name: String,
    #[validate(length(min = 1, max = 120), custom(function = "not_blank"))]
    pub role: String,
    #[validate(length(max = 5000))]
    pub bio: Option<String>,
    #[serde(default, with = "option_id_string")]
    pub photo_media_id: Option<DbId>,
}

/// Activation is changed through the dedicated endpoints, not here.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTeamMember {
    #[validate(length(min = 1, max = 120), custom(function = "not_blank"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 120), custom(function = "not_blank"))]
    pub role: Option<String>,
    #[validate(length(max = 5000))]
    pub bio: Option<String>,
    #[serde(default, with = "option_id_string")]
    pub photo_media_id: Option<DbId>,
}

impl Normalize for CreateTeamMember {
    fn normalize(&mut self) {
        trim_in_place(&mut self.name);
        trim_in_place(&mut self.role);
        clear_blank(&mut self.bio);
    }
}

impl Normalize for UpdateTeamMember {
    fn normalize(&mut self) {
        trim_present(&mut self.name);
        trim_present(&mut self.role);
        clear_blank(&mut self.bio);
    }
}
