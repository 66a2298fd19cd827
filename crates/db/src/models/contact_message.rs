//! Contact form submissions.

use footlights_core::types::{id_string, DbId, Timestamp};
use footlights_core::validation::{
    clear_blank, normalize_email, not_blank, trim_in_place, Normalize,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A message row from the `contact_messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContactMessage {
    #[serde(with = "id_string")]
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    pub is_read: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Public contact form payload.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateContactMessage {
    #[validate(length(min = 1, max = 120), custom(function = "not_blank"))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 40))]
    pub phone: Option<String>,
    #[validate(length(max = 200))]
    pub subject: Option<String>,
    #[validate(length(min = 1, max = 5000), custom(function = "not_blank"))]
    pub message: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ContactMessageListParams {
    pub unread_only: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl Normalize for CreateContactMessage {
    fn normalize(&mut self) {
        trim_in_place(&mut self.name);
        normalize_email(&mut self.email);
        clear_blank(&mut self.phone);
        clear_blank(&mut self.subject);
        trim_in_place(&mut self.message);
    }
}
