//! Press releases (authored by the company) and press articles (external coverage).

use footlights_core::types::{id_string, option_id_string, Date, DbId, Timestamp};
use footlights_core::validation::{
    clear_blank, not_blank, slug_format, trim_in_place, trim_present, Normalize,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A press release row from the `press_releases` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PressRelease {
    #[serde(with = "id_string")]
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub summary: Option<String>,
    pub body: Option<String>,
    pub release_date: Date,
    #[serde(with = "option_id_string")]
    pub pdf_media_id: Option<DbId>,
    pub is_published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Published release with its PDF location resolved.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PublicPressRelease {
    #[serde(with = "id_string")]
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub summary: Option<String>,
    pub body: Option<String>,
    pub release_date: Date,
    pub pdf_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePressRelease {
    #[validate(length(min = 1, max = 200), custom(function = "not_blank"))]
    pub title: String,
    #[validate(custom(function = "slug_format"))]
    pub slug: Option<String>,
    #[validate(length(max = 1000))]
    pub summary: Option<String>,
    #[validate(length(max = 50000))]
    pub body: Option<String>,
    pub release_date: Date,
    #[serde(default, with = "option_id_string")]
    pub pdf_media_id: Option<DbId>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePressRelease {
    #[validate(length(min = 1, max = 200), custom(function = "not_blank"))]
    pub title: Option<String>,
    #[validate(custom(function = "slug_format"))]
    pub slug: Option<String>,
    #[validate(length(max = 1000))]
    pub summary: Option<String>,
    #[validate(length(max = 50000))]
    pub body: Option<String>,
    pub release_date: Option<Date>,
    #[serde(default, with = "option_id_string")]
    pub pdf_media_id: Option<DbId>,
    pub is_published: Option<bool>,
}

/// A press article row from the `press_articles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PressArticle {
    #[serde(with = "id_string")]
    pub id: DbId,
    pub title: String,
    pub outlet: String,
    pub url: String,
    pub author: Option<String>,
    pub published_on: Option<Date>,
    pub excerpt: Option<String>,
    #[serde(with = "option_id_string")]
    pub show_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePressArticle {
    #[validate(length(min = 1, max = 300), custom(function = "not_blank"))]
    pub title: String,
    #[validate(length(min = 1, max = 200), custom(function = "not_blank"))]
    pub outlet: String,
    #[validate(url)]
    pub url: String,
    #[validate(length(max = 200))]
    pub author: Option<String>,
    pub published_on: Option<Date>,
    #[validate(length(max = 2000))]
    pub excerpt: Option<String>,
    #[serde(default, with = "option_id_string")]
    pub show_id: Option<DbId>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePressArticle {
    #[validate(length(min = 1, max = 300), custom(function = "not_blank"))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 200), custom(function = "not_blank"))]
    pub outlet: Option<String>,
    #[validate(url)]
    pub url: Option<String>,
    #[validate(length(max = 200))]
    pub author: Option<String>,
    pub published_on: Option<Date>,
    #[validate(length(max = 2000))]
    pub excerpt: Option<String>,
    #[serde(default, with = "option_id_string")]
    pub show_id: Option<DbId>,
}

impl Normalize for CreatePressRelease {
    fn normalize(&mut self) {
        trim_in_place(&mut self.title);
        trim_present(&mut self.slug);
        clear_blank(&mut self.summary);
        clear_blank(&mut self.body);
    }
}

impl Normalize for UpdatePressRelease {
    fn normalize(&mut self) {
        trim_present(&mut self.title);
        trim_present(&mut self.slug);
        clear_blank(&mut self.summary);
        clear_blank(&mut self.body);
    }
}

impl Normalize for CreatePressArticle {
    fn normalize(&mut self) {
        trim_in_place(&mut self.title);
        trim_in_place(&mut self.outlet);
        trim_in_place(&mut self.url);
        clear_blank(&mut self.author);
        clear_blank(&mut self.excerpt);
    }
}

impl Normalize for UpdatePressArticle {
    fn normalize(&mut self) {
        trim_present(&mut self.title);
        trim_present(&mut self.outlet);
        trim_present(&mut self.url);
        clear_blank(&mut self.author);
        clear_blank(&mut self.excerpt);
    }
}
