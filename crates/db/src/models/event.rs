//! Event (single performance) model and DTOs.

use footlights_core::types::{id_string, option_id_string, DbId, Timestamp};
use footlights_core::validation::{clear_blank, Normalize};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::status::EventStatus;

/// An event row from the `events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Event {
    #[serde(with = "id_string")]
    pub id: DbId,
    #[serde(with = "id_string")]
    pub show_id: DbId,
    #[serde(with = "id_string")]
    pub venue_id: DbId,
    pub starts_at: Timestamp,
    pub ends_at: Option<Timestamp>,
    pub status: EventStatus,
    pub capacity: Option<i32>,
    pub price_cents: Option<i32>,
    pub ticket_url: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Agenda entry joined with its show and venue for the public site.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AgendaEntry {
    #[serde(with = "id_string")]
    pub id: DbId,
    pub starts_at: Timestamp,
    pub ends_at: Option<Timestamp>,
    pub status: EventStatus,
    pub price_cents: Option<i32>,
    pub ticket_url: Option<String>,
    #[serde(with = "id_string")]
    pub show_id: DbId,
    pub show_title: String,
    pub show_slug: String,
    #[serde(with = "id_string")]
    pub venue_id: DbId,
    pub venue_name: String,
    pub venue_city: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEvent {
    #[serde(with = "id_string")]
    pub show_id: DbId,
    #[serde(with = "id_string")]
    pub venue_id: DbId,
    pub starts_at: Timestamp,
    pub ends_at: Option<Timestamp>,
    pub status: Option<EventStatus>,
    #[validate(range(min = 1))]
    pub capacity: Option<i32>,
    #[validate(range(min = 0, max = 1_000_000))]
    pub price_cents: Option<i32>,
    #[validate(url)]
    pub ticket_url: Option<String>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

/// Patch for an event. The owning show cannot change.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateEvent {
    #[serde(default, with = "option_id_string")]
    pub venue_id: Option<DbId>,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
    pub status: Option<EventStatus>,
    #[validate(range(min = 1))]
    pub capacity: Option<i32>,
    #[validate(range(min = 0, max = 1_000_000))]
    pub price_cents: Option<i32>,
    #[validate(url)]
    pub ticket_url: Option<String>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

/// Query parameters for event listings.
#[derive(Debug, Default, Deserialize)]
pub struct EventListParams {
    #[serde(default, with = "option_id_string")]
    pub show_id: Option<DbId>,
    #[serde(default, with = "option_id_string")]
    pub venue_id: Option<DbId>,
    pub status: Option<EventStatus>,
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl Normalize for CreateEvent {
    fn normalize(&mut self) {
        clear_blank(&mut self.ticket_url);
        clear_blank(&mut self.notes);
    }
}

impl Normalize for UpdateEvent {
    fn normalize(&mut self) {
        clear_blank(&mut self.ticket_url);
        clear_blank(&mut self.notes);
    }
}
