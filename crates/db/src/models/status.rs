//! Status enums backed by PostgreSQL `ENUM` types.
//!
//! Variant names must match the labels created in the migrations.

use serde::{Deserialize, Serialize};

/// Publication state of a show (`show_status`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "show_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ShowStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl ShowStatus {
    /// Whether shows in this state appear on the public site.
    pub fn is_public(self) -> bool {
        self == ShowStatus::Published
    }
}

/// State of a single performance (`event_status`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "event_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    #[default]
    Scheduled,
    Cancelled,
    Completed,
}

impl EventStatus {
    /// Completed is terminal; a cancelled event may be rescheduled.
    pub fn can_transition_to(self, next: EventStatus) -> bool {
        match (self, next) {
            (a, b) if a == b => true,
            (EventStatus::Completed, _) => false,
            (EventStatus::Scheduled, _) => true,
            (EventStatus::Cancelled, EventStatus::Scheduled) => true,
            (EventStatus::Cancelled, _) => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EventStatus::Scheduled => "scheduled",
            EventStatus::Cancelled => "cancelled",
            EventStatus::Completed => "completed",
        }
    }
}

/// Grouping used on the partners page (`partner_category`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "partner_category", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PartnerCategory {
    Institutional,
    #[default]
    Sponsor,
    Media,
    Venue,
}
