//! Repository for the `events` table.

use footlights_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::event::{AgendaEntry, CreateEvent, Event, EventListParams, UpdateEvent};
use crate::models::status::{EventStatus, ShowStatus};
use crate::{clamp_limit, clamp_offset};

const COLUMNS: &str = "id, show_id, venue_id, starts_at, ends_at, status, capacity, \
                        price_cents, ticket_url, notes, created_at, updated_at";

const AGENDA_SELECT: &str = "SELECT e.id, e.starts_at, e.ends_at, e.status, e.price_cents,
                                    e.ticket_url, s.id AS show_id, s.title AS show_title,
                                    s.slug AS show_slug, v.id AS venue_id,
                                    v.name AS venue_name, v.city AS venue_city
                             FROM events e
                             JOIN shows s ON s.id = e.show_id
                             JOIN venues v ON v.id = e.venue_id";

/// Provides CRUD operations for events.
pub struct EventRepo;

impl EventRepo {
    pub async fn create(pool: &PgPool, input: &CreateEvent) -> Result<Event, sqlx::Error> {
        let query = format!(
            "INSERT INTO events (show_id, venue_id, starts_at, ends_at, status, capacity,
                                 price_cents, ticket_url, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(input.show_id)
            .bind(input.venue_id)
            .bind(input.starts_at)
            .bind(input.ends_at)
            .bind(input.status.unwrap_or_default())
            .bind(input.capacity)
            .bind(input.price_cents)
            .bind(&input.ticket_url)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE id = $1");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Admin listing with optional filters, chronological.
    pub async fn list(pool: &PgPool, params: &EventListParams) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM events
             WHERE ($1::BIGINT IS NULL OR show_id = $1)
               AND ($2::BIGINT IS NULL OR venue_id = $2)
               AND ($3::event_status IS NULL OR status = $3)
               AND ($4::TIMESTAMPTZ IS NULL OR starts_at >= $4)
               AND ($5::TIMESTAMPTZ IS NULL OR starts_at < $5)
             ORDER BY starts_at, id
             LIMIT $6 OFFSET $7"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(params.show_id)
            .bind(params.venue_id)
            .bind(params.status)
            .bind(params.from)
            .bind(params.to)
            .bind(clamp_limit(params.limit, 100, 500))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }

    /// Scheduled events of published shows starting at or after `from`.
    pub async fn list_agenda(
        pool: &PgPool,
        from: Timestamp,
        limit: i64,
    ) -> Result<Vec<AgendaEntry>, sqlx::Error> {
        let query = format!(
            "{AGENDA_SELECT}
             WHERE e.starts_at >= $1 AND e.status = $2 AND s.status = $3
             ORDER BY e.starts_at, e.id
             LIMIT $4"
        );
        sqlx::query_as::<_, AgendaEntry>(&query)
            .bind(from)
            .bind(EventStatus::Scheduled)
            .bind(ShowStatus::Published)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Upcoming, non-cancelled events of one show for its public page.
    pub async fn list_upcoming_for_show(
        pool: &PgPool,
        show_id: DbId,
        from: Timestamp,
    ) -> Result<Vec<AgendaEntry>, sqlx::Error> {
        let query = format!(
            "{AGENDA_SELECT}
             WHERE e.show_id = $1 AND e.starts_at >= $2 AND e.status <> $3
             ORDER BY e.starts_at, e.id"
        );
        sqlx::query_as::<_, AgendaEntry>(&query)
            .bind(show_id)
            .bind(from)
            .bind(EventStatus::Cancelled)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEvent,
    ) -> Result<Option<Event>, sqlx::Error> {
        let query = format!(
            "UPDATE events SET
                venue_id = COALESCE($2, venue_id),
                starts_at = COALESCE($3, starts_at),
                ends_at = COALESCE($4, ends_at),
                status = COALESCE($5, status),
                capacity = COALESCE($6, capacity),
                price_cents = COALESCE($7, price_cents),
                ticket_url = COALESCE($8, ticket_url),
                notes = COALESCE($9, notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(input.venue_id)
            .bind(input.starts_at)
            .bind(input.ends_at)
            .bind(input.status)
            .bind(input.capacity)
            .bind(input.price_cents)
            .bind(&input.ticket_url)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
