//! Repository for the `shows` table.

use footlights_core::types::DbId;
use sqlx::PgPool;

use crate::models::show::{CreateShow, PublicShow, Show, ShowListParams, UpdateShow};
use crate::models::status::ShowStatus;
use crate::{clamp_limit, clamp_offset};

const COLUMNS: &str = "id, title, slug, subtitle, description, status, premiere_date, \
                        closing_date, duration_minutes, poster_media_id, created_at, updated_at";

const PUBLIC_COLUMNS: &str = "s.id, s.title, s.slug, s.subtitle, s.description, \
                              s.premiere_date, s.closing_date, s.duration_minutes, \
                              m.storage_path AS poster_path";

/// Provides CRUD operations for shows.
pub struct ShowRepo;

impl ShowRepo {
    /// Insert a new show with an already resolved slug.
    pub async fn create(pool: &PgPool, input: &CreateShow, slug: &str) -> Result<Show, sqlx::Error> {
        let query = format!(
            "INSERT INTO shows (title, slug, subtitle, description, status, premiere_date,
                                closing_date, duration_minutes, poster_media_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Show>(&query)
            .bind(&input.title)
            .bind(slug)
            .bind(&input.subtitle)
            .bind(&input.description)
            .bind(input.status.unwrap_or_default())
            .bind(input.premiere_date)
            .bind(input.closing_date)
            .bind(input.duration_minutes)
            .bind(input.poster_media_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Show>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM shows WHERE id = $1");
        sqlx::query_as::<_, Show>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Admin listing, newest premiere first.
    pub async fn list(pool: &PgPool, params: &ShowListParams) -> Result<Vec<Show>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM shows
             WHERE ($1::show_status IS NULL OR status = $1)
               AND ($2::TEXT IS NULL OR title ILIKE '%' || $2 || '%')
             ORDER BY premiere_date DESC NULLS LAST, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Show>(&query)
            .bind(params.status)
            .bind(&params.search)
            .bind(clamp_limit(params.limit, 50, 200))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }

    /// Published shows for the public site, upcoming and current first.
    pub async fn list_published(pool: &PgPool) -> Result<Vec<PublicShow>, sqlx::Error> {
        let query = format!(
            "SELECT {PUBLIC_COLUMNS}
             FROM shows s
             LEFT JOIN media m ON m.id = s.poster_media_id
             WHERE s.status = $1
             ORDER BY s.premiere_date DESC NULLS LAST, s.id DESC"
        );
        sqlx::query_as::<_, PublicShow>(&query)
            .bind(ShowStatus::Published)
            .fetch_all(pool)
            .await
    }

    /// A published show by slug; drafts and archived shows are not found.
    pub async fn find_published_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<PublicShow>, sqlx::Error> {
        let query = format!(
            "SELECT {PUBLIC_COLUMNS}
             FROM shows s
             LEFT JOIN media m ON m.id = s.poster_media_id
             WHERE s.slug = $1 AND s.status = $2"
        );
        sqlx::query_as::<_, PublicShow>(&query)
            .bind(slug)
            .bind(ShowStatus::Published)
            .fetch_optional(pool)
            .await
    }

    /// Update a show. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateShow,
    ) -> Result<Option<Show>, sqlx::Error> {
        let query = format!(
            "UPDATE shows SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                subtitle = COALESCE($4, subtitle),
                description = COALESCE($5, description),
                status = COALESCE($6, status),
                premiere_date = COALESCE($7, premiere_date),
                closing_date = COALESCE($8, closing_date),
                duration_minutes = COALESCE($9, duration_minutes),
                poster_media_id = COALESCE($10, poster_media_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Show>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.subtitle)
            .bind(&input.description)
            .bind(input.status)
            .bind(input.premiere_date)
            .bind(input.closing_date)
            .bind(input.duration_minutes)
            .bind(input.poster_media_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a show together with its events and gallery.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM shows WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
