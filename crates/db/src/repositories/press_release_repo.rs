//! Repository for the `press_releases` table.

use footlights_core::types::DbId;
use sqlx::PgPool;

use crate::models::press::{
    CreatePressRelease, PressRelease, PublicPressRelease, UpdatePressRelease,
};

const COLUMNS: &str = "id, title, slug, summary, body, release_date, pdf_media_id, \
                        is_published, created_at, updated_at";

const PUBLIC_SELECT: &str = "SELECT r.id, r.title, r.slug, r.summary, r.body, r.release_date,
                                    m.storage_path AS pdf_path
                             FROM press_releases r
                             LEFT JOIN media m ON m.id = r.pdf_media_id";

pub struct PressReleaseRepo;

impl PressReleaseRepo {
    /// Insert a release with an already resolved slug.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePressRelease,
        slug: &str,
    ) -> Result<PressRelease, sqlx::Error> {
        let query = format!(
            "INSERT INTO press_releases (title, slug, summary, body, release_date,
                                         pdf_media_id, is_published)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PressRelease>(&query)
            .bind(&input.title)
            .bind(slug)
            .bind(&input.summary)
            .bind(&input.body)
            .bind(input.release_date)
            .bind(input.pdf_media_id)
            .bind(input.is_published.unwrap_or(false))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PressRelease>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM press_releases WHERE id = $1");
        sqlx::query_as::<_, PressRelease>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<PressRelease>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM press_releases ORDER BY release_date DESC, id DESC");
        sqlx::query_as::<_, PressRelease>(&query).fetch_all(pool).await
    }

    pub async fn list_published(pool: &PgPool) -> Result<Vec<PublicPressRelease>, sqlx::Error> {
        let query = format!(
            "{PUBLIC_SELECT}
             WHERE r.is_published = true
             ORDER BY r.release_date DESC, r.id DESC"
        );
        sqlx::query_as::<_, PublicPressRelease>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn find_published_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<PublicPressRelease>, sqlx::Error> {
        let query = format!("{PUBLIC_SELECT} WHERE r.slug = $1 AND r.is_published = true");
        sqlx::query_as::<_, PublicPressRelease>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePressRelease,
    ) -> Result<Option<PressRelease>, sqlx::Error> {
        let query = format!(
            "UPDATE press_releases SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                summary = COALESCE($4, summary),
                body = COALESCE($5, body),
                release_date = COALESCE($6, release_date),
                pdf_media_id = COALESCE($7, pdf_media_id),
                is_published = COALESCE($8, is_published)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PressRelease>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.summary)
            .bind(&input.body)
            .bind(input.release_date)
            .bind(input.pdf_media_id)
            .bind(input.is_published)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM press_releases WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
