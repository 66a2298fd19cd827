//! Repository for the `media` table.

use footlights_core::types::DbId;
use sqlx::PgPool;

use crate::models::media::{CreateMedia, Media, MediaListParams, UpdateMedia};
use crate::ordering::{self, GALLERY_PHOTOS};
use crate::{clamp_limit, clamp_offset};

const COLUMNS: &str = "id, folder_id, file_name, storage_path, mime_type, size_bytes, width, \
                        height, alt_text, tags, uploaded_by, created_at, updated_at";

/// Provides CRUD operations for media items.
pub struct MediaRepo;

impl MediaRepo {
    pub async fn create(pool: &PgPool, input: &CreateMedia) -> Result<Media, sqlx::Error> {
        let query = format!(
            "INSERT INTO media (folder_id, file_name, storage_path, mime_type, size_bytes,
                                width, height, alt_text, tags, uploaded_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Media>(&query)
            .bind(input.folder_id)
            .bind(&input.file_name)
            .bind(&input.storage_path)
            .bind(&input.mime_type)
            .bind(input.size_bytes)
            .bind(input.width)
            .bind(input.height)
            .bind(&input.alt_text)
            .bind(&input.tags)
            .bind(input.uploaded_by)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Media>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM media WHERE id = $1");
        sqlx::query_as::<_, Media>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Newest first, filtered by folder, tag and mime prefix.
    pub async fn list(pool: &PgPool, params: &MediaListParams) -> Result<Vec<Media>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM media
             WHERE ($1::BIGINT IS NULL OR folder_id = $1)
               AND ($2::TEXT IS NULL OR $2 = ANY(tags))
               AND ($3::TEXT IS NULL OR starts_with(mime_type, $3))
             ORDER BY created_at DESC, id DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Media>(&query)
            .bind(params.folder_id)
            .bind(params.tag.as_deref().map(|t| t.trim().to_lowercase()))
            .bind(&params.mime)
            .bind(clamp_limit(params.limit, 50, 200))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }

    /// Update metadata. Tags, when given, must already be normalized.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMedia,
    ) -> Result<Option<Media>, sqlx::Error> {
        let query = format!(
            "UPDATE media SET
                folder_id = COALESCE($2, folder_id),
                alt_text = COALESCE($3, alt_text),
                tags = COALESCE($4, tags)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Media>(&query)
            .bind(id)
            .bind(input.folder_id)
            .bind(&input.alt_text)
            .bind(&input.tags)
            .fetch_optional(pool)
            .await
    }

    /// Delete a media row, returning it so the caller can remove the file.
    ///
    /// Gallery photos using the item are removed by cascade; each affected
    /// gallery is recompacted in the same transaction.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Media>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let show_ids: Vec<DbId> = sqlx::query_scalar(
            "SELECT DISTINCT show_id FROM gallery_photos WHERE media_id = $1 ORDER BY show_id",
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;
        for &show_id in &show_ids {
            ordering::lock_scope(&mut tx, &GALLERY_PHOTOS, Some(show_id)).await?;
        }

        let query = format!("DELETE FROM media WHERE id = $1 RETURNING {COLUMNS}");
        let deleted = sqlx::query_as::<_, Media>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if deleted.is_none() {
            return Ok(None);
        }

        for &show_id in &show_ids {
            ordering::compact(&mut tx, &GALLERY_PHOTOS, Some(show_id)).await?;
        }

        tx.commit().await?;
        Ok(deleted)
    }
}
