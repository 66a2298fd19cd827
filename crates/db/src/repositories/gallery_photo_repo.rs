//! Repository for the `gallery_photos` table. Every operation is scoped to a show.

use footlights_core::ordering::Position;
use footlights_core::types::DbId;
use sqlx::PgPool;

use crate::models::gallery_photo::{
    CreateGalleryPhoto, GalleryPhoto, PublicGalleryPhoto, UpdateGalleryPhoto,
};
use crate::ordering::{self, OrderingError, GALLERY_PHOTOS};

const COLUMNS: &str = "id, show_id, media_id, caption, display_order, created_at, updated_at";

/// Provides CRUD and ordering operations for show galleries.
pub struct GalleryPhotoRepo;

impl GalleryPhotoRepo {
    /// Append a photo to the show's gallery.
    pub async fn create(
        pool: &PgPool,
        show_id: DbId,
        input: &CreateGalleryPhoto,
    ) -> Result<GalleryPhoto, OrderingError> {
        let mut tx = pool.begin().await?;
        let position = ordering::append_position(&mut tx, &GALLERY_PHOTOS, Some(show_id)).await?;

        let query = format!(
            "INSERT INTO gallery_photos (show_id, media_id, caption, display_order)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let photo = sqlx::query_as::<_, GalleryPhoto>(&query)
            .bind(show_id)
            .bind(input.media_id)
            .bind(&input.caption)
            .bind(position)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(photo)
    }

    /// Find a photo by id within one show's gallery.
    pub async fn find_in_show(
        pool: &PgPool,
        show_id: DbId,
        id: DbId,
    ) -> Result<Option<GalleryPhoto>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM gallery_photos WHERE id = $1 AND show_id = $2");
        sqlx::query_as::<_, GalleryPhoto>(&query)
            .bind(id)
            .bind(show_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_for_show(
        pool: &PgPool,
        show_id: DbId,
    ) -> Result<Vec<GalleryPhoto>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM gallery_photos WHERE show_id = $1 ORDER BY display_order, id"
        );
        sqlx::query_as::<_, GalleryPhoto>(&query)
            .bind(show_id)
            .fetch_all(pool)
            .await
    }

    pub async fn list_public_for_show(
        pool: &PgPool,
        show_id: DbId,
    ) -> Result<Vec<PublicGalleryPhoto>, sqlx::Error> {
        sqlx::query_as::<_, PublicGalleryPhoto>(
            "SELECT g.id, g.caption, m.storage_path AS image_path, m.alt_text, m.width,
                    m.height, g.display_order
             FROM gallery_photos g
             JOIN media m ON m.id = g.media_id
             WHERE g.show_id = $1
             ORDER BY g.display_order, g.id",
        )
        .bind(show_id)
        .fetch_all(pool)
        .await
    }

    pub async fn update(
        pool: &PgPool,
        show_id: DbId,
        id: DbId,
        input: &UpdateGalleryPhoto,
    ) -> Result<Option<GalleryPhoto>, sqlx::Error> {
        let query = format!(
            "UPDATE gallery_photos SET caption = COALESCE($3, caption)
             WHERE id = $1 AND show_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GalleryPhoto>(&query)
            .bind(id)
            .bind(show_id)
            .bind(&input.caption)
            .fetch_optional(pool)
            .await
    }

    pub async fn reorder(
        pool: &PgPool,
        show_id: DbId,
        ids: &[DbId],
    ) -> Result<Vec<Position>, OrderingError> {
        ordering::reorder(pool, &GALLERY_PHOTOS, Some(show_id), ids).await
    }

    pub async fn delete(pool: &PgPool, show_id: DbId, id: DbId) -> Result<bool, OrderingError> {
        ordering::delete_and_compact(pool, &GALLERY_PHOTOS, Some(show_id), id).await
    }
}
