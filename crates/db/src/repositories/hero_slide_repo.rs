//! Repository for the `hero_slides` table.

use footlights_core::ordering::Position;
use footlights_core::types::DbId;
use sqlx::PgPool;

use crate::models::hero_slide::{CreateHeroSlide, HeroSlide, PublicHeroSlide, UpdateHeroSlide};
use crate::ordering::{self, OrderingError, HERO_SLIDES};

const COLUMNS: &str = "id, title, subtitle, image_media_id, cta_label, cta_url, is_active, \
                        display_order, created_at, updated_at";

/// Provides CRUD and ordering operations for hero slides.
pub struct HeroSlideRepo;

impl HeroSlideRepo {
    /// Insert a slide at the end of the carousel.
    pub async fn create(
        pool: &PgPool,
        input: &CreateHeroSlide,
    ) -> Result<HeroSlide, OrderingError> {
        let mut tx = pool.begin().await?;
        let position = ordering::append_position(&mut tx, &HERO_SLIDES, None).await?;

        let query = format!(
            "INSERT INTO hero_slides (title, subtitle, image_media_id, cta_label, cta_url,
                                      is_active, display_order)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        let slide = sqlx::query_as::<_, HeroSlide>(&query)
            .bind(&input.title)
            .bind(&input.subtitle)
            .bind(input.image_media_id)
            .bind(&input.cta_label)
            .bind(&input.cta_url)
            .bind(input.is_active.unwrap_or(true))
            .bind(position)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(slide)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<HeroSlide>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM hero_slides WHERE id = $1");
        sqlx::query_as::<_, HeroSlide>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<HeroSlide>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM hero_slides ORDER BY display_order, id");
        sqlx::query_as::<_, HeroSlide>(&query).fetch_all(pool).await
    }

    pub async fn list_public(pool: &PgPool) -> Result<Vec<PublicHeroSlide>, sqlx::Error> {
        sqlx::query_as::<_, PublicHeroSlide>(
            "SELECT h.id, h.title, h.subtitle, m.storage_path AS image_path, h.cta_label,
                    h.cta_url, h.display_order
             FROM hero_slides h
             LEFT JOIN media m ON m.id = h.image_media_id
             WHERE h.is_active = true
             ORDER BY h.display_order, h.id",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateHeroSlide,
    ) -> Result<Option<HeroSlide>, sqlx::Error> {
        let query = format!(
            "UPDATE hero_slides SET
                title = COALESCE($2, title),
                subtitle = COALESCE($3, subtitle),
                image_media_id = COALESCE($4, image_media_id),
                cta_label = COALESCE($5, cta_label),
                cta_url = COALESCE($6, cta_url),
                is_active = COALESCE($7, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, HeroSlide>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.subtitle)
            .bind(input.image_media_id)
            .bind(&input.cta_label)
            .bind(&input.cta_url)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    pub async fn reorder(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Position>, OrderingError> {
        ordering::reorder(pool, &HERO_SLIDES, None, ids).await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, OrderingError> {
        ordering::delete_and_compact(pool, &HERO_SLIDES, None, id).await
    }
}
