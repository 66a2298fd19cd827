//! Repository for the `partners` table.

use footlights_core::ordering::Position;
use footlights_core::types::DbId;
use sqlx::PgPool;

use crate::models::partner::{CreatePartner, Partner, PublicPartner, UpdatePartner};
use crate::ordering::{self, OrderingError, PARTNERS};

const COLUMNS: &str = "id, name, category, logo_media_id, website_url, is_active, \
                        display_order, created_at, updated_at";

/// Provides CRUD and ordering operations for partners.
pub struct PartnerRepo;

impl PartnerRepo {
    /// Insert a partner at the end of the ordering.
    pub async fn create(pool: &PgPool, input: &CreatePartner) -> Result<Partner, OrderingError> {
        let mut tx = pool.begin().await?;
        let position = ordering::append_position(&mut tx, &PARTNERS, None).await?;

        let query = format!(
            "INSERT INTO partners (name, category, logo_media_id, website_url, is_active,
                                   display_order)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let partner = sqlx::query_as::<_, Partner>(&query)
            .bind(&input.name)
            .bind(input.category.unwrap_or_default())
            .bind(input.logo_media_id)
            .bind(&input.website_url)
            .bind(input.is_active.unwrap_or(true))
            .bind(position)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(partner)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Partner>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM partners WHERE id = $1");
        sqlx::query_as::<_, Partner>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Partner>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM partners ORDER BY display_order, id");
        sqlx::query_as::<_, Partner>(&query).fetch_all(pool).await
    }

    pub async fn list_public(pool: &PgPool) -> Result<Vec<PublicPartner>, sqlx::Error> {
        sqlx::query_as::<_, PublicPartner>(
            "SELECT p.id, p.name, p.category, p.website_url, m.storage_path AS logo_path,
                    p.display_order
             FROM partners p
             LEFT JOIN media m ON m.id = p.logo_media_id
             WHERE p.is_active = true
             ORDER BY p.display_order, p.id",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePartner,
    ) -> Result<Option<Partner>, sqlx::Error> {
        let query = format!(
            "UPDATE partners SET
                name = COALESCE($2, name),
                category = COALESCE($3, category),
                logo_media_id = COALESCE($4, logo_media_id),
                website_url = COALESCE($5, website_url),
                is_active = COALESCE($6, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Partner>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.category)
            .bind(input.logo_media_id)
            .bind(&input.website_url)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    pub async fn reorder(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Position>, OrderingError> {
        ordering::reorder(pool, &PARTNERS, None, ids).await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, OrderingError> {
        ordering::delete_and_compact(pool, &PARTNERS, None, id).await
    }
}
