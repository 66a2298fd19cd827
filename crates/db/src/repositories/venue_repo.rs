//! Repository for the `venues` table.

use footlights_core::types::DbId;
use sqlx::PgPool;

use crate::models::venue::{CreateVenue, UpdateVenue, Venue};

const COLUMNS: &str = "id, name, address, city, postal_code, country, capacity, \
                        website_url, map_url, created_at, updated_at";

/// Provides CRUD operations for venues.
pub struct VenueRepo;

impl VenueRepo {
    pub async fn create(pool: &PgPool, input: &CreateVenue) -> Result<Venue, sqlx::Error> {
        let query = format!(
            "INSERT INTO venues (name, address, city, postal_code, country, capacity,
                                 website_url, map_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Venue>(&query)
            .bind(&input.name)
            .bind(&input.address)
            .bind(&input.city)
            .bind(&input.postal_code)
            .bind(&input.country)
            .bind(input.capacity)
            .bind(&input.website_url)
            .bind(&input.map_url)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Venue>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM venues WHERE id = $1");
        sqlx::query_as::<_, Venue>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Venue>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM venues ORDER BY name, id");
        sqlx::query_as::<_, Venue>(&query).fetch_all(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateVenue,
    ) -> Result<Option<Venue>, sqlx::Error> {
        let query = format!(
            "UPDATE venues SET
                name = COALESCE($2, name),
                address = COALESCE($3, address),
                city = COALESCE($4, city),
                postal_code = COALESCE($5, postal_code),
                country = COALESCE($6, country),
                capacity = COALESCE($7, capacity),
                website_url = COALESCE($8, website_url),
                map_url = COALESCE($9, map_url)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Venue>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.address)
            .bind(&input.city)
            .bind(&input.postal_code)
            .bind(&input.country)
            .bind(input.capacity)
            .bind(&input.website_url)
            .bind(&input.map_url)
            .fetch_optional(pool)
            .await
    }

    /// Delete a venue. Fails with a foreign key violation while events use it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM venues WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
