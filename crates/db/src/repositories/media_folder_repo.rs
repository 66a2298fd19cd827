//! Repository for the `media_folders` table.

use footlights_core::types::DbId;
use sqlx::PgPool;

use crate::models::media::{CreateMediaFolder, MediaFolder, UpdateMediaFolder};

const COLUMNS: &str = "id, name, parent_id, created_at, updated_at";

pub struct MediaFolderRepo;

impl MediaFolderRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateMediaFolder,
    ) -> Result<MediaFolder, sqlx::Error> {
        let query = format!(
            "INSERT INTO media_folders (name, parent_id) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MediaFolder>(&query)
            .bind(input.name.trim())
            .bind(input.parent_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MediaFolder>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM media_folders WHERE id = $1");
        sqlx::query_as::<_, MediaFolder>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<MediaFolder>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM media_folders ORDER BY name, id");
        sqlx::query_as::<_, MediaFolder>(&query).fetch_all(pool).await
    }

    pub async fn rename(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMediaFolder,
    ) -> Result<Option<MediaFolder>, sqlx::Error> {
        let query = format!("UPDATE media_folders SET name = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, MediaFolder>(&query)
            .bind(id)
            .bind(input.name.trim())
            .fetch_optional(pool)
            .await
    }

    /// Delete a folder and its subfolders. Media inside is kept, unfiled.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM media_folders WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
