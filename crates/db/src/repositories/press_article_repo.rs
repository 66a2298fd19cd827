//! Repository for the `press_articles` table.

use footlights_core::types::DbId;
use sqlx::PgPool;

use crate::models::press::{CreatePressArticle, PressArticle, UpdatePressArticle};

const COLUMNS: &str = "id, title, outlet, url, author, published_on, excerpt, show_id, \
                        created_at, updated_at";

pub struct PressArticleRepo;

impl PressArticleRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreatePressArticle,
    ) -> Result<PressArticle, sqlx::Error> {
        let query = format!(
            "INSERT INTO press_articles (title, outlet, url, author, published_on, excerpt, show_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PressArticle>(&query)
            .bind(&input.title)
            .bind(&input.outlet)
            .bind(&input.url)
            .bind(&input.author)
            .bind(input.published_on)
            .bind(&input.excerpt)
            .bind(input.show_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PressArticle>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM press_articles WHERE id = $1");
        sqlx::query_as::<_, PressArticle>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Most recent coverage first; undated articles last.
    pub async fn list(pool: &PgPool) -> Result<Vec<PressArticle>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM press_articles
             ORDER BY published_on DESC NULLS LAST, id DESC"
        );
        sqlx::query_as::<_, PressArticle>(&query).fetch_all(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePressArticle,
    ) -> Result<Option<PressArticle>, sqlx::Error> {
        let query = format!(
            "UPDATE press_articles SET
                title = COALESCE($2, title),
                outlet = COALESCE($3, outlet),
                url = COALESCE($4, url),
                author = COALESCE($5, author),
                published_on = COALESCE($6, published_on),
                excerpt = COALESCE($7, excerpt),
                show_id = COALESCE($8, show_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PressArticle>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.outlet)
            .bind(&input.url)
            .bind(&input.author)
            .bind(input.published_on)
            .bind(&input.excerpt)
            .bind(input.show_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM press_articles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
