//! Repository for the `team_members` table.
//!
//! Membership changes go through [`crate::ordering`] so positions stay dense.

use footlights_core::error::CoreError;
use footlights_core::ordering::Position;
use footlights_core::team::ensure_deletable;
use footlights_core::types::DbId;
use sqlx::PgPool;

use crate::models::team_member::{
    CreateTeamMember, PublicTeamMember, TeamMember, UpdateTeamMember,
};
use crate::ordering::{self, OrderingError, TEAM_MEMBERS};

const COLUMNS: &str = "id, name, role, bio, photo_media_id, is_active, display_order, \
                        created_at, updated_at";

/// Provides CRUD and ordering operations for team members.
pub struct TeamMemberRepo;

impl TeamMemberRepo {
    /// Insert a member at the end of the ordering.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTeamMember,
    ) -> Result<TeamMember, OrderingError> {
        let mut tx = pool.begin().await?;
        let position = ordering::append_position(&mut tx, &TEAM_MEMBERS, None).await?;

        let query = format!(
            "INSERT INTO team_members (name, role, bio, photo_media_id, display_order)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let member = sqlx::query_as::<_, TeamMember>(&query)
            .bind(&input.name)
            .bind(&input.role)
            .bind(&input.bio)
            .bind(input.photo_media_id)
            .bind(position)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(member)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TeamMember>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM team_members WHERE id = $1");
        sqlx::query_as::<_, TeamMember>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All members, active or not, in display order.
    pub async fn list(pool: &PgPool) -> Result<Vec<TeamMember>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM team_members ORDER BY display_order, id");
        sqlx::query_as::<_, TeamMember>(&query).fetch_all(pool).await
    }

    /// Active members for the public company page.
    pub async fn list_public(pool: &PgPool) -> Result<Vec<PublicTeamMember>, sqlx::Error> {
        sqlx::query_as::<_, PublicTeamMember>(
            "SELECT t.id, t.name, t.role, t.bio, m.storage_path AS photo_path, t.display_order
             FROM team_members t
             LEFT JOIN media m ON m.id = t.photo_media_id
             WHERE t.is_active = true
             ORDER BY t.display_order, t.id",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTeamMember,
    ) -> Result<Option<TeamMember>, sqlx::Error> {
        let query = format!(
            "UPDATE team_members SET
                name = COALESCE($2, name),
                role = COALESCE($3, role),
                bio = COALESCE($4, bio),
                photo_media_id = COALESCE($5, photo_media_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TeamMember>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.role)
            .bind(&input.bio)
            .bind(input.photo_media_id)
            .fetch_optional(pool)
            .await
    }

    /// Set `is_active`. Returns the updated row, `None` if it does not exist.
    pub async fn set_active(
        pool: &PgPool,
        id: DbId,
        is_active: bool,
    ) -> Result<Option<TeamMember>, sqlx::Error> {
        let query = format!(
            "UPDATE team_members SET is_active = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TeamMember>(&query)
            .bind(id)
            .bind(is_active)
            .fetch_optional(pool)
            .await
    }

    /// Persist a new ordering of all members.
    pub async fn reorder(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Position>, OrderingError> {
        ordering::reorder(pool, &TEAM_MEMBERS, None, ids).await
    }

    /// Permanently delete a deactivated member and close the gap.
    ///
    /// Active members are rejected with a conflict. The active flag is read
    /// under the scope lock so a concurrent activation cannot slip through.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<(), OrderingError> {
        let mut tx = pool.begin().await?;
        ordering::lock_scope(&mut tx, &TEAM_MEMBERS, None).await?;

        let is_active: Option<bool> =
            sqlx::query_scalar("SELECT is_active FROM team_members WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(is_active) = is_active else {
            return Err(CoreError::NotFound {
                entity: TEAM_MEMBERS.entity,
                id,
            }
            .into());
        };
        ensure_deletable(id, is_active)?;

        sqlx::query("DELETE FROM team_members WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        ordering::compact(&mut tx, &TEAM_MEMBERS, None).await?;

        tx.commit().await?;
        Ok(())
    }
}
