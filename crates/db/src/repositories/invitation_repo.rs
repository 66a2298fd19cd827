//! Repository for the `invitations` table.

use footlights_core::types::DbId;
use sqlx::PgPool;

use crate::models::invitation::{CreateInvitation, Invitation};
use crate::models::user::{CreateUser, User};
use crate::repositories::user_repo;

const COLUMNS: &str = "id, email, role, token_hash, invited_by, expires_at, \
                        accepted_at, revoked_at, created_at, updated_at";

/// Provides CRUD operations for invitations.
pub struct InvitationRepo;

impl InvitationRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateInvitation,
    ) -> Result<Invitation, sqlx::Error> {
        let query = format!(
            "INSERT INTO invitations (email, role, token_hash, invited_by, expires_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Invitation>(&query)
            .bind(&input.email)
            .bind(&input.role)
            .bind(&input.token_hash)
            .bind(input.invited_by)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Invitation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM invitations WHERE id = $1");
        sqlx::query_as::<_, Invitation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an invitation by the hash of its token, in any state.
    pub async fn find_by_token_hash(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<Invitation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM invitations WHERE token_hash = $1");
        sqlx::query_as::<_, Invitation>(&query)
            .bind(token_hash)
            .fetch_optional(pool)
            .await
    }

    /// All invitations, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Invitation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM invitations ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Invitation>(&query).fetch_all(pool).await
    }

    /// Whether a pending invitation already exists for `email`.
    pub async fn has_pending_for_email(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (
                SELECT 1 FROM invitations
                WHERE lower(email) = lower($1)
                  AND accepted_at IS NULL AND revoked_at IS NULL AND expires_at > NOW()
             )",
        )
        .bind(email)
        .fetch_one(pool)
        .await
    }

    /// Revoke a pending invitation. Returns `true` if the row was updated.
    pub async fn revoke(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE invitations SET revoked_at = NOW()
             WHERE id = $1 AND accepted_at IS NULL AND revoked_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Consume a pending invitation and create its user in one transaction.
    ///
    /// Returns `None` when the invitation was accepted, revoked or expired in
    /// the meantime; nothing is written in that case.
    pub async fn accept(
        pool: &PgPool,
        id: DbId,
        user: &CreateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let consumed = sqlx::query(
            "UPDATE invitations SET accepted_at = NOW()
             WHERE id = $1 AND accepted_at IS NULL AND revoked_at IS NULL AND expires_at > NOW()",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;
        if consumed.rows_affected() == 0 {
            return Ok(None);
        }

        let query = format!(
            "INSERT INTO users (username, email, password_hash, role)
             VALUES ($1, $2, $3, $4)
             RETURNING {}",
            user_repo::COLUMNS
        );
        let created = sqlx::query_as::<_, User>(&query)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.role)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(created))
    }
}
