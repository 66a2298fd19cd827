//! Refresh-token sessions in `user_sessions`.
//!
//! A refresh token is single use. [`SessionRepo::rotate`] consumes the
//! presented token and opens its successor in one transaction, so two
//! requests racing with the same token cannot both get a session.

use footlights_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::session::{NewSession, UserSession};

const RETURNING: &str = "RETURNING id, user_id, refresh_token_hash, expires_at, is_revoked, \
                         user_agent, created_at, updated_at";

pub struct SessionRepo;

impl SessionRepo {
    /// Open a session for a user who just proved their credentials.
    pub async fn open(
        pool: &PgPool,
        user_id: DbId,
        session: &NewSession,
    ) -> Result<UserSession, sqlx::Error> {
        insert(pool, user_id, session).await
    }

    /// Trade a live refresh token for a new session of the same user.
    ///
    /// Returns `None` when the presented token is unknown, expired or already
    /// spent; nothing is written in that case.
    pub async fn rotate(
        pool: &PgPool,
        presented_hash: &str,
        next: &NewSession,
    ) -> Result<Option<UserSession>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // Concurrent claims on the same row serialize here; the loser
        // re-checks `NOT is_revoked` after the winner commits and gets no row.
        let owner: Option<DbId> = sqlx::query_scalar(
            "UPDATE user_sessions SET is_revoked = true
             WHERE refresh_token_hash = $1 AND NOT is_revoked AND expires_at > NOW()
             RETURNING user_id",
        )
        .bind(presented_hash)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(user_id) = owner else {
            return Ok(None);
        };

        let session = insert(&mut *tx, user_id, next).await?;
        tx.commit().await?;
        Ok(Some(session))
    }

    /// Sign a user out everywhere. Returns how many sessions were still live.
    pub async fn revoke_all_for_user(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        revoke_for_user(pool, user_id).await
    }
}

async fn insert<'e, E: PgExecutor<'e>>(
    executor: E,
    user_id: DbId,
    session: &NewSession,
) -> Result<UserSession, sqlx::Error> {
    let query = format!(
        "INSERT INTO user_sessions (user_id, refresh_token_hash, expires_at, user_agent)
         VALUES ($1, $2, $3, $4)
         {RETURNING}"
    );
    sqlx::query_as::<_, UserSession>(&query)
        .bind(user_id)
        .bind(&session.refresh_token_hash)
        .bind(session.expires_at)
        .bind(&session.user_agent)
        .fetch_one(executor)
        .await
}

/// Also used by the user repository inside its own transactions.
pub(crate) async fn revoke_for_user<'e, E: PgExecutor<'e>>(
    executor: E,
    user_id: DbId,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE user_sessions SET is_revoked = true
         WHERE user_id = $1 AND NOT is_revoked",
    )
    .bind(user_id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}
