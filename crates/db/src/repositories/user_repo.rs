//! Back-office accounts in `users`.
//!
//! Every change that ends a person's access (deactivation, an admin edit that
//! leaves the account inactive, a password reset) revokes their sessions in
//! the same transaction, so no refresh token outlives the change.

use footlights_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, LockoutPolicy, LoginFailure, UpdateUser, User};
use crate::repositories::session_repo::revoke_for_user;

pub(crate) const COLUMNS: &str = "id, username, email, password_hash, role, is_active, \
                        last_login_at, failed_login_count, locked_until, created_at, updated_at";

pub struct UserRepo;

impl UserRepo {
    /// Insert an account whose password is already hashed.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, email, password_hash, role)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Login lookup. Usernames match exactly.
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Emails match case-insensitively; invitations use this to refuse an
    /// address that already has an account.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE lower(email) = lower($1)");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Newest accounts first.
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// Used at startup to decide whether a bootstrap admin is needed.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await
    }

    /// Apply an admin edit; absent fields keep their value. An edit that
    /// leaves the account inactive also signs it out.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE users SET
                username = COALESCE($2, username),
                email = COALESCE($3, email),
                role = COALESCE($4, role),
                is_active = COALESCE($5, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.role)
            .bind(input.is_active)
            .fetch_optional(&mut *tx)
            .await?;

        if let Some(user) = &user {
            if !user.is_active {
                revoke_for_user(&mut *tx, id).await?;
            }
        }

        tx.commit().await?;
        Ok(user)
    }

    /// Deactivate an account and end its sessions. Deactivating an already
    /// inactive account is a no-op that still returns it.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("UPDATE users SET is_active = false WHERE id = $1 RETURNING {COLUMNS}");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if user.is_some() {
            revoke_for_user(&mut *tx, id).await?;
        }

        tx.commit().await?;
        Ok(user)
    }

    /// Install a new password hash, lift any lockout and end every session.
    pub async fn reset_password(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE users SET password_hash = $2, failed_login_count = 0, locked_until = NULL
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(password_hash)
            .fetch_optional(&mut *tx)
            .await?;
        if user.is_some() {
            revoke_for_user(&mut *tx, id).await?;
        }

        tx.commit().await?;
        Ok(user)
    }

    /// Count one wrong password and lock the account once `policy` is
    /// exhausted.
    ///
    /// The counter restarts after an expired lock. Both columns are computed
    /// from the row being updated, so concurrent failures are all counted.
    pub async fn record_failed_login(
        pool: &PgPool,
        id: DbId,
        policy: LockoutPolicy,
    ) -> Result<LoginFailure, sqlx::Error> {
        sqlx::query_as::<_, LoginFailure>(
            "UPDATE users SET
                failed_login_count =
                    CASE WHEN locked_until <= NOW() THEN 1 ELSE failed_login_count + 1 END,
                locked_until =
                    CASE WHEN (CASE WHEN locked_until <= NOW() THEN 1
                                    ELSE failed_login_count + 1 END) >= $2
                         THEN NOW() + make_interval(mins => $3)
                         ELSE NULL
                    END
             WHERE id = $1
             RETURNING failed_login_count, locked_until",
        )
        .bind(id)
        .bind(policy.max_attempts)
        .bind(policy.lock_minutes)
        .fetch_one(pool)
        .await
    }

    /// Successful sign-in: clear the failure counter and stamp `last_login_at`.
    pub async fn record_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users
             SET failed_login_count = 0, locked_until = NULL, last_login_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }
}
