//! Atomic persistence for ordered collections.
//!
//! Every ordered table has a `display_order INTEGER` column holding dense
//! positions from [`ORDER_ORIGIN`] and a unique constraint on
//! `(scope, display_order)` declared `DEFERRABLE INITIALLY DEFERRED`, so a
//! single statement may permute positions freely and uniqueness is checked
//! at commit.
//!
//! Writers that change the membership or order of a scope (reorder, append,
//! delete) take a transaction-scoped advisory lock on `"{table}:{scope}"`
//! first. That serializes them against each other without blocking readers.

use footlights_core::error::CoreError;
use footlights_core::ordering::{plan_reorder, Position, ORDER_ORIGIN};
use footlights_core::types::DbId;
use sqlx::{PgConnection, PgPool};

/// Describes one ordered table and how its rows are grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderedCollection {
    pub table: &'static str,
    /// Column partitioning the ordering, `None` for a single global list.
    pub scope_column: Option<&'static str>,
    /// Entity name used in error messages.
    pub entity: &'static str,
}

pub const HERO_SLIDES: OrderedCollection = OrderedCollection {
    table: "hero_slides",
    scope_column: None,
    entity: "HeroSlide",
};

pub const TEAM_MEMBERS: OrderedCollection = OrderedCollection {
    table: "team_members",
    scope_column: None,
    entity: "TeamMember",
};

pub const PARTNERS: OrderedCollection = OrderedCollection {
    table: "partners",
    scope_column: None,
    entity: "Partner",
};

/// Gallery photos are ordered per show.
pub const GALLERY_PHOTOS: OrderedCollection = OrderedCollection {
    table: "gallery_photos",
    scope_column: Some("show_id"),
    entity: "GalleryPhoto",
};

/// Failure of an ordering write.
#[derive(Debug, thiserror::Error)]
pub enum OrderingError {
    /// The request was rejected before any row changed.
    #[error(transparent)]
    Invalid(#[from] CoreError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl OrderedCollection {
    /// `WHERE` fragment selecting the scope, with the scope bound at `$param`.
    fn scope_filter(&self, param: usize) -> String {
        match self.scope_column {
            Some(column) => format!("{column} = ${param}"),
            None => "TRUE".to_string(),
        }
    }

    /// Check that `scope` is present exactly when the collection is scoped.
    fn check_scope(&self, scope: Option<DbId>) -> Result<(), CoreError> {
        match (self.scope_column, scope) {
            (Some(_), Some(_)) | (None, None) => Ok(()),
            (Some(column), None) => Err(CoreError::Internal(format!(
                "{} ordering requires a {column}",
                self.table
            ))),
            (None, Some(_)) => Err(CoreError::Internal(format!(
                "{} ordering is not scoped",
                self.table
            ))),
        }
    }

    fn lock_key(&self, scope: Option<DbId>) -> String {
        match scope {
            Some(scope) => format!("{}:{scope}", self.table),
            None => self.table.to_string(),
        }
    }
}

/// Serialize ordering writers on one scope until the transaction ends.
pub async fn lock_scope(
    conn: &mut PgConnection,
    collection: &OrderedCollection,
    scope: Option<DbId>,
) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
        .bind(collection.lock_key(scope))
        .execute(conn)
        .await?;
    Ok(())
}

/// Ids in the scope by current position, locking their rows.
async fn locked_ids(
    conn: &mut PgConnection,
    collection: &OrderedCollection,
    scope: Option<DbId>,
) -> Result<Vec<DbId>, sqlx::Error> {
    let query = format!(
        "SELECT id FROM {} WHERE {} ORDER BY display_order, id FOR UPDATE",
        collection.table,
        collection.scope_filter(1)
    );
    let mut q = sqlx::query_scalar::<_, DbId>(&query);
    if let Some(scope) = scope {
        q = q.bind(scope);
    }
    q.fetch_all(conn).await
}

/// Current ordering of a scope.
pub async fn current_order(
    pool: &PgPool,
    collection: &OrderedCollection,
    scope: Option<DbId>,
) -> Result<Vec<Position>, sqlx::Error> {
    let query = format!(
        "SELECT id, display_order FROM {} WHERE {} ORDER BY display_order, id",
        collection.table,
        collection.scope_filter(1)
    );
    let mut q = sqlx::query_as::<_, (DbId, i32)>(&query);
    if let Some(scope) = scope {
        q = q.bind(scope);
    }
    let rows = q.fetch_all(pool).await?;
    Ok(rows
        .into_iter()
        .map(|(id, display_order)| Position { id, display_order })
        .collect())
}

/// Persist a caller-supplied permutation of the scope's ids.
///
/// Runs in one transaction: lock the scope, read and lock the current ids,
/// validate the permutation against them, write all positions with a single
/// `UPDATE ... FROM UNNEST` and commit. On any failure nothing is written.
pub async fn reorder(
    pool: &PgPool,
    collection: &OrderedCollection,
    scope: Option<DbId>,
    requested: &[DbId],
) -> Result<Vec<Position>, OrderingError> {
    collection.check_scope(scope)?;

    let mut tx = pool.begin().await?;
    lock_scope(&mut tx, collection, scope).await?;

    let current = locked_ids(&mut tx, collection, scope).await?;
    // Dropping `tx` on the error path rolls back.
    let plan = plan_reorder(&current, requested)?;

    let ids: Vec<DbId> = plan.iter().map(|p| p.id).collect();
    let positions: Vec<i32> = plan.iter().map(|p| p.display_order).collect();

    let query = format!(
        "UPDATE {table} AS t SET display_order = v.position
         FROM UNNEST($1::BIGINT[], $2::INT[]) AS v(id, position)
         WHERE t.id = v.id AND {filter}",
        table = collection.table,
        filter = collection.scope_filter(3),
    );
    let mut q = sqlx::query(&query).bind(&ids).bind(&positions);
    if let Some(scope) = scope {
        q = q.bind(scope);
    }
    let result = q.execute(&mut *tx).await?;

    if result.rows_affected() != plan.len() as u64 {
        return Err(CoreError::Internal(format!(
            "reorder of {} updated {} of {} rows",
            collection.table,
            result.rows_affected(),
            plan.len()
        ))
        .into());
    }

    tx.commit().await?;

    tracing::debug!(
        table = collection.table,
        scope = ?scope,
        count = plan.len(),
        "Collection reordered"
    );
    Ok(plan)
}

/// Position for a new item appended to the scope.
///
/// Call inside the inserting transaction; takes the scope lock.
pub async fn append_position(
    conn: &mut PgConnection,
    collection: &OrderedCollection,
    scope: Option<DbId>,
) -> Result<i32, OrderingError> {
    collection.check_scope(scope)?;
    lock_scope(conn, collection, scope).await?;

    let query = format!(
        "SELECT MAX(display_order) FROM {} WHERE {}",
        collection.table,
        collection.scope_filter(1)
    );
    let mut q = sqlx::query_scalar::<_, Option<i32>>(&query);
    if let Some(scope) = scope {
        q = q.bind(scope);
    }
    let max = q.fetch_one(conn).await?;
    Ok(footlights_core::ordering::next_position(max))
}

/// Rewrite the scope's positions to `0..n`, keeping their relative order.
///
/// Call inside the transaction that removed rows; the scope lock must be held.
pub async fn compact(
    conn: &mut PgConnection,
    collection: &OrderedCollection,
    scope: Option<DbId>,
) -> Result<u64, sqlx::Error> {
    let query = format!(
        "UPDATE {table} AS t SET display_order = r.position
         FROM (
             SELECT id, (ROW_NUMBER() OVER (ORDER BY display_order, id) - 1 + {ORDER_ORIGIN})::INT AS position
             FROM {table}
             WHERE {filter}
         ) AS r
         WHERE t.id = r.id AND t.display_order <> r.position",
        table = collection.table,
        filter = collection.scope_filter(1),
    );
    let mut q = sqlx::query(&query);
    if let Some(scope) = scope {
        q = q.bind(scope);
    }
    Ok(q.execute(conn).await?.rows_affected())
}

/// Delete one item and close the gap it leaves, atomically.
///
/// Returns `false` if no row with `id` exists in the scope.
pub async fn delete_and_compact(
    pool: &PgPool,
    collection: &OrderedCollection,
    scope: Option<DbId>,
    id: DbId,
) -> Result<bool, OrderingError> {
    collection.check_scope(scope)?;

    let mut tx = pool.begin().await?;
    lock_scope(&mut tx, collection, scope).await?;

    let query = format!(
        "DELETE FROM {} WHERE id = $1 AND {}",
        collection.table,
        collection.scope_filter(2)
    );
    let mut q = sqlx::query(&query).bind(id);
    if let Some(scope) = scope {
        q = q.bind(scope);
    }
    if q.execute(&mut *tx).await?.rows_affected() == 0 {
        return Ok(false);
    }

    compact(&mut tx, collection, scope).await?;
    tx.commit().await?;
    Ok(true)
}
