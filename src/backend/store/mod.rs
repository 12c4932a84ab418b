//! # Entity Store
//!
//! Typed SQLite access for the five document kinds. Each kind has its own
//! module with row mapping and kind-specific queries; this module holds the
//! operations that work on any kind and the connection setup.
//!
//! ## Executors
//!
//! Single-statement functions are generic over `SqliteExecutor`, so callers
//! pass either `&pool` or `&mut *tx`. Functions that run several statements
//! take `&mut SqliteConnection` and are meant to be called inside a
//! transaction.
//!
//! ## Storage Layout
//!
//! Ids are stored as hyphenated UUID text. Child collections and order
//! arrays are JSON arrays of ids, which lets `json_each` drive `IN` lists.

pub mod boards;
pub mod cards;
pub mod checklists;
pub mod children;
pub mod lists;
pub mod users;

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow, SqliteSynchronous};
use sqlx::{Row, SqliteExecutor, SqlitePool};
use thiserror::Error;
use uuid::Uuid;

use crate::shared::models::{Entity, EntityKind};

/// Store error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: Uuid },

    /// A uniqueness constraint was broken (username)
    #[error("{message}")]
    ConstraintViolation { message: String },

    /// A stored row couldn't be mapped back into a document
    #[error("corrupt {kind} row: {message}")]
    Corrupt { kind: EntityKind, message: String },

    /// The kind has no child collection
    #[error("{kind} has no children")]
    Leaf { kind: EntityKind },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        let unique = err
            .as_database_error()
            .is_some_and(|db_err| db_err.is_unique_violation());
        if unique {
            StoreError::ConstraintViolation {
                message: "Username already taken".to_string(),
            }
        } else {
            StoreError::Database(err)
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Open the SQLite pool and apply migrations
///
/// Creates the database file if it doesn't exist. Uses WAL mode, enforces
/// foreign keys and waits on a busy database instead of failing immediately.
pub async fn connect(database_url: &str) -> StoreResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(8)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;
    tracing::info!("Database ready at {}", database_url);
    Ok(pool)
}

/// Apply pending migrations from `migrations/`
pub async fn migrate(pool: &SqlitePool) -> StoreResult<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

pub(crate) fn table(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::User => "users",
        EntityKind::Board => "boards",
        EntityKind::List => "lists",
        EntityKind::Card => "cards",
        EntityKind::Checklist => "checklists",
    }
}

/// Read a UUID text column
pub(crate) fn get_id(row: &SqliteRow, kind: EntityKind, column: &str) -> StoreResult<Uuid> {
    let raw: String = row.try_get(column)?;
    Uuid::parse_str(&raw).map_err(|e| StoreError::Corrupt {
        kind,
        message: format!("{}: {}", column, e),
    })
}

/// Read a JSON id-array column
pub(crate) fn get_ids(row: &SqliteRow, kind: EntityKind, column: &str) -> StoreResult<Vec<Uuid>> {
    let raw: String = row.try_get(column)?;
    serde_json::from_str(&raw).map_err(|e| StoreError::Corrupt {
        kind,
        message: format!("{}: {}", column, e),
    })
}

pub(crate) fn ids_json(ids: &[Uuid]) -> StoreResult<String> {
    Ok(serde_json::to_string(ids)?)
}

/// Find any document by kind and id
pub async fn find<'e, E: SqliteExecutor<'e>>(
    executor: E,
    kind: EntityKind,
    id: Uuid,
) -> StoreResult<Option<Entity>> {
    Ok(match kind {
        EntityKind::User => users::find(executor, id).await?.map(Entity::User),
        EntityKind::Board => boards::find(executor, id).await?.map(Entity::Board),
        EntityKind::List => lists::find(executor, id).await?.map(Entity::List),
        EntityKind::Card => cards::find(executor, id).await?.map(Entity::Card),
        EntityKind::Checklist => checklists::find(executor, id).await?.map(Entity::Checklist),
    })
}

/// Like [`find`], but a missing document is an error
pub async fn get<'e, E: SqliteExecutor<'e>>(
    executor: E,
    kind: EntityKind,
    id: Uuid,
) -> StoreResult<Entity> {
    find(executor, kind, id)
        .await?
        .ok_or(StoreError::NotFound { kind, id })
}

/// Insert any document
pub async fn insert<'e, E: SqliteExecutor<'e>>(executor: E, entity: &Entity) -> StoreResult<()> {
    match entity {
        Entity::User(user) => users::insert(executor, user).await,
        Entity::Board(board) => boards::insert(executor, board).await,
        Entity::List(list) => lists::insert(executor, list).await,
        Entity::Card(card) => cards::insert(executor, card).await,
        Entity::Checklist(checklist) => checklists::insert(executor, checklist).await,
    }
}

/// Advance `updated_on` and return the new value
///
/// Always the first statement of a mutating transaction: it takes the write
/// lock, and the `MAX` keeps `updated_on` strictly increasing even when two
/// writes land in the same millisecond.
pub async fn touch<'e, E: SqliteExecutor<'e>>(
    executor: E,
    kind: EntityKind,
    id: Uuid,
    now: i64,
) -> StoreResult<i64> {
    let sql = format!(
        "UPDATE {} SET updated_on = MAX(updated_on + 1, ?) WHERE id = ? RETURNING updated_on",
        table(kind)
    );
    let row = sqlx::query(&sql)
        .bind(now)
        .bind(id.to_string())
        .fetch_optional(executor)
        .await?;

    match row {
        Some(row) => Ok(row.try_get("updated_on")?),
        None => Err(StoreError::NotFound { kind, id }),
    }
}

/// Point a document at a new direct owner
pub async fn set_owner<'e, E: SqliteExecutor<'e>>(
    executor: E,
    kind: EntityKind,
    id: Uuid,
    owner: Uuid,
    now: i64,
) -> StoreResult<()> {
    let sql = format!(
        "UPDATE {} SET owner = ?, updated_on = MAX(updated_on + 1, ?) WHERE id = ?",
        table(kind)
    );
    let result = sqlx::query(&sql)
        .bind(owner.to_string())
        .bind(now)
        .bind(id.to_string())
        .execute(executor)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound { kind, id });
    }
    Ok(())
}

/// Delete one document; returns whether a row was removed
pub async fn delete<'e, E: SqliteExecutor<'e>>(
    executor: E,
    kind: EntityKind,
    id: Uuid,
) -> StoreResult<bool> {
    let sql = format!("DELETE FROM {} WHERE id = ?", table(kind));
    let result = sqlx::query(&sql)
        .bind(id.to_string())
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Delete every document of `kind` whose id is in `ids`
pub async fn delete_many<'e, E: SqliteExecutor<'e>>(
    executor: E,
    kind: EntityKind,
    ids: &[Uuid],
) -> StoreResult<u64> {
    if ids.is_empty() {
        return Ok(0);
    }
    let sql = format!(
        "DELETE FROM {} WHERE id IN (SELECT value FROM json_each(?))",
        table(kind)
    );
    let result = sqlx::query(&sql)
        .bind(ids_json(ids)?)
        .execute(executor)
        .await?;
    tracing::debug!("Deleted {} {} rows", result.rows_affected(), kind);
    Ok(result.rows_affected())
}

/// Ids of every `kind` document whose direct owner is in `owners`
pub async fn child_ids<'e, E: SqliteExecutor<'e>>(
    executor: E,
    kind: EntityKind,
    owners: &[Uuid],
) -> StoreResult<Vec<Uuid>> {
    if owners.is_empty() {
        return Ok(Vec::new());
    }
    let sql = format!(
        "SELECT id FROM {} WHERE owner IN (SELECT value FROM json_each(?))",
        table(kind)
    );
    let rows = sqlx::query(&sql)
        .bind(ids_json(owners)?)
        .fetch_all(executor)
        .await?;

    rows.iter().map(|row| get_id(row, kind, "id")).collect()
}

/// Number of documents of `kind` whose root user is `user`
pub async fn count_for_user<'e, E: SqliteExecutor<'e>>(
    executor: E,
    kind: EntityKind,
    user: Uuid,
) -> StoreResult<i64> {
    let column = match kind {
        EntityKind::User => "id",
        EntityKind::Board => "owner",
        _ => "indirect_owner",
    };
    let sql = format!("SELECT COUNT(*) AS n FROM {} WHERE {} = ?", table(kind), column);
    let row = sqlx::query(&sql)
        .bind(user.to_string())
        .fetch_one(executor)
        .await?;
    Ok(row.try_get("n")?)
}
