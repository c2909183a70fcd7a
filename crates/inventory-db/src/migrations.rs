//! # Database Migrations
//!
//! Embedded SQL migrations for the inventory store.
//!
//! ## How Initialization Works
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Initialization                                     │
//! │                                                                         │
//! │  Process start                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PRAGMA user_version                                                   │
//! │       │                                                                 │
//! │       ├── newer than DATABASE_VERSION? → DbError::SchemaTooNew         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Compare embedded migrations vs _sqlx_migrations                       │
//! │       │                                                                 │
//! │       └── 001_create_inventory.sql   (CREATE TABLE IF NOT EXISTS,      │
//! │                                       user_version = 1)                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Store ready                                                           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Bumping the Schema
//!
//! 1. Add `migrations/sqlite/NNN_description.sql` with the next number
//! 2. Carry existing rows forward (ALTER / copy), never DROP user data
//! 3. End the file with `PRAGMA user_version = N;`
//! 4. Bump `DATABASE_VERSION` in inventory-core
//! 5. **NEVER** modify existing migrations

use inventory_core::contract::DATABASE_VERSION;
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::error::{DbError, DbResult};

/// Embedded migrations from the workspace `migrations/sqlite` directory.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Runs all pending database migrations.
///
/// ## Safety
/// - Idempotent: safe to run on every process start
/// - Refuses files stamped with a newer schema version
/// - Transactional: each migration runs in a transaction
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    let found = schema_version(pool).await?;
    if found > DATABASE_VERSION {
        return Err(DbError::SchemaTooNew {
            found,
            supported: DATABASE_VERSION,
        });
    }

    info!(schema_version = found, "Checking for pending migrations");

    MIGRATOR.run(pool).await?;

    let applied = schema_version(pool).await?;
    if applied != DATABASE_VERSION {
        warn!(
            schema_version = applied,
            expected = DATABASE_VERSION,
            "Schema version differs after migrations"
        );
    }

    info!("All migrations applied successfully");
    Ok(())
}

/// Reads the schema version stamped in the file (`0` for a fresh file).
pub async fn schema_version(pool: &SqlitePool) -> DbResult<i64> {
    let version: i64 = sqlx::query_scalar("PRAGMA user_version")
        .fetch_one(pool)
        .await?;

    Ok(version)
}

/// Returns information about migrations.
///
/// ## Returns
/// Tuple of (total_migrations, applied_migrations). A file that never ran
/// migrations has no bookkeeping table and reports 0 applied.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let total = MIGRATOR.migrations.len();

    let applied: i64 = match sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await
    {
        Ok(count) => count,
        Err(sqlx::Error::Database(err)) if err.message().contains("no such table") => 0,
        Err(err) => return Err(err.into()),
    };

    let applied = usize::try_from(applied)
        .map_err(|_| DbError::Internal(format!("invalid applied migration count {}", applied)))?;

    Ok((total, applied))
}

// =============================================================================
// Unit Tests
// =============================================================================
