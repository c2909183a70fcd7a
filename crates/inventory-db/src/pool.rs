//! # Database Handle
//!
//! Connection creation and configuration for the inventory file.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Inventory Store Handle                             │
//! │                                                                         │
//! │  Process start                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::new(path) ← Configure connection settings                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config).await ← Open file + run migrations              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │  SqlitePool (max 1 connection)          │                           │
//! │  │  ┌──────┐                               │                           │
//! │  │  │ Conn │  ◄── every statement, in turn │                           │
//! │  │  └──────┘                               │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       │ Callers hold a cloned Database, never the file                 │
//! │       ▼                                                                 │
//! │  list screen ──► db.live(ItemUri::Collection)                          │
//! │  edit screen ──► db.inventory().update(id, form)                       │
//! │  sale button ──► db.inventory().record_sale(id)                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Single Writer
//! The pool is capped at one connection, so all statements against the file
//! are serialized. Calls are async: callers await results without blocking
//! their own loop.

use inventory_core::contract::DATABASE_NAME;
use inventory_core::ItemUri;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::live::LiveQuery;
use crate::migrations;
use crate::notify::{ChangeNotifier, InventoryChange};
use crate::repository::inventory::InventoryRepository;

const IN_MEMORY_PATH: &str = ":memory:";

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("/path/to/inventory.db")
///     .busy_timeout(Duration::from_secs(2));
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 1 (single writer)
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Connection acquire timeout.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection. `None` keeps it open.
    /// Default: 10 minutes
    pub idle_timeout: Option<Duration>,

    /// How long SQLite waits on a locked file before failing.
    /// Default: 5 seconds
    pub busy_timeout: Duration,

    /// Whether to run migrations on connect.
    /// Default: true
    pub run_migrations: bool,
}

impl DbConfig {
    /// Creates a new database configuration with the given path.
    ///
    /// ## Arguments
    /// * `path` - Path to the SQLite database file. Created if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Some(Duration::from_secs(600)),
            busy_timeout: Duration::from_secs(5),
            run_migrations: true,
        }
    }

    /// Configuration for `inventory.db` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(DATABASE_NAME))
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the SQLite busy timeout.
    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Sets whether to run migrations on connect.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// Every `Database::new` with this config gets its own isolated database,
    /// alive as long as the handle.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(IN_MEMORY_PATH),
            max_connections: 1, // In-memory requires single connection
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: None,
            busy_timeout: Duration::from_secs(5),
            run_migrations: true,
        }
    }

    /// Returns true if this config points at an in-memory database.
    pub fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == IN_MEMORY_PATH
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        let options = if self.is_in_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
        } else {
            SqliteConnectOptions::new()
                .filename(&self.database_path)
                // WAL mode: readers don't block the writer
                .journal_mode(SqliteJournalMode::Wal)
                // Safe from corruption, may lose the last commit on power loss
                .synchronous(SqliteSynchronous::Normal)
                .create_if_missing(true)
        };

        Ok(options.busy_timeout(self.busy_timeout))
    }
}

// =============================================================================
// Database
// =============================================================================

/// Handle to the inventory store.
///
/// Constructed once at startup and passed to every caller that needs it.
/// Clones share the same connection and the same change channel.
#[derive(Debug, Clone)]
pub struct Database {
    /// The SQLite connection pool.
    pool: SqlitePool,

    /// Change signal shared by every repository handed out.
    notifier: ChangeNotifier,
}

impl Database {
    /// Opens the store.
    ///
    /// ## What This Does
    /// 1. Creates the database file if it doesn't exist
    /// 2. Configures SQLite (WAL, NORMAL synchronous, busy timeout)
    /// 3. Creates the single-connection pool
    /// 4. Runs migrations (if enabled)
    ///
    /// ## Returns
    /// * `Ok(Database)` - Ready-to-use store handle
    /// * `Err(DbError)` - Connection or migration failed
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Initializing database connection"
        );

        let connect_options = config.connect_options()?;

        debug!("Connection options configured");

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(config.idle_timeout);

        if config.is_in_memory() {
            // Recycling the only connection would drop the database with it
            pool_options = pool_options.max_lifetime(None);
        }

        let pool = pool_options
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Database pool created"
        );

        let db = Database {
            pool,
            notifier: ChangeNotifier::new(),
        };

        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Creates the schema if absent.
    ///
    /// - Idempotent: safe to run on every start
    /// - Automatically called by `new()` if `run_migrations` is true
    pub async fn run_migrations(&self) -> DbResult<()> {
        info!("Running database migrations");
        migrations::run_migrations(&self.pool).await?;
        info!("Migrations complete");
        Ok(())
    }

    /// Schema version stamped in the file.
    pub async fn schema_version(&self) -> DbResult<i64> {
        migrations::schema_version(&self.pool).await
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the inventory repository.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let items = db.inventory().list().await?;
    /// ```
    pub fn inventory(&self) -> InventoryRepository {
        InventoryRepository::new(self.pool.clone(), self.notifier.clone())
    }

    /// Subscribes to change signals emitted after successful mutations.
    pub fn subscribe(&self) -> broadcast::Receiver<InventoryChange> {
        self.notifier.subscribe()
    }

    /// Number of live change subscribers (open live views included).
    pub fn subscriber_count(&self) -> usize {
        self.notifier.subscriber_count()
    }

    /// Starts a live view of `target` that refreshes on every relevant change.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn live(&self, target: ItemUri) -> DbResult<LiveQuery> {
        LiveQuery::spawn(self.clone(), target).await
    }

    /// Closes the connection pool.
    ///
    /// After calling close, all repository operations fail with
    /// `DbError::ConnectionFailed`.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }

    /// Checks if the database is healthy (can execute queries).
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use inventory_core::ItemForm;

    use tempfile::TempDir;

    /// Fresh directory plus the database path inside it. Dropping the
    /// directory removes the file with its WAL and SHM siblings.
    fn temp_db() -> (TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DATABASE_NAME);
        (dir, path)
    }

    #[tokio::test]
    async fn test_in_memory_database() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert!(db.health_check().await);
        assert_eq!(db.schema_version().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_in_memory_databases_are_isolated() {
        let a = Database::new(DbConfig::in_memory()).await.unwrap();
        let b = Database::new(DbConfig::in_memory()).await.unwrap();

        a.inventory()
            .create(&ItemForm::new().product_name("Only in A"))
            .await
            .unwrap();

        assert_eq!(a.inventory().count().await.unwrap(), 1);
        assert_eq!(b.inventory().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_config_builder() {
        let config = DbConfig::new("/tmp/test.db")
            .max_connections(2)
            .busy_timeout(Duration::from_secs(1));

        assert_eq!(config.max_connections, 2);
        assert_eq!(config.busy_timeout, Duration::from_secs(1));
        assert!(!config.is_in_memory());
        assert!(DbConfig::in_memory().is_in_memory());
        assert!(DbConfig::in_dir("/data").database_path.ends_with("inventory.db"));
    }

    #[tokio::test]
    async fn test_initialize_is_idempotent_and_keeps_rows() {
        let (_dir, path) = temp_db();

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        db.inventory()
            .create(&ItemForm::new().product_name("Stapler").quantity("3"))
            .await
            .unwrap();
        db.run_migrations().await.unwrap();
        db.close().await;

        let reopened = Database::new(DbConfig::new(&path)).await.unwrap();
        let items = reopened.inventory().list().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product_name, "Stapler");
        assert_eq!(items[0].quantity, 3);
        reopened.close().await;
    }

    #[tokio::test]
    async fn test_newer_schema_is_refused() {
        let (_dir, path) = temp_db();

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        sqlx::query("PRAGMA user_version = 2")
            .execute(db.pool())
            .await
            .unwrap();
        db.close().await;

        let err = Database::new(DbConfig::new(&path)).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::SchemaTooNew {
                found: 2,
                supported: 1
            }
        ));
    }

    #[tokio::test]
    async fn test_opens_existing_unmanaged_file() {
        let (_dir, path) = temp_db();

        // A file with the inventory table but no migration bookkeeping
        let bare = Database::new(DbConfig::new(&path).run_migrations(false))
            .await
            .unwrap();
        sqlx::query(
            "CREATE TABLE inventory (_id INTEGER PRIMARY KEY AUTOINCREMENT, \
             product_name TEXT NOT NULL, product_price REAL NOT NULL, \
             product_quantity INTEGER NOT NULL DEFAULT 0, \
             supplier_name TEXT DEFAULT 'Unknown Supplier', \
             supplier_phone_number TEXT DEFAULT 'Unknown Phone')",
        )
        .execute(bare.pool())
        .await
        .unwrap();
        sqlx::query(
            "INSERT INTO inventory (product_name, product_price, product_quantity) \
             VALUES ('Silver Pen', 19.95, 1), ('Eraser', '', '')",
        )
        .execute(bare.pool())
        .await
        .unwrap();
        sqlx::query("PRAGMA user_version = 1")
            .execute(bare.pool())
            .await
            .unwrap();
        bare.close().await;

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        let repo = db.inventory();
        let items = repo.list().await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].supplier_name, "Unknown Supplier");
        assert_eq!((items[1].price, items[1].quantity), (0.0, 0));

        assert_eq!(repo.record_sale(items[1].id).await.unwrap(), 1);
        assert_eq!(repo.get(items[1].id).await.unwrap().unwrap().quantity, 0);
        db.close().await;
    }
}
