//! # inventory-db: Inventory Store
//!
//! Owns the inventory SQLite file and every operation on it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Inventory Data Flow                              │
//! │                                                                         │
//! │  List screen / edit screen / seed binary                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   inventory-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐   │   │
//! │  │   │   Database    │    │  Repository   │    │  Migrations  │   │   │
//! │  │   │   (pool.rs)   │◄───│ (inventory.rs)│    │  (embedded)  │   │   │
//! │  │   └───────┬───────┘    └───────┬───────┘    └──────────────┘   │   │
//! │  │           │                    │ notify                        │   │
//! │  │           ▼                    ▼                               │   │
//! │  │   ┌───────────────┐    ┌───────────────┐                       │   │
//! │  │   │   LiveQuery   │◄───│ ChangeNotifier│                       │   │
//! │  │   │   (live.rs)   │    │  (notify.rs)  │                       │   │
//! │  │   └───────────────┘    └───────────────┘                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  SQLite file: inventory.db, table `inventory`                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Store handle and connection configuration
//! - [`migrations`] - Embedded schema migrations
//! - [`repository`] - Inventory CRUD and query path
//! - [`notify`] - Change signals
//! - [`live`] - Self-refreshing read views
//! - [`config`] - TOML + environment configuration
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use inventory_db::{Database, DbConfig};
//! use inventory_core::{ItemForm, ItemUri};
//!
//! let db = Database::new(DbConfig::new("inventory.db")).await?;
//!
//! let form = ItemForm::new().product_name("Silver Pen").price("19.95");
//! db.inventory().create(&form).await?;
//!
//! let mut list = db.live(ItemUri::Collection).await?;
//! let rows = list.changed().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod live;
pub mod migrations;
pub mod notify;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{ConfigError, InventoryConfig};
pub use error::{DbError, DbResult};
pub use live::LiveQuery;
pub use notify::{ChangeKind, ChangeNotifier, InventoryChange};
pub use pool::{Database, DbConfig};

pub use repository::inventory::InventoryRepository;
