//! # Repository Module
//!
//! Database access for the inventory table.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  db.inventory()                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  InventoryRepository                                                   │
//! │  ├── create / update / apply                                           │
//! │  ├── delete / delete_all                                               │
//! │  ├── query / get / list / fetch / count                                │
//! │  └── record_sale / restock                                             │
//! │       │                                                                 │
//! │       │  SQL, then ChangeNotifier::notify on success                   │
//! │       ▼                                                                 │
//! │  SQLite `inventory` table                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All SQL against the table lives in [`inventory`].

pub mod inventory;
