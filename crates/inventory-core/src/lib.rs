//! # inventory-core: Schema Contract for the Inventory Store
//!
//! This crate is the single source of truth for what an inventory record
//! looks like and how it is addressed. It contains no I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Inventory Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Callers (list screen, edit screen)              │   │
//! │  │      "save" ──► ItemForm       "sale" ──► record_sale(id)       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ inventory-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐                 │   │
//! │  │   │ contract  │  │   types   │  │ validation │                 │   │
//! │  │   │ columns   │  │ Inventory │  │  blank     │                 │   │
//! │  │   │ ItemUri   │  │   Item    │  │  coercion  │                 │   │
//! │  │   └───────────┘  └───────────┘  └────────────┘                 │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 inventory-db (Inventory Store)                  │   │
//! │  │          SQLite table, CRUD, change signals, live views         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`contract`] - Table/column names, defaults, addressing scheme
//! - [`types`] - Record types (InventoryItem, ItemForm, ItemRow, ...)
//! - [`validation`] - Blank-form detection and text coercion
//! - [`error`] - Validation error types
//!
//! ## Example Usage
//!
//! ```rust
//! use inventory_core::{ItemForm, ItemUri};
//! use inventory_core::validation::normalize_form;
//!
//! let form = ItemForm::new().product_name("Silver Pen").price("19.95");
//! let values = normalize_form(&form).unwrap().expect("form is not blank");
//! assert_eq!(values.price, Some(19.95));
//!
//! let uri: ItemUri = "inventory/7".parse().unwrap();
//! assert_eq!(uri.path(), "inventory/7");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod contract;
pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use contract::{Column, ItemUri};
pub use error::ValidationError;
pub use types::*;
