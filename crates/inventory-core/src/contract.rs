//! # Inventory Contract
//!
//! Identifiers shared by the store and its callers: the database file, the
//! table, its columns, default values, and the addressing scheme.
//!
//! ## Addressing Scheme
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  content://com.example.android.inventory/inventory       ← collection  │
//! │  content://com.example.android.inventory/inventory/42    ← one record  │
//! │  └───────────── BASE_CONTENT_URI ──────┘ └─ PATH ─┘ └id┘                │
//! │                                                                         │
//! │  Short form (path only): "inventory", "inventory/42"                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::types::ItemId;

// =============================================================================
// Storage Identifiers
// =============================================================================

/// Name of the database file owned by the store.
pub const DATABASE_NAME: &str = "inventory.db";

/// Schema version recorded in `PRAGMA user_version`.
///
/// Bumping this requires a new migration file; existing rows must survive.
pub const DATABASE_VERSION: i64 = 1;

/// Table holding one row per product.
pub const TABLE_NAME: &str = "inventory";

/// Supplier name stored when the caller leaves it blank.
pub const DEFAULT_SUPPLIER_NAME: &str = "Unknown Supplier";

/// Supplier phone stored when the caller leaves it blank.
pub const DEFAULT_SUPPLIER_PHONE: &str = "Unknown Phone";

/// Quantity stored when the caller leaves it blank.
pub const DEFAULT_QUANTITY: i64 = 0;

/// Price stored when the caller leaves it blank.
pub const DEFAULT_PRICE: f64 = 0.0;

// =============================================================================
// Addressing Identifiers
// =============================================================================

/// Authority part of every inventory address.
pub const CONTENT_AUTHORITY: &str = "com.example.android.inventory";

/// Scheme + authority prefix.
pub const BASE_CONTENT_URI: &str = "content://com.example.android.inventory";

/// Collection resource name.
pub const PATH_INVENTORY: &str = "inventory";

// =============================================================================
// Columns
// =============================================================================

/// Columns of the inventory table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Id,
    ProductName,
    Price,
    Quantity,
    SupplierName,
    SupplierPhone,
}

impl Column {
    /// Every column, in table order.
    pub const ALL: [Column; 6] = [
        Column::Id,
        Column::ProductName,
        Column::Price,
        Column::Quantity,
        Column::SupplierName,
        Column::SupplierPhone,
    ];

    /// SQL column name.
    pub const fn name(&self) -> &'static str {
        match self {
            Column::Id => "_id",
            Column::ProductName => "product_name",
            Column::Price => "product_price",
            Column::Quantity => "product_quantity",
            Column::SupplierName => "supplier_name",
            Column::SupplierPhone => "supplier_phone_number",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// ItemUri
// =============================================================================

/// Address of either the whole inventory or one record in it.
///
/// ## Example
/// ```rust
/// use inventory_core::{ItemId, ItemUri};
///
/// let uri = ItemUri::Collection.with_appended_id(ItemId(3));
/// assert_eq!(uri, ItemUri::Item(ItemId(3)));
/// assert_eq!(uri.to_string(), "content://com.example.android.inventory/inventory/3");
/// assert_eq!("inventory/3".parse::<ItemUri>().unwrap(), uri);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemUri {
    /// The whole table.
    #[default]
    Collection,
    /// A single record.
    Item(ItemId),
}

impl ItemUri {
    /// Addresses the record `id` inside this collection.
    pub fn with_appended_id(self, id: ItemId) -> Self {
        ItemUri::Item(id)
    }

    /// Returns the addressed id, if this is an item address.
    pub fn id(&self) -> Option<ItemId> {
        match self {
            ItemUri::Collection => None,
            ItemUri::Item(id) => Some(*id),
        }
    }

    /// Returns true if this address names the whole collection.
    pub fn is_collection(&self) -> bool {
        matches!(self, ItemUri::Collection)
    }

    /// Short form without scheme and authority: `inventory` or `inventory/{id}`.
    pub fn path(&self) -> String {
        match self {
            ItemUri::Collection => PATH_INVENTORY.to_string(),
            ItemUri::Item(id) => format!("{}/{}", PATH_INVENTORY, id),
        }
    }

    /// Returns true if a change at `other` affects what this address names.
    ///
    /// A collection is affected by everything; an item is affected by changes
    /// to itself and by collection-wide changes.
    pub fn is_affected_by(&self, other: &ItemUri) -> bool {
        match (self, other) {
            (ItemUri::Collection, _) | (_, ItemUri::Collection) => true,
            (ItemUri::Item(a), ItemUri::Item(b)) => a == b,
        }
    }
}

impl From<ItemId> for ItemUri {
    fn from(id: ItemId) -> Self {
        ItemUri::Item(id)
    }
}

impl fmt::Display for ItemUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", BASE_CONTENT_URI, self.path())
    }
}

impl FromStr for ItemUri {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path = s
            .strip_prefix(BASE_CONTENT_URI)
            .and_then(|rest| rest.strip_prefix('/'))
            .unwrap_or(s);

        let mut segments = path.splitn(2, '/');
        match segments.next() {
            Some(PATH_INVENTORY) => {}
            other => {
                return Err(ValidationError::InvalidFormat {
                    field: "uri".to_string(),
                    reason: format!("unknown path '{}'", other.unwrap_or_default()),
                })
            }
        }

        let Some(raw_id) = segments.next() else {
            return Ok(ItemUri::Collection);
        };

        if raw_id.is_empty() || !raw_id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidFormat {
                field: "uri".to_string(),
                reason: format!("'{}' is not a record id", raw_id),
            });
        }

        raw_id
            .parse::<i64>()
            .map(|id| ItemUri::Item(ItemId(id)))
            .map_err(|_| ValidationError::InvalidFormat {
                field: "uri".to_string(),
                reason: format!("record id '{}' is out of range", raw_id),
            })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
