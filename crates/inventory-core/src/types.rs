//! # Record Types
//!
//! Types flowing between callers and the store.
//!
//! ## Type Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Edit screen text fields                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ItemForm      raw text, Option per field (None = not supplied)         │
//! │       │  validation::normalize_form                                     │
//! │       ▼                                                                 │
//! │  ItemValues    typed, clamped; None = keep stored value                 │
//! │       │  into_new_item (create only)                                    │
//! │       ▼                                                                 │
//! │  NewItem       every column filled, defaults applied                    │
//! │       │  INSERT                                                         │
//! │       ▼                                                                 │
//! │  InventoryItem persisted row, carries its ItemId                        │
//! │       │  project                                                        │
//! │       ▼                                                                 │
//! │  ItemRow       projected subset handed out by the query path            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::contract::{Column, DEFAULT_PRICE, DEFAULT_QUANTITY, DEFAULT_SUPPLIER_NAME, DEFAULT_SUPPLIER_PHONE};

// =============================================================================
// ItemId
// =============================================================================

/// Row id of a persisted record.
///
/// Assigned by the store at creation and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
#[serde(transparent)]
pub struct ItemId(pub i64);

impl ItemId {
    /// Returns the raw row id.
    #[inline]
    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for ItemId {
    fn from(id: i64) -> Self {
        ItemId(id)
    }
}

// =============================================================================
// InventoryItem
// =============================================================================

/// A persisted inventory record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct InventoryItem {
    #[cfg_attr(feature = "sqlx", sqlx(rename = "_id"))]
    pub id: ItemId,

    pub product_name: String,

    /// Price as a floating-point currency amount (never negative).
    #[cfg_attr(feature = "sqlx", sqlx(rename = "product_price"))]
    pub price: f64,

    /// Units in stock (never negative).
    #[cfg_attr(feature = "sqlx", sqlx(rename = "product_quantity"))]
    pub quantity: i64,

    pub supplier_name: String,

    #[cfg_attr(feature = "sqlx", sqlx(rename = "supplier_phone_number"))]
    pub supplier_phone: String,
}

impl InventoryItem {
    /// Returns true if at least one unit can be sold.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.quantity > 0
    }

    /// Quantity after selling one unit. Never goes below zero.
    #[inline]
    pub fn quantity_after_sale(&self) -> i64 {
        (self.quantity - 1).max(0)
    }

    /// Keeps only the projected columns.
    pub fn project(&self, projection: &Projection) -> ItemRow {
        let pick = |column| projection.contains(column);
        ItemRow {
            id: self.id,
            product_name: pick(Column::ProductName).then(|| self.product_name.clone()),
            price: pick(Column::Price).then_some(self.price),
            quantity: pick(Column::Quantity).then_some(self.quantity),
            supplier_name: pick(Column::SupplierName).then(|| self.supplier_name.clone()),
            supplier_phone: pick(Column::SupplierPhone).then(|| self.supplier_phone.clone()),
        }
    }
}

// =============================================================================
// ItemForm
// =============================================================================

/// Raw caller input, one text value per editable field.
///
/// `None` means the caller did not supply the field at all: on update the
/// stored value is kept. `Some("")` means the field was supplied but left
/// blank: defaults apply.
///
/// ## Example
/// ```rust
/// use inventory_core::ItemForm;
///
/// // Edit screen "save": every field supplied
/// let edit = ItemForm::new()
///     .product_name("Silver Pen")
///     .price("19.95")
///     .quantity("1")
///     .supplier_name("Microsoft")
///     .supplier_phone("(360)514-1234");
/// assert!(!edit.is_blank());
///
/// // Sale button: only the quantity
/// let sale = ItemForm::new().quantity("0");
/// assert!(sale.product_name.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemForm {
    pub product_name: Option<String>,
    pub price: Option<String>,
    pub quantity: Option<String>,
    pub supplier_name: Option<String>,
    pub supplier_phone: Option<String>,
}

impl ItemForm {
    /// Creates an empty form (nothing supplied).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the product name text.
    pub fn product_name(mut self, value: impl Into<String>) -> Self {
        self.product_name = Some(value.into());
        self
    }

    /// Sets the price text.
    pub fn price(mut self, value: impl Into<String>) -> Self {
        self.price = Some(value.into());
        self
    }

    /// Sets the quantity text.
    pub fn quantity(mut self, value: impl Into<String>) -> Self {
        self.quantity = Some(value.into());
        self
    }

    /// Sets the supplier name text.
    pub fn supplier_name(mut self, value: impl Into<String>) -> Self {
        self.supplier_name = Some(value.into());
        self
    }

    /// Sets the supplier phone text.
    pub fn supplier_phone(mut self, value: impl Into<String>) -> Self {
        self.supplier_phone = Some(value.into());
        self
    }

    /// Returns true if no field carries any non-whitespace text.
    pub fn is_blank(&self) -> bool {
        [
            &self.product_name,
            &self.price,
            &self.quantity,
            &self.supplier_name,
            &self.supplier_phone,
        ]
        .iter()
        .all(|field| field.as_deref().map_or(true, |text| text.trim().is_empty()))
    }
}

/// Fills a form from a stored record, as the edit screen does when it opens
/// an existing item.
impl From<&InventoryItem> for ItemForm {
    fn from(item: &InventoryItem) -> Self {
        ItemForm::new()
            .product_name(item.product_name.as_str())
            .price(item.price.to_string())
            .quantity(item.quantity.to_string())
            .supplier_name(item.supplier_name.as_str())
            .supplier_phone(item.supplier_phone.as_str())
    }
}

// =============================================================================
// ItemValues / NewItem
// =============================================================================

/// Coerced form content. `None` fields were not supplied.
///
/// Produced by [`crate::validation::normalize_form`]; prices and quantities
/// are already numeric and non-negative, blank supplier fields already
/// carry their defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemValues {
    pub product_name: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i64>,
    pub supplier_name: Option<String>,
    pub supplier_phone: Option<String>,
}

impl ItemValues {
    /// Values that only set the quantity.
    pub fn quantity_only(quantity: i64) -> Self {
        ItemValues {
            quantity: Some(quantity.max(0)),
            ..Self::default()
        }
    }

    /// Fills unsupplied fields with column defaults for an insert.
    pub fn into_new_item(self) -> NewItem {
        NewItem {
            product_name: self.product_name.unwrap_or_default(),
            price: self.price.unwrap_or(DEFAULT_PRICE),
            quantity: self.quantity.unwrap_or(DEFAULT_QUANTITY),
            supplier_name: self
                .supplier_name
                .unwrap_or_else(|| DEFAULT_SUPPLIER_NAME.to_string()),
            supplier_phone: self
                .supplier_phone
                .unwrap_or_else(|| DEFAULT_SUPPLIER_PHONE.to_string()),
        }
    }
}

/// A complete record without an id, ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub product_name: String,
    pub price: f64,
    pub quantity: i64,
    pub supplier_name: String,
    pub supplier_phone: String,
}

// =============================================================================
// Projection / ItemRow
// =============================================================================

/// Columns a query should hand back. The id is always included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection(Vec<Column>);

impl Projection {
    /// Every column.
    pub fn all() -> Self {
        Projection(Column::ALL.to_vec())
    }

    /// Only the listed columns (plus the id).
    pub fn of(columns: impl IntoIterator<Item = Column>) -> Self {
        let mut columns: Vec<Column> = columns.into_iter().collect();
        columns.sort();
        columns.dedup();
        Projection(columns)
    }

    /// Returns true if `column` is part of the projection.
    pub fn contains(&self, column: Column) -> bool {
        column == Column::Id || self.0.contains(&column)
    }

    /// Projected columns, in table order.
    pub fn columns(&self) -> &[Column] {
        &self.0
    }
}

impl Default for Projection {
    fn default() -> Self {
        Projection::all()
    }
}

/// One row from the query path. Unprojected columns are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRow {
    pub id: ItemId,
    pub product_name: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i64>,
    pub supplier_name: Option<String>,
    pub supplier_phone: Option<String>,
}

// =============================================================================
// SaveOutcome
// =============================================================================

/// Result of a create or update that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome<T> {
    /// The form was blank; nothing was written.
    NothingToSave,
    /// The write happened. Carries the new id (create) or rows affected (update).
    Saved(T),
}

impl<T> SaveOutcome<T> {
    /// Returns the saved value, if anything was written.
    pub fn saved(self) -> Option<T> {
        match self {
            SaveOutcome::NothingToSave => None,
            SaveOutcome::Saved(value) => Some(value),
        }
    }

    /// Returns true if the form was blank.
    pub fn is_nothing_to_save(&self) -> bool {
        matches!(self, SaveOutcome::NothingToSave)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
