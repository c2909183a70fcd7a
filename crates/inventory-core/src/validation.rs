//! # Validation Module
//!
//! Turns caller text into storable values.
//!
//! ## Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Field           Blank text            Other text                       │
//! │  ─────────────   ───────────────────   ───────────────────────────────  │
//! │  product name    ""                    trimmed                          │
//! │  price           0.0                   parsed f64, negative → 0.0       │
//! │  quantity        0                     parsed i64, negative → 0         │
//! │  supplier name   "Unknown Supplier"    trimmed                          │
//! │  supplier phone  "Unknown Phone"       trimmed                          │
//! │                                                                         │
//! │  Every field blank or absent → nothing to save (not an error)           │
//! │  Unparseable number → ValidationError::NotANumber                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use inventory_core::ItemForm;
//! use inventory_core::validation::{coerce_price, normalize_form};
//!
//! assert_eq!(coerce_price("").unwrap(), 0.0);
//! assert!(coerce_price("abc").is_err());
//!
//! let values = normalize_form(&ItemForm::new().quantity("-4")).unwrap().unwrap();
//! assert_eq!(values.quantity, Some(0));
//! ```

use crate::contract::{Column, DEFAULT_PRICE, DEFAULT_QUANTITY, DEFAULT_SUPPLIER_NAME, DEFAULT_SUPPLIER_PHONE};
use crate::error::{ValidationError, ValidationResult};
use crate::types::{ItemForm, ItemValues};

// =============================================================================
// Numeric Coercion
// =============================================================================

/// Coerces price text to a non-negative amount.
///
/// Blank text is `0.0`. Negative amounts clamp to `0.0`.
pub fn coerce_price(text: &str) -> ValidationResult<f64> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(DEFAULT_PRICE);
    }

    let price: f64 = text
        .parse()
        .map_err(|_| ValidationError::not_a_number("price", text))?;

    if !price.is_finite() {
        return Err(ValidationError::not_a_number("price", text));
    }

    Ok(price.max(0.0))
}

/// Coerces quantity text to a non-negative whole number.
///
/// Blank text is `0`. Negative counts clamp to `0`.
pub fn coerce_quantity(text: &str) -> ValidationResult<i64> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(DEFAULT_QUANTITY);
    }

    let quantity: i64 = text
        .parse()
        .map_err(|_| ValidationError::not_a_number("quantity", text))?;

    Ok(quantity.max(0))
}

/// Returns the numeric columns whose text is a negative number and will be
/// clamped to zero.
pub fn clamped_fields(form: &ItemForm) -> Vec<Column> {
    let mut clamped = Vec::new();

    if let Some(price) = form.price.as_deref() {
        if price.trim().parse::<f64>().is_ok_and(|p| p < 0.0) {
            clamped.push(Column::Price);
        }
    }

    if let Some(quantity) = form.quantity.as_deref() {
        if quantity.trim().parse::<i64>().is_ok_and(|q| q < 0) {
            clamped.push(Column::Quantity);
        }
    }

    clamped
}

// =============================================================================
// Form Normalization
// =============================================================================

/// Normalizes a form into storable values.
///
/// ## Returns
/// * `Ok(None)` - every field was blank or absent: nothing to save
/// * `Ok(Some(values))` - supplied fields coerced, defaults applied to blanks
/// * `Err(ValidationError)` - a numeric field could not be parsed
pub fn normalize_form(form: &ItemForm) -> ValidationResult<Option<ItemValues>> {
    if form.is_blank() {
        return Ok(None);
    }

    let values = ItemValues {
        product_name: form.product_name.as_deref().map(|s| s.trim().to_string()),
        price: form.price.as_deref().map(coerce_price).transpose()?,
        quantity: form.quantity.as_deref().map(coerce_quantity).transpose()?,
        supplier_name: form
            .supplier_name
            .as_deref()
            .map(|s| text_or_default(s, DEFAULT_SUPPLIER_NAME)),
        supplier_phone: form
            .supplier_phone
            .as_deref()
            .map(|s| text_or_default(s, DEFAULT_SUPPLIER_PHONE)),
    };

    Ok(Some(values))
}

fn text_or_default(text: &str, default: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        default.to_string()
    } else {
        text.to_string()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
