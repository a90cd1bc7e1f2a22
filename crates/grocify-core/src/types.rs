//! # Domain Types
//!
//! Core domain types used throughout Grocify POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   CatalogItem   │   │    CartLine     │   │    Customer     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  category       │   │  id (LineId)    │   │  name           │       │
//! │  │  name           │──►│  name (key)     │   │  phone          │       │
//! │  │  price          │   │  unit_price     │   │  (10 digits)    │       │
//! │  └─────────────────┘   │  quantity       │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Cart lines carry two keys:
//! - `name`: the business key, unique within a cart
//! - `id`: a UUID v4 handed to the front-end, so a row on screen maps to a
//!   line without relying on its position

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;
use crate::validation::{validate_customer_name, validate_phone, ValidationResult};

// =============================================================================
// Customer
// =============================================================================

/// The customer a session is billed to.
///
/// Fields are private: a `Customer` only exists once both values passed
/// validation, and it never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Customer {
    name: String,
    phone: String,
}

impl Customer {
    /// Validates and creates a customer.
    ///
    /// ## Example
    /// ```rust
    /// use grocify_core::Customer;
    ///
    /// let asha = Customer::new(" Asha ", "9876543210").unwrap();
    /// assert_eq!(asha.name(), "Asha");
    /// assert!(Customer::new("", "9876543210").is_err());
    /// assert!(Customer::new("Asha", "12345").is_err());
    /// ```
    pub fn new(name: &str, phone: &str) -> ValidationResult<Self> {
        Ok(Customer {
            name: validate_customer_name(name)?,
            phone: validate_phone(phone)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }
}

// =============================================================================
// Catalog Item
// =============================================================================

/// An item offered in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogItem {
    /// Category the item is listed under.
    pub category: String,

    /// Display name; also the cart key.
    pub name: String,

    /// Authoritative unit price.
    pub price: Money,
}

// =============================================================================
// Line Identifier
// =============================================================================

/// Stable identifier of a cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineId(Uuid);

impl LineId {
    pub(crate) fn new() -> Self {
        LineId(Uuid::new_v4())
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// A line in the cart.
///
/// The line total is never stored; it is always `unit_price × quantity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    /// Identifier shown to the front-end.
    pub id: LineId,

    /// Item name at time of adding; unique within a cart.
    pub name: String,

    /// Price at first insertion.
    pub unit_price: Money,

    /// Always > 0.
    pub quantity: u32,
}

impl CartLine {
    /// Calculates the line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
