//! # Validation Module
//!
//! Input validation for everything typed at the counter.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Console (apps/cli)                                           │
//! │  └── Reads raw lines, never interprets them                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Flow (grocify-core::flow)                                    │
//! │  └── THIS MODULE: turns raw text into typed, checked values            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart / Catalog                                               │
//! │  └── Invariants on typed values (u32 quantity, unique names)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use grocify_core::validation::{parse_quantity, validate_phone};
//!
//! assert_eq!(parse_quantity(" 3 ").unwrap(), 3);
//! assert!(parse_quantity("0").is_err());
//! assert_eq!(validate_phone("9876543210").unwrap(), "9876543210");
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Number of digits in a customer phone number.
pub const PHONE_DIGITS: usize = 10;

// =============================================================================
// Customer Validators
// =============================================================================

/// Validates a customer name and returns it trimmed.
///
/// ## Rules
/// - Must not be empty after trimming surrounding whitespace
pub fn validate_customer_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    Ok(name.to_string())
}

/// Validates a phone number and returns it trimmed.
///
/// ## Rules
/// - Exactly 10 characters after trimming
/// - Every character an ASCII digit (no `+`, spaces or dashes)
///
/// ## Example
/// ```rust
/// use grocify_core::validation::validate_phone;
///
/// assert!(validate_phone("9876543210").is_ok());
/// assert!(validate_phone("98765").is_err());
/// assert!(validate_phone("98765-4321").is_err());
/// ```
pub fn validate_phone(phone: &str) -> ValidationResult<String> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    if phone.chars().count() != PHONE_DIGITS || !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: format!("must be exactly {} digits", PHONE_DIGITS),
        });
    }

    Ok(phone.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Parses a typed quantity.
///
/// ## Rules
/// - Surrounding whitespace is ignored
/// - Must be a whole number (`2.5`, `two` and `1e3` are rejected)
/// - Must be positive (> 0)
///
/// ## User Workflow
/// ```text
/// Enter quantity for Milk (1L): 2
///       │
///       ▼
/// parse_quantity("2") ← THIS FUNCTION
///       │
///       ├── "" / "abc" / "2.5" → Error: invalid format, ask again
///       ├── "0" / "-1"         → Error: must be positive, ask again
///       └── OK(2)              → Cart::add_item
/// ```
pub fn parse_quantity(input: &str) -> ValidationResult<u32> {
    let input = input.trim();

    if input.is_empty() {
        return Err(ValidationError::Required {
            field: "quantity".to_string(),
        });
    }

    let value: i64 = input.parse().map_err(|_| ValidationError::InvalidFormat {
        field: "quantity".to_string(),
        reason: "must be a whole number".to_string(),
    })?;

    validate_quantity(value)?;

    u32::try_from(value).map_err(|_| ValidationError::InvalidFormat {
        field: "quantity".to_string(),
        reason: format!("must not exceed {}", u32::MAX),
    })
}

/// Validates an already-numeric quantity.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a catalog price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: "must not be negative".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Catalog Validators
// =============================================================================

/// Validates a category or item name from the catalog table.
pub fn validate_catalog_name(field: &str, name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
