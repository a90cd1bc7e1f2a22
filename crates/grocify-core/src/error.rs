//! # Error Types
//!
//! Domain-specific error types for grocify-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  grocify-core errors (this file)                                       │
//! │  ├── CoreError        - Cart, catalog and checkout failures            │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CliError         - What the person at the terminal sees           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → prompt                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these are fatal: every variant is reported and the user is
//! returned to a prompt.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Category name is not in the catalog.
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    /// Item name is not in the catalog, or not in the cart.
    ///
    /// ## When This Occurs
    /// - `Cart::remove_item` with a name that has no line
    /// - `Catalog::find_item` with an unknown name
    ///
    /// The front-end only ever offers names it got from the catalog or a
    /// cart snapshot, so reaching this from the UI is a bookkeeping bug.
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// Line identifier does not match any cart line.
    #[error("Cart line not found: {0}")]
    LineNotFound(String),

    /// Receipt requested for a cart with no lines.
    #[error("Cart is empty, add items before generating a receipt")]
    EmptyCart,

    /// Removal requested while no cart line is selected.
    #[error("No cart line selected, select an item to remove")]
    NoSelection,

    /// Accumulated quantity does not fit the quantity type.
    #[error("Quantity for {item} would exceed the maximum of {max}")]
    QuantityTooLarge { item: String, max: u32 },

    /// A line total or the cart total would not fit in paise.
    #[error("Amount for {item} is too large to bill")]
    AmountTooLarge { item: String },

    /// The intent is not accepted in the current flow state.
    #[error("Cannot {action} while {state}")]
    InvalidAction { action: String, state: String },

    /// The receipt sink could not store the rendered receipt.
    #[error("Failed to save receipt: {0}")]
    ReceiptWrite(String),

    /// Validation error (wraps ValidationError).
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when typed input (customer details, quantities) or the
/// catalog table doesn't meet requirements.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be a positive whole number.
    #[error("{field} must be a positive whole number")]
    MustBePositive { field: String },

    /// Invalid format (e.g. phone number with letters).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g. the same item listed twice in the catalog).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
