//! # CLI Error Type
//!
//! Unified error type for everything the console shows to the cashier.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Grocify                                │
//! │                                                                         │
//! │  Console                     Core                                       │
//! │  ───────                     ────                                       │
//! │                                                                         │
//! │  flow.handle(intent) ──────► CoreError ──────► CliError { code, msg }   │
//! │                                                     │                   │
//! │                                                     ▼                   │
//! │                                      printed, then back to the prompt   │
//! │                                                                         │
//! │  Lookups that should never fail (stale line, unknown item) are also    │
//! │  logged with tracing::error! since they point at a bookkeeping bug.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use grocify_core::CoreError;
use thiserror::Error;

/// Error shown to the cashier.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct CliError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Typed input was rejected; ask again.
    ValidationError,

    /// Receipt requested for an empty cart.
    EmptyCart,

    /// Removal requested without a selected line.
    NoSelection,

    /// Category, item or cart line does not exist.
    NotFound,

    /// Action not available on the current screen.
    InvalidAction,

    /// Receipt file could not be written.
    Io,
}

impl CliError {
    /// Creates a new CLI error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        CliError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::ValidationError, message)
    }
}

/// Converts core errors to CLI errors.
impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => CliError::validation(capitalize(&e.to_string())),
            CoreError::QuantityTooLarge { .. } | CoreError::AmountTooLarge { .. } => {
                CliError::validation(err.to_string())
            }
            CoreError::EmptyCart => CliError::new(ErrorCode::EmptyCart, err.to_string()),
            CoreError::NoSelection => CliError::new(ErrorCode::NoSelection, err.to_string()),
            CoreError::CategoryNotFound(name) => CliError::not_found("Category", &name),
            CoreError::ItemNotFound(name) => {
                tracing::error!(item = %name, "Item lookup failed for a name offered by the menu");
                CliError::not_found("Item", &name)
            }
            CoreError::LineNotFound(id) => {
                tracing::error!(line_id = %id, "Cart line lookup failed for an id taken from a snapshot");
                CliError::not_found("Cart line", &id)
            }
            CoreError::InvalidAction { .. } => {
                CliError::new(ErrorCode::InvalidAction, err.to_string())
            }
            CoreError::ReceiptWrite(ref e) => {
                tracing::error!(error = %e, "Receipt could not be written");
                CliError::new(ErrorCode::Io, err.to_string())
            }
        }
    }
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
