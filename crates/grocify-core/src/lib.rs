//! # grocify-core: Checkout Logic for Grocify POS
//!
//! Everything a single checkout session needs, as plain data and pure
//! functions. Terminal handling, files and logging live in the CLI crate.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Grocify POS Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    grocify (CLI binary)                         │   │
//! │  │    console prompts ──► Intents        ReceiptSink ──► .txt file │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ grocify-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────────┐   │   │
//! │  │   │ catalog  │─►│   flow   │─►│   cart   │─►│   receipt    │   │   │
//! │  │   │ Catalog  │  │ Intents  │  │ CartLine │  │ pages, file  │   │   │
//! │  │   └──────────┘  └──────────┘  └──────────┘  └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO TERMINAL • NO FILES • NO GLOBALS                           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money in paise (no floating point)
//! - [`types`] - Customer, catalog items, cart lines
//! - [`error`] - Domain error types
//! - [`validation`] - Input rules for names, phones, quantities, prices
//! - [`catalog`] - The price list and its TOML table form
//! - [`cart`] - The session cart
//! - [`receipt`] - Paginated plain-text receipts
//! - [`flow`] - The checkout state machine
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use grocify_core::{Catalog, CheckoutFlow, Intent, Outcome, Receipt, ReceiptFormatter};
//!
//! let mut flow = CheckoutFlow::new(Catalog::default(), ReceiptFormatter::default());
//! let mut saved: Vec<Receipt> = Vec::new();
//!
//! for intent in [
//!     Intent::SubmitCustomer { name: "Asha".into(), phone: "9876543210".into() },
//!     Intent::OpenCategory("Food Items".into()),
//!     Intent::SelectItem("Milk (1L)".into()),
//!     Intent::SubmitQuantity("2".into()),
//! ] {
//!     flow.handle(intent, &mut saved).unwrap();
//! }
//!
//! let at = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap().and_hms_opt(18, 4, 9).unwrap();
//! let outcome = flow.handle(Intent::Generate { at }, &mut saved).unwrap();
//!
//! assert!(matches!(outcome, Outcome::ReceiptGenerated { .. }));
//! assert_eq!(saved[0].file_name, "receipt_20260105_180409.txt");
//! assert!(flow.cart_snapshot().is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod flow;
pub mod money;
pub mod receipt;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartSnapshot};
pub use catalog::{Catalog, CatalogTable};
pub use error::{CoreError, CoreResult, ValidationError};
pub use flow::{CheckoutFlow, FlowState, Intent, Outcome, ReceiptSink};
pub use money::Money;
pub use receipt::{Receipt, ReceiptFormatter, ReceiptLayout};
pub use types::*;
