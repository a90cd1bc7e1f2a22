//! # Checkout Flow
//!
//! The interaction state machine. Front-ends translate user actions into
//! [`Intent`]s and re-render from snapshots; this module validates each
//! intent and mutates the session.
//!
//! ## States
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CollectingCustomerInfo ──SubmitCustomer (valid)──►  BrowsingCatalog    │
//! │                                                      │   ▲    ▲         │
//! │                                         SelectItem   │   │    │         │
//! │                                                      ▼   │    │         │
//! │                   PromptingQuantity ──SubmitQuantity─────┘    │         │
//! │                                      CancelQuantity           │         │
//! │                                                               │         │
//! │  BrowsingCatalog ──ReviewCart──► ReviewingCart ──Back─────────┤         │
//! │                                   SelectLine                  │         │
//! │                                   RemoveSelected              │         │
//! │                                                               │         │
//! │  BrowsingCatalog / ReviewingCart ──Generate──► (receipt stored,         │
//! │                                                 cart cleared) ┘         │
//! │                                                                         │
//! │  Every rejected intent leaves the state unchanged.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDateTime;

use crate::cart::{Cart, CartSnapshot};
use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::receipt::{Receipt, ReceiptFormatter};
use crate::types::{Customer, LineId};
use crate::validation::parse_quantity;

// =============================================================================
// Receipt Sink
// =============================================================================

/// Destination for generated receipts.
///
/// The flow clears the cart only after `store` succeeds.
pub trait ReceiptSink {
    type Error: std::fmt::Display;

    /// Stores the receipt and returns where it went (a path, a name, ...).
    fn store(&mut self, receipt: &Receipt) -> Result<String, Self::Error>;
}

/// Keeps receipts in memory.
impl ReceiptSink for Vec<Receipt> {
    type Error = std::convert::Infallible;

    fn store(&mut self, receipt: &Receipt) -> Result<String, Self::Error> {
        self.push(receipt.clone());
        Ok(receipt.file_name.clone())
    }
}

// =============================================================================
// Session
// =============================================================================

/// Everything that belongs to one customer visit.
#[derive(Debug, Clone)]
pub struct Session {
    catalog: Catalog,
    customer: Option<Customer>,
    cart: Cart,
}

impl Session {
    pub fn new(catalog: Catalog) -> Self {
        Session {
            catalog,
            customer: None,
            cart: Cart::new(),
        }
    }
}

// =============================================================================
// States and Intents
// =============================================================================

/// Where the flow currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowState {
    /// Waiting for a valid name and phone.
    CollectingCustomerInfo,

    /// Showing the category list (`None`) or one category's items.
    BrowsingCatalog { category: Option<String> },

    /// Waiting for a quantity for the selected item.
    PromptingQuantity {
        category: String,
        item: String,
        unit_price: Money,
    },

    /// Showing the cart, optionally with a line selected.
    ReviewingCart { selected: Option<LineId> },
}

impl FlowState {
    fn describe(&self) -> &'static str {
        match self {
            FlowState::CollectingCustomerInfo => "entering customer details",
            FlowState::BrowsingCatalog { .. } => "browsing the catalog",
            FlowState::PromptingQuantity { .. } => "entering a quantity",
            FlowState::ReviewingCart { .. } => "reviewing the cart",
        }
    }
}

/// A user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    SubmitCustomer { name: String, phone: String },
    OpenCategory(String),
    Back,
    SelectItem(String),
    SubmitQuantity(String),
    CancelQuantity,
    ReviewCart,
    SelectLine(LineId),
    RemoveSelected,
    /// Generate a receipt stamped with the given local time.
    Generate { at: NaiveDateTime },
}

impl Intent {
    fn describe(&self) -> &'static str {
        match self {
            Intent::SubmitCustomer { .. } => "submit customer details",
            Intent::OpenCategory(_) => "open a category",
            Intent::Back => "go back",
            Intent::SelectItem(_) => "select an item",
            Intent::SubmitQuantity(_) => "enter a quantity",
            Intent::CancelQuantity => "cancel the quantity",
            Intent::ReviewCart => "review the cart",
            Intent::SelectLine(_) => "select a cart line",
            Intent::RemoveSelected => "remove an item",
            Intent::Generate { .. } => "generate a receipt",
        }
    }
}

/// What an accepted intent did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Only the state changed.
    Moved,

    /// Quantity was committed to the cart.
    ItemAdded {
        name: String,
        added: u32,
        line_quantity: u32,
    },

    /// A cart line was deleted.
    LineRemoved { name: String },

    /// The receipt was stored and the cart cleared.
    ReceiptGenerated {
        location: String,
        total: Money,
        pages: usize,
    },
}

// =============================================================================
// Flow
// =============================================================================

/// The checkout state machine for one session.
#[derive(Debug, Clone)]
pub struct CheckoutFlow {
    session: Session,
    state: FlowState,
    formatter: ReceiptFormatter,
}

impl CheckoutFlow {
    pub fn new(catalog: Catalog, formatter: ReceiptFormatter) -> Self {
        CheckoutFlow {
            session: Session::new(catalog),
            state: FlowState::CollectingCustomerInfo,
            formatter,
        }
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.session.catalog
    }

    pub fn customer(&self) -> Option<&Customer> {
        self.session.customer.as_ref()
    }

    pub fn cart_snapshot(&self) -> CartSnapshot {
        self.session.cart.snapshot()
    }

    /// Applies one intent.
    ///
    /// On error the state and the cart are exactly as before the call.
    pub fn handle<S: ReceiptSink>(&mut self, intent: Intent, sink: &mut S) -> CoreResult<Outcome> {
        match (&self.state, intent) {
            (FlowState::CollectingCustomerInfo, Intent::SubmitCustomer { name, phone }) => {
                let customer = Customer::new(&name, &phone)?;
                self.session.customer = Some(customer);
                self.state = FlowState::BrowsingCatalog { category: None };
                Ok(Outcome::Moved)
            }

            (
                FlowState::BrowsingCatalog { .. } | FlowState::ReviewingCart { .. },
                Intent::OpenCategory(category),
            ) => {
                self.session.catalog.list_items(&category)?;
                self.state = FlowState::BrowsingCatalog {
                    category: Some(category),
                };
                Ok(Outcome::Moved)
            }

            (FlowState::BrowsingCatalog { category: Some(category) }, Intent::SelectItem(name)) => {
                let item = self
                    .session
                    .catalog
                    .list_items(category)?
                    .iter()
                    .find(|i| i.name == name)
                    .ok_or(CoreError::ItemNotFound(name))?;
                self.state = FlowState::PromptingQuantity {
                    category: category.clone(),
                    item: item.name.clone(),
                    unit_price: item.price,
                };
                Ok(Outcome::Moved)
            }

            (
                FlowState::PromptingQuantity {
                    category,
                    item,
                    unit_price,
                },
                Intent::SubmitQuantity(text),
            ) => {
                let quantity = parse_quantity(&text)?;
                let id = self.session.cart.add_item(item, *unit_price, quantity)?;
                let line_quantity = self
                    .session
                    .cart
                    .line(id)
                    .map(|l| l.quantity)
                    .unwrap_or(quantity);
                let outcome = Outcome::ItemAdded {
                    name: item.clone(),
                    added: quantity,
                    line_quantity,
                };
                self.state = FlowState::BrowsingCatalog {
                    category: Some(category.clone()),
                };
                Ok(outcome)
            }

            (
                FlowState::PromptingQuantity { category, .. },
                Intent::CancelQuantity | Intent::Back,
            ) => {
                self.state = FlowState::BrowsingCatalog {
                    category: Some(category.clone()),
                };
                Ok(Outcome::Moved)
            }

            (FlowState::BrowsingCatalog { .. } | FlowState::ReviewingCart { .. }, Intent::Back) => {
                self.state = FlowState::BrowsingCatalog { category: None };
                Ok(Outcome::Moved)
            }

            (FlowState::BrowsingCatalog { .. }, Intent::ReviewCart) => {
                self.state = FlowState::ReviewingCart { selected: None };
                Ok(Outcome::Moved)
            }

            (FlowState::ReviewingCart { .. }, Intent::SelectLine(id)) => {
                if self.session.cart.line(id).is_none() {
                    return Err(CoreError::LineNotFound(id.to_string()));
                }
                self.state = FlowState::ReviewingCart { selected: Some(id) };
                Ok(Outcome::Moved)
            }

            (FlowState::ReviewingCart { selected }, Intent::RemoveSelected) => {
                let id = selected.ok_or(CoreError::NoSelection)?;
                let removed = self.session.cart.remove_line(id)?;
                self.state = FlowState::ReviewingCart { selected: None };
                Ok(Outcome::LineRemoved { name: removed.name })
            }

            (
                FlowState::BrowsingCatalog { .. } | FlowState::ReviewingCart { .. },
                Intent::Generate { at },
            ) => self.generate(at, sink),

            (state, intent) => Err(CoreError::InvalidAction {
                action: intent.describe().to_string(),
                state: state.describe().to_string(),
            }),
        }
    }

    fn generate<S: ReceiptSink>(&mut self, at: NaiveDateTime, sink: &mut S) -> CoreResult<Outcome> {
        let snapshot = self.session.cart.snapshot();
        if snapshot.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let customer = self
            .session
            .customer
            .as_ref()
            .ok_or_else(|| CoreError::InvalidAction {
                action: Intent::Generate { at }.describe().to_string(),
                state: FlowState::CollectingCustomerInfo.describe().to_string(),
            })?;

        let receipt = self.formatter.render(customer, &snapshot, at)?;
        let location = sink
            .store(&receipt)
            .map_err(|e| CoreError::ReceiptWrite(e.to_string()))?;

        self.session.cart.clear();
        self.state = FlowState::BrowsingCatalog { category: None };

        Ok(Outcome::ReceiptGenerated {
            location,
            total: receipt.total,
            pages: receipt.page_count(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
