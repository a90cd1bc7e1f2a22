//! # Cart
//!
//! The session's shopping cart.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Flow Intent              Cart Method             Cart State Change     │
//! │  ───────────              ───────────             ─────────────────     │
//! │                                                                         │
//! │  SubmitQuantity ────────► add_item() ───────────► push or qty += n     │
//! │                                                                         │
//! │  RemoveSelected ────────► remove_line() ────────► lines.remove(i)      │
//! │                                                                         │
//! │  Generate (success) ────► clear() ──────────────► lines.clear()        │
//! │                                                                         │
//! │  Any re-render ─────────► snapshot() ───────────► (read only)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CartLine, LineId};
use crate::validation::validate_quantity;

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by item name (adding the same item increases quantity)
/// - Quantity is always > 0; removing deletes the line outright
/// - Lines stay in insertion order
/// - The unit price of a line is the price seen at first insertion
#[derive(Debug, Clone, Default, Serialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds an item to the cart or increases its quantity if already present.
    ///
    /// ## Behavior
    /// - Zero quantity: `Validation` error, cart unchanged
    /// - Item already in cart: quantity accumulates, unit price is kept
    /// - Item not in cart: appended as a new line
    /// - Line total or cart total would overflow: `AmountTooLarge`, cart
    ///   unchanged
    ///
    /// ## Returns
    /// The identifier of the affected line.
    pub fn add_item(&mut self, name: &str, unit_price: Money, quantity: u32) -> CoreResult<LineId> {
        validate_quantity(i64::from(quantity))?;

        let existing = self.lines.iter().position(|l| l.name == name);
        let (price, new_quantity) = match existing {
            Some(i) => {
                let line = &self.lines[i];
                let total_quantity = line.quantity.checked_add(quantity).ok_or_else(|| {
                    CoreError::QuantityTooLarge {
                        item: name.to_string(),
                        max: u32::MAX,
                    }
                })?;
                (line.unit_price, total_quantity)
            }
            None => (unit_price, quantity),
        };
        self.check_amounts(name, existing, price, new_quantity)?;

        if let Some(i) = existing {
            let line = &mut self.lines[i];
            line.quantity = new_quantity;
            return Ok(line.id);
        }

        let line = CartLine {
            id: LineId::new(),
            name: name.to_string(),
            unit_price,
            quantity,
        };
        let id = line.id;
        self.lines.push(line);
        Ok(id)
    }

    /// Keeps every line total and the cart total within `Money`'s range,
    /// so `line_total()` and `compute_total()` never overflow.
    fn check_amounts(
        &self,
        name: &str,
        replaced: Option<usize>,
        price: Money,
        quantity: u32,
    ) -> CoreResult<()> {
        let too_large = || CoreError::AmountTooLarge {
            item: name.to_string(),
        };

        let line_total = price.checked_multiply_quantity(quantity).ok_or_else(too_large)?;
        self.lines
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != replaced)
            .try_fold(line_total, |acc, (_, l)| acc.checked_add(l.line_total()))
            .ok_or_else(too_large)?;

        Ok(())
    }

    /// Removes the line for an item name.
    pub fn remove_item(&mut self, name: &str) -> CoreResult<CartLine> {
        let index = self
            .lines
            .iter()
            .position(|l| l.name == name)
            .ok_or_else(|| CoreError::ItemNotFound(name.to_string()))?;
        Ok(self.lines.remove(index))
    }

    /// Removes a line by its identifier.
    pub fn remove_line(&mut self, id: LineId) -> CoreResult<CartLine> {
        let index = self
            .lines
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| CoreError::LineNotFound(id.to_string()))?;
        Ok(self.lines.remove(index))
    }

    /// Looks up a line by its identifier.
    pub fn line(&self, id: LineId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id == id)
    }

    /// Sum of all line totals; zero for an empty cart.
    pub fn compute_total(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Clears all lines from the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Read-only view of the lines in insertion order, with the total.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            lines: self.lines.clone(),
            total: self.compute_total(),
        }
    }

    /// Returns the number of lines in the cart.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the total quantity of all lines.
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Immutable copy of the cart, used for display and receipt rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartSnapshot {
    pub lines: Vec<CartLine>,
    pub total: Money,
}

impl CartSnapshot {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Maps a 1-based display index (as shown in the cart view) to a line.
    pub fn line_at(&self, display_index: usize) -> Option<&CartLine> {
        display_index
            .checked_sub(1)
            .and_then(|i| self.lines.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rupees(r: i64) -> Money {
        Money::from_rupees(r)
    }

    #[test]
    fn test_cart_add_item() {
        let mut cart = Cart::new();
        cart.add_item("Milk (1L)", rupees(30), 2).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.compute_total(), rupees(60));
    }

    #[test]
    fn test_cart_add_same_item_increases_quantity() {
        let mut cart = Cart::new();
        let first = cart.add_item("Rice (1kg)", rupees(60), 3).unwrap();
        let second = cart.add_item("Rice (1kg)", rupees(60), 3).unwrap();

        assert_eq!(first, second);
        assert_eq!(cart.line_count(), 1);

        let snapshot = cart.snapshot();
        assert_eq!(snapshot.lines[0].quantity, 6);
        assert_eq!(snapshot.lines[0].line_total(), rupees(360));
    }

    #[test]
    fn test_repeated_adds_sum_quantities() {
        let mut cart = Cart::new();
        let quantities = [1, 4, 2, 7, 3];
        for qty in quantities {
            cart.add_item("Tea (250g)", rupees(75), qty).unwrap();
        }

        let expected: u32 = quantities.iter().sum();
        let line = &cart.snapshot().lines[0];
        assert_eq!(line.quantity, expected);
        assert_eq!(line.line_total(), rupees(75).multiply_quantity(expected));
    }

    #[test]
    fn test_first_price_wins() {
        let mut cart = Cart::new();
        cart.add_item("Salt (1kg)", rupees(20), 1).unwrap();
        cart.add_item("Salt (1kg)", rupees(25), 1).unwrap();

        let line = &cart.snapshot().lines[0];
        assert_eq!(line.unit_price, rupees(20));
        assert_eq!(line.line_total(), rupees(40));
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let mut cart = Cart::new();
        let err = cart.add_item("Soap (bar)", rupees(35), 0).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_quantity_overflow_rejected() {
        let mut cart = Cart::new();
        cart.add_item("Salt (1kg)", rupees(20), u32::MAX).unwrap();
        let err = cart.add_item("Salt (1kg)", rupees(20), 1).unwrap_err();
        assert!(matches!(err, CoreError::QuantityTooLarge { .. }));
        assert_eq!(cart.snapshot().lines[0].quantity, u32::MAX);
    }

    #[test]
    fn test_line_amount_overflow_rejected() {
        let mut cart = Cart::new();
        let bar = Money::from_rupees(10_000_000_000_000);

        let err = cart.add_item("Gold Bar", bar, 10_000).unwrap_err();
        assert!(matches!(err, CoreError::AmountTooLarge { .. }));
        assert!(cart.is_empty());

        cart.add_item("Gold Bar", bar, 9_000).unwrap();
        let err = cart.add_item("Gold Bar", bar, 1_000).unwrap_err();
        assert!(matches!(err, CoreError::AmountTooLarge { .. }));

        let snapshot = cart.snapshot();
        assert_eq!(snapshot.lines[0].quantity, 9_000);
        assert_eq!(snapshot.total, bar.multiply_quantity(9_000));
    }

    #[test]
    fn test_cart_total_overflow_rejected() {
        let mut cart = Cart::new();
        let bar = Money::from_rupees(10_000_000_000_000);
        cart.add_item("Gold Bar", bar, 9_000).unwrap();

        let err = cart.add_item("Platinum Bar", bar, 1_000).unwrap_err();
        assert!(matches!(err, CoreError::AmountTooLarge { item } if item == "Platinum Bar"));
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.compute_total(), bar.multiply_quantity(9_000));
    }

    #[test]
    fn test_remove_item_excludes_it_from_total() {
        let mut cart = Cart::new();
        cart.add_item("Milk (1L)", rupees(30), 2).unwrap();
        cart.add_item("Bread (loaf)", rupees(25), 1).unwrap();

        let removed = cart.remove_item("Milk (1L)").unwrap();
        assert_eq!(removed.quantity, 2);
        assert_eq!(cart.compute_total(), rupees(25));
        assert_eq!(cart.line_count(), 1);

        assert!(matches!(
            cart.remove_item("Milk (1L)"),
            Err(CoreError::ItemNotFound(_))
        ));
    }

    #[test]
    fn test_remove_line_by_id() {
        let mut cart = Cart::new();
        let milk = cart.add_item("Milk (1L)", rupees(30), 1).unwrap();
        let bread = cart.add_item("Bread (loaf)", rupees(25), 1).unwrap();

        cart.remove_line(milk).unwrap();
        assert!(cart.line(milk).is_none());
        assert!(cart.line(bread).is_some());
        assert!(matches!(
            cart.remove_line(milk),
            Err(CoreError::LineNotFound(_))
        ));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = Cart::new();
        cart.add_item("Tea (250g)", rupees(75), 1).unwrap();
        cart.add_item("Milk (1L)", rupees(30), 1).unwrap();
        cart.add_item("Tea (250g)", rupees(75), 1).unwrap();
        cart.add_item("Bread (loaf)", rupees(25), 1).unwrap();

        let names: Vec<String> = cart.snapshot().lines.into_iter().map(|l| l.name).collect();
        assert_eq!(names, vec!["Tea (250g)", "Milk (1L)", "Bread (loaf)"]);
    }

    #[test]
    fn test_empty_total_is_zero() {
        let cart = Cart::new();
        assert!(cart.compute_total().is_zero());
        assert!(cart.snapshot().total.is_zero());
    }

    #[test]
    fn test_cart_clear() {
        let mut cart = Cart::new();
        cart.add_item("Handwash", rupees(60), 2).unwrap();
        assert!(!cart.is_empty());

        cart.clear();
        assert!(cart.is_empty());
        assert!(cart.snapshot().lines.is_empty());
    }

    #[test]
    fn test_snapshot_line_at() {
        let mut cart = Cart::new();
        cart.add_item("Milk (1L)", rupees(30), 1).unwrap();
        cart.add_item("Bread (loaf)", rupees(25), 1).unwrap();

        let snapshot = cart.snapshot();
        assert_eq!(snapshot.line_at(2).unwrap().name, "Bread (loaf)");
        assert!(snapshot.line_at(0).is_none());
        assert!(snapshot.line_at(3).is_none());
    }
}
