//! # Console
//!
//! Line-oriented terminal front-end. Each screen reads one line, turns it
//! into intents for the [`CheckoutFlow`], prints what happened, and redraws
//! from the flow's new state.
//!
//! ## Screens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  FlowState                      Screen            Keys                  │
//! │  ─────────                      ──────            ────                  │
//! │  CollectingCustomerInfo ──────► name + phone                            │
//! │  BrowsingCatalog (none) ──────► categories        1..n  c  g  q         │
//! │  BrowsingCatalog (some) ──────► items + prices    1..n  b  c  g  q      │
//! │  PromptingQuantity ───────────► quantity          number, Enter=cancel  │
//! │  ReviewingCart ───────────────► cart table        1..n  b  g  q         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! End of input behaves like `q`.

use std::io::{self, BufRead, Write};

use chrono::NaiveDateTime;
use grocify_core::{CartSnapshot, CheckoutFlow, FlowState, Intent, Money, Outcome, ReceiptSink};
use tracing::{debug, info, warn};

use crate::error::CliError;

/// Printed after every saved receipt.
pub const FAREWELL: &str = "Thank you for shopping with Grocify! We hope to see you again!";

/// What a screen asked for.
enum Step {
    Send(Vec<Intent>),
    Redraw,
    Quit,
}

/// A menu answer.
enum Choice {
    Number(usize),
    Key(char),
    Unknown,
}

impl Choice {
    fn parse(input: &str) -> Self {
        let input = input.trim();
        if let Ok(n) = input.parse::<usize>() {
            return Choice::Number(n);
        }
        let mut chars = input.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Choice::Key(c.to_ascii_lowercase()),
            _ => Choice::Unknown,
        }
    }
}

fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// Terminal front-end over any reader/writer pair.
pub struct Console<R, W> {
    input: R,
    output: W,
    currency_symbol: String,
    clock: fn() -> NaiveDateTime,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, currency_symbol: impl Into<String>) -> Self {
        Console {
            input,
            output,
            currency_symbol: currency_symbol.into(),
            clock: local_now,
        }
    }

    /// Replaces the wall clock used to stamp receipts.
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs the session until the cashier quits or input ends.
    pub fn run<S: ReceiptSink>(&mut self, flow: &mut CheckoutFlow, sink: &mut S) -> io::Result<()> {
        writeln!(self.output, "Welcome to Grocify!")?;

        loop {
            let step = match flow.state().clone() {
                FlowState::CollectingCustomerInfo => self.customer_screen()?,
                FlowState::BrowsingCatalog { category: None } => self.category_screen(flow)?,
                FlowState::BrowsingCatalog {
                    category: Some(category),
                } => self.item_screen(flow, &category)?,
                FlowState::PromptingQuantity {
                    item, unit_price, ..
                } => self.quantity_screen(&item, unit_price)?,
                FlowState::ReviewingCart { .. } => self.cart_screen(flow)?,
            };

            match step {
                Step::Send(intents) => self.dispatch(flow, sink, intents)?,
                Step::Redraw => {}
                Step::Quit => break,
            }
        }

        writeln!(self.output, "Goodbye!")?;
        self.output.flush()
    }

    // =========================================================================
    // Screens
    // =========================================================================

    fn customer_screen(&mut self) -> io::Result<Step> {
        let Some(name) = self.prompt("Customer name: ")? else {
            return Ok(Step::Quit);
        };
        let Some(phone) = self.prompt("Phone number (10 digits): ")? else {
            return Ok(Step::Quit);
        };
        Ok(Step::Send(vec![Intent::SubmitCustomer { name, phone }]))
    }

    fn category_screen(&mut self, flow: &CheckoutFlow) -> io::Result<Step> {
        let categories: Vec<String> = flow
            .catalog()
            .list_categories()
            .into_iter()
            .map(str::to_string)
            .collect();

        writeln!(self.output)?;
        writeln!(self.output, "Categories:")?;
        for (i, name) in categories.iter().enumerate() {
            writeln!(self.output, "  {}. {}", i + 1, name)?;
        }
        self.cart_summary(&flow.cart_snapshot())?;
        writeln!(self.output, "[number] open  c) view cart  g) generate receipt  q) quit")?;

        let Some(answer) = self.prompt("> ")? else {
            return Ok(Step::Quit);
        };
        match Choice::parse(&answer) {
            Choice::Number(n) => match n.checked_sub(1).and_then(|i| categories.get(i)) {
                Some(name) => Ok(Step::Send(vec![Intent::OpenCategory(name.clone())])),
                None => self.unknown_choice(),
            },
            Choice::Key('c') => Ok(Step::Send(vec![Intent::ReviewCart])),
            Choice::Key('g') => Ok(Step::Send(vec![self.generate()])),
            Choice::Key('q') => Ok(Step::Quit),
            _ => self.unknown_choice(),
        }
    }

    fn item_screen(&mut self, flow: &CheckoutFlow, category: &str) -> io::Result<Step> {
        let items = match flow.catalog().list_items(category) {
            Ok(items) => items.to_vec(),
            Err(e) => {
                self.show_error(e.into())?;
                return Ok(Step::Send(vec![Intent::Back]));
            }
        };

        writeln!(self.output)?;
        writeln!(self.output, "{}:", category)?;
        let width = items.iter().map(|i| i.name.chars().count()).max().unwrap_or(0);
        for (i, item) in items.iter().enumerate() {
            let pad = width - item.name.chars().count();
            let price = self.money(item.price);
            writeln!(
                self.output,
                "  {:>2}. {}{}  {}",
                i + 1,
                item.name,
                " ".repeat(pad),
                price
            )?;
        }
        self.cart_summary(&flow.cart_snapshot())?;
        writeln!(
            self.output,
            "[number] add  b) back  c) view cart  g) generate receipt  q) quit"
        )?;

        let Some(answer) = self.prompt("> ")? else {
            return Ok(Step::Quit);
        };
        match Choice::parse(&answer) {
            Choice::Number(n) => match n.checked_sub(1).and_then(|i| items.get(i)) {
                Some(item) => Ok(Step::Send(vec![Intent::SelectItem(item.name.clone())])),
                None => self.unknown_choice(),
            },
            Choice::Key('b') => Ok(Step::Send(vec![Intent::Back])),
            Choice::Key('c') => Ok(Step::Send(vec![Intent::ReviewCart])),
            Choice::Key('g') => Ok(Step::Send(vec![self.generate()])),
            Choice::Key('q') => Ok(Step::Quit),
            _ => self.unknown_choice(),
        }
    }

    fn quantity_screen(&mut self, item: &str, unit_price: Money) -> io::Result<Step> {
        let prompt = format!(
            "Quantity for {} at {} (Enter to cancel): ",
            item,
            self.money(unit_price)
        );
        match self.prompt(&prompt)? {
            None => Ok(Step::Quit),
            Some(text) if text.is_empty() => Ok(Step::Send(vec![Intent::CancelQuantity])),
            Some(text) => Ok(Step::Send(vec![Intent::SubmitQuantity(text)])),
        }
    }

    fn cart_screen(&mut self, flow: &CheckoutFlow) -> io::Result<Step> {
        let snapshot = flow.cart_snapshot();

        writeln!(self.output)?;
        if snapshot.is_empty() {
            writeln!(self.output, "Your cart is empty.")?;
        } else {
            let width = snapshot
                .lines
                .iter()
                .map(|l| l.name.chars().count())
                .max()
                .unwrap_or(0)
                .max(4);
            writeln!(
                self.output,
                "   #  {:<width$}  {:>5}  {:>12}  {:>12}",
                "Item",
                "Qty",
                "Rate",
                "Amount",
                width = width
            )?;
            for (i, line) in snapshot.lines.iter().enumerate() {
                let pad = width - line.name.chars().count();
                let (rate, amount) = (self.money(line.unit_price), self.money(line.line_total()));
                writeln!(
                    self.output,
                    "  {:>2}. {}{}  {:>5}  {:>12}  {:>12}",
                    i + 1,
                    line.name,
                    " ".repeat(pad),
                    line.quantity,
                    rate,
                    amount
                )?;
            }
            let total = self.money(snapshot.total);
            writeln!(self.output, "Total: {}", total)?;
        }
        writeln!(
            self.output,
            "[number] remove  b) back  g) generate receipt  q) quit"
        )?;

        let Some(answer) = self.prompt("> ")? else {
            return Ok(Step::Quit);
        };
        match Choice::parse(&answer) {
            Choice::Number(n) => match snapshot.line_at(n) {
                Some(line) => Ok(Step::Send(vec![
                    Intent::SelectLine(line.id),
                    Intent::RemoveSelected,
                ])),
                None => {
                    writeln!(self.output, "No line {} in the cart.", n)?;
                    Ok(Step::Redraw)
                }
            },
            Choice::Key('b') => Ok(Step::Send(vec![Intent::Back])),
            Choice::Key('g') => Ok(Step::Send(vec![self.generate()])),
            Choice::Key('q') => Ok(Step::Quit),
            _ => self.unknown_choice(),
        }
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Sends intents in order, stopping at the first rejection.
    fn dispatch<S: ReceiptSink>(
        &mut self,
        flow: &mut CheckoutFlow,
        sink: &mut S,
        intents: Vec<Intent>,
    ) -> io::Result<()> {
        for intent in intents {
            debug!(?intent, "Handling intent");
            match flow.handle(intent, sink) {
                Ok(outcome) => self.report(outcome)?,
                Err(e) => {
                    let err = CliError::from(e);
                    warn!(code = ?err.code, message = %err.message, "Intent rejected");
                    return self.show_error(err);
                }
            }
        }
        Ok(())
    }

    fn report(&mut self, outcome: Outcome) -> io::Result<()> {
        match outcome {
            Outcome::Moved => Ok(()),
            Outcome::ItemAdded {
                name,
                added,
                line_quantity,
            } => {
                info!(item = %name, added, line_quantity, "Item added to cart");
                writeln!(
                    self.output,
                    "Added {} × {} ({} in cart).",
                    added, name, line_quantity
                )
            }
            Outcome::LineRemoved { name } => {
                info!(item = %name, "Item removed from cart");
                writeln!(self.output, "Removed {} from the cart.", name)
            }
            Outcome::ReceiptGenerated {
                location,
                total,
                pages,
            } => {
                info!(%location, %total, pages, "Receipt generated");
                let total = self.money(total);
                writeln!(self.output)?;
                writeln!(self.output, "Receipt saved to {} (total {}).", location, total)?;
                writeln!(self.output, "{}", FAREWELL)
            }
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn generate(&self) -> Intent {
        Intent::Generate { at: (self.clock)() }
    }

    fn money(&self, amount: Money) -> String {
        amount.format_with(&self.currency_symbol, "")
    }

    fn cart_summary(&mut self, snapshot: &CartSnapshot) -> io::Result<()> {
        if snapshot.is_empty() {
            return writeln!(self.output, "Cart: empty");
        }
        let total = self.money(snapshot.total);
        writeln!(
            self.output,
            "Cart: {} item(s), total {}",
            snapshot.lines.len(),
            total
        )
    }

    fn show_error(&mut self, err: CliError) -> io::Result<()> {
        writeln!(self.output, "Error: {}", err)
    }

    fn unknown_choice(&mut self) -> io::Result<Step> {
        writeln!(self.output, "Please choose one of the listed options.")?;
        Ok(Step::Redraw)
    }

    /// Prints `text` and reads one trimmed line; `None` at end of input.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::receipt_writer::FileReceiptSink;
    use chrono::NaiveDate;
    use grocify_core::{Catalog, Receipt, ReceiptFormatter};
    use std::io::Cursor;

    fn fixed_clock() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(18, 30, 0)
            .unwrap()
    }

    fn new_flow() -> CheckoutFlow {
        CheckoutFlow::new(Catalog::default(), ReceiptFormatter::default())
    }

    /// Runs a scripted session and returns what was printed.
    fn session<S: ReceiptSink>(script: &str, flow: &mut CheckoutFlow, sink: &mut S) -> String {
        let mut console =
            Console::new(Cursor::new(script.to_string()), Vec::new(), "₹").with_clock(fixed_clock);
        console.run(flow, sink).unwrap();
        String::from_utf8(console.into_output()).unwrap()
    }

    #[test]
    fn test_full_checkout() {
        let mut flow = new_flow();
        let mut sink: Vec<Receipt> = Vec::new();
        let out = session(
            "Asha\n9876543210\n1\n1\n2\n5\n1\ng\nq\n",
            &mut flow,
            &mut sink,
        );

        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].total, Money::from_rupees(85));
        assert_eq!(sink[0].file_name, "receipt_20261019_183000.txt");
        assert!(out.contains("Added 2 × Milk (1L) (2 in cart)."));
        assert!(out.contains("Receipt saved to receipt_20261019_183000.txt (total ₹85.00)."));
        assert!(out.contains(FAREWELL));
        assert!(flow.cart_snapshot().is_empty());
    }

    #[test]
    fn test_invalid_phone_asks_again() {
        let mut flow = new_flow();
        let out = session(
            "Asha\n12345\nAsha\n9876543210\nq\n",
            &mut flow,
            &mut Vec::<Receipt>::new(),
        );

        assert!(out.contains("Error: Phone has invalid format: must be exactly 10 digits"));
        assert_eq!(out.matches("Customer name: ").count(), 2);
        assert_eq!(flow.customer().unwrap().phone(), "9876543210");
    }

    #[test]
    fn test_bad_quantity_then_dismiss() {
        let mut flow = new_flow();
        let out = session(
            "Asha\n9876543210\n1\n1\nabc\n\nq\n",
            &mut flow,
            &mut Vec::<Receipt>::new(),
        );

        assert!(out.contains("Error: Quantity has invalid format: must be a whole number"));
        assert_eq!(out.matches("Quantity for Milk (1L) at ₹30.00").count(), 2);
        assert!(flow.cart_snapshot().is_empty());
        assert_eq!(
            flow.state(),
            &FlowState::BrowsingCatalog {
                category: Some("Food Items".to_string())
            }
        );
    }

    #[test]
    fn test_remove_by_display_index() {
        let mut flow = new_flow();
        let out = session(
            "Asha\n9876543210\n1\n1\n2\n5\n1\nc\n1\n7\nq\n",
            &mut flow,
            &mut Vec::<Receipt>::new(),
        );

        assert!(out.contains("Removed Milk (1L) from the cart."));
        assert!(out.contains("No line 7 in the cart."));
        let snapshot = flow.cart_snapshot();
        assert_eq!(snapshot.lines.len(), 1);
        assert_eq!(snapshot.lines[0].name, "Bread (loaf)");
    }

    #[test]
    fn test_generate_with_empty_cart() {
        let mut flow = new_flow();
        let mut sink: Vec<Receipt> = Vec::new();
        let out = session("Asha\n9876543210\ng\nq\n", &mut flow, &mut sink);

        assert!(out.contains("Error: Cart is empty"));
        assert!(!out.contains(FAREWELL));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_unknown_menu_choice() {
        let mut flow = new_flow();
        let out = session(
            "Asha\n9876543210\n9\nx\nq\n",
            &mut flow,
            &mut Vec::<Receipt>::new(),
        );
        assert_eq!(out.matches("Please choose one of the listed options.").count(), 2);
    }

    #[test]
    fn test_end_of_input_ends_session() {
        let mut flow = new_flow();
        let out = session("Asha\n", &mut flow, &mut Vec::<Receipt>::new());
        assert!(out.ends_with("Goodbye!\n"));
        assert!(flow.customer().is_none());
    }

    #[test]
    fn test_receipt_written_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut flow = new_flow();
        let mut sink = FileReceiptSink::new(dir.path());

        let out = session(
            "Asha\n9876543210\n2\n1\n3\nc\ng\nq\n",
            &mut flow,
            &mut sink,
        );

        let path = dir.path().join("receipt_20261019_183000.txt");
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("Rice (1kg)"));
        assert!(contents.contains("Total Amount: ₹ 180.00"));
        assert!(out.contains(&path.display().to_string()));
    }
}
