//! # Receipt Formatter
//!
//! Renders a customer and a cart snapshot into a paginated text document.
//!
//! ## Page Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Grocify Grocery Store                               │
//! │                                                                         │
//! │  Date: 19-10-2026 14:03:05                                              │
//! │  Customer: Asha                                                         │
//! │  Phone: 9876543210                                                      │
//! │  ─────────────────────────────────────────────                          │
//! │  Item                  Qty        Rate        Total                     │
//! │  ─────────────────────────────────────────────                          │
//! │  Milk (1L)               2     ₹ 30.00      ₹ 60.00                     │
//! │  Bread (loaf)            1     ₹ 25.00      ₹ 25.00                     │
//! │  ─────────────────────────────────────────────                          │
//! │  Total Amount: ₹ 85.00                                                  │
//! │  Thank you for shopping with us!                                        │
//! │                                                      Page 1 of 1        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The document is UTF-8 text, so the rupee sign and any non-Latin item
//! names come through unchanged. All padding counts `char`s, never bytes.
//! When the item table outgrows a page it continues on the next one under a
//! repeated column header; pages are separated by a form feed.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::cart::CartSnapshot;
use crate::error::{CoreError, CoreResult};
use crate::money::{Money, RUPEE_SYMBOL};
use crate::types::{CartLine, Customer};

/// Smallest page that still fits the header, one item row, the closing
/// block and the footer.
pub const MIN_PAGE_LINES: usize = 20;

/// Page separator used by [`Receipt::to_text`].
pub const PAGE_BREAK: char = '\x0c';

const NAME_MIN_WIDTH: usize = 24;
const NAME_MAX_WIDTH: usize = 40;
const QTY_WIDTH: usize = 6;
const MONEY_WIDTH: usize = 14;

// =============================================================================
// Layout
// =============================================================================

/// Store-specific text and page geometry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptLayout {
    /// Printed centred at the top of every page.
    pub store_name: String,

    /// Prefix for every amount, e.g. `₹`.
    pub currency_symbol: String,

    /// Printed after the total.
    pub closing_message: String,

    /// Maximum lines per page, footer included.
    pub page_lines: usize,
}

impl Default for ReceiptLayout {
    fn default() -> Self {
        ReceiptLayout {
            store_name: "Grocify Grocery Store".to_string(),
            currency_symbol: RUPEE_SYMBOL.to_string(),
            closing_message: "Thank you for shopping with us!".to_string(),
            page_lines: 60,
        }
    }
}

// =============================================================================
// Receipt
// =============================================================================

/// A rendered receipt, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    /// `receipt_<YYYYMMDD>_<HHMMSS>.txt`
    pub file_name: String,

    /// When the receipt was generated (local wall-clock time).
    pub generated_at: NaiveDateTime,

    /// Grand total printed on the receipt.
    pub total: Money,

    /// Page contents, footer included.
    pub pages: Vec<Vec<String>>,
}

impl Receipt {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Joins the pages into a single document.
    ///
    /// Every line ends with `\n`; a form feed starts each page after the
    /// first.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (i, page) in self.pages.iter().enumerate() {
            if i > 0 {
                out.push(PAGE_BREAK);
            }
            for line in page {
                out.push_str(line);
                out.push('\n');
            }
        }
        out
    }
}

/// File name for a receipt generated at `timestamp`.
///
/// Second resolution: two receipts generated within the same second get
/// the same name, so whoever stores them must not overwrite.
pub fn receipt_file_name(timestamp: NaiveDateTime) -> String {
    format!("receipt_{}.txt", timestamp.format("%Y%m%d_%H%M%S"))
}

// =============================================================================
// Formatter
// =============================================================================

/// Renders receipts with a fixed layout.
#[derive(Debug, Clone, Default)]
pub struct ReceiptFormatter {
    layout: ReceiptLayout,
}

impl ReceiptFormatter {
    /// Creates a formatter. Page length is raised to [`MIN_PAGE_LINES`]
    /// if configured smaller.
    pub fn new(mut layout: ReceiptLayout) -> Self {
        layout.page_lines = layout.page_lines.max(MIN_PAGE_LINES);
        ReceiptFormatter { layout }
    }

    pub fn layout(&self) -> &ReceiptLayout {
        &self.layout
    }

    /// Renders the receipt for a non-empty cart snapshot.
    ///
    /// ## Errors
    /// - `EmptyCart` if the snapshot has no lines
    pub fn render(
        &self,
        customer: &Customer,
        snapshot: &CartSnapshot,
        timestamp: NaiveDateTime,
    ) -> CoreResult<Receipt> {
        if snapshot.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let money = |m: Money| m.format_with(&self.layout.currency_symbol, " ");
        let columns = Columns::for_lines(&snapshot.lines, &money);
        let rule = "-".repeat(columns.width());

        let first_header = vec![
            center(&self.layout.store_name, columns.width()),
            String::new(),
            format!("Date: {}", timestamp.format("%d-%m-%Y %H:%M:%S")),
            format!("Customer: {}", customer.name()),
            format!("Phone: {}", customer.phone()),
            rule.clone(),
            columns.header(),
            rule.clone(),
        ];
        let continued_header = vec![
            center(
                &format!("{} (continued)", self.layout.store_name),
                columns.width(),
            ),
            rule.clone(),
            columns.header(),
            rule.clone(),
        ];
        let closing = vec![
            rule.clone(),
            format!("Total Amount: {}", money(snapshot.total)),
            self.layout.closing_message.clone(),
        ];

        // One footer line is reserved on every page.
        let mut pager = Pager::new(self.layout.page_lines - 1, first_header, continued_header);
        for line in &snapshot.lines {
            pager.push_block(columns.rows(line, &money));
        }
        pager.push_block(closing);

        let mut pages = pager.finish();
        let page_count = pages.len();
        for (i, page) in pages.iter_mut().enumerate() {
            let footer = format!("Page {} of {}", i + 1, page_count);
            page.push(format!("{:>width$}", footer, width = columns.width()));
        }

        Ok(Receipt {
            file_name: receipt_file_name(timestamp),
            generated_at: timestamp,
            total: snapshot.total,
            pages,
        })
    }
}

// =============================================================================
// Table Columns
// =============================================================================

/// Column widths in characters. Names are capped and wrap; quantities and
/// amounts always get their full width.
struct Columns {
    name: usize,
    qty: usize,
    money: usize,
}

impl Columns {
    fn for_lines(lines: &[CartLine], money: &impl Fn(Money) -> String) -> Self {
        let longest = lines
            .iter()
            .map(|l| l.name.chars().count())
            .max()
            .unwrap_or(0);
        let qty = lines
            .iter()
            .map(|l| l.quantity.to_string().len())
            .fold(QTY_WIDTH, usize::max);
        let amount = lines
            .iter()
            .flat_map(|l| [money(l.unit_price), money(l.line_total())])
            .map(|text| text.chars().count())
            .fold(MONEY_WIDTH, usize::max);
        Columns {
            name: longest.clamp(NAME_MIN_WIDTH, NAME_MAX_WIDTH),
            qty,
            money: amount,
        }
    }

    fn width(&self) -> usize {
        self.name + 1 + self.qty + 1 + self.money + 1 + self.money
    }

    fn header(&self) -> String {
        format!(
            "{:<nw$} {:>qw$} {:>mw$} {:>mw$}",
            "Item",
            "Qty",
            "Rate",
            "Total",
            nw = self.name,
            qw = self.qty,
            mw = self.money
        )
    }

    /// Table rows for one cart line; long names wrap onto extra rows.
    fn rows(&self, line: &CartLine, money: &impl Fn(Money) -> String) -> Vec<String> {
        let mut name_parts = wrap(&line.name, self.name).into_iter();
        let first = name_parts.next().unwrap_or_default();

        let mut rows = vec![format!(
            "{:<nw$} {:>qw$} {:>mw$} {:>mw$}",
            first,
            line.quantity,
            money(line.unit_price),
            money(line.line_total()),
            nw = self.name,
            qw = self.qty,
            mw = self.money
        )];
        rows.extend(name_parts);
        rows
    }
}

/// Word-wraps `text` to `width` chars, hard-splitting words that are longer.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let current_len = current.chars().count();
        let needed = if current.is_empty() { word.len() } else { current_len + 1 + word.len() };
        if needed > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.extend(word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    format!("{}{}", " ".repeat((width - len) / 2), text)
}

// =============================================================================
// Pagination
// =============================================================================

/// Packs blocks of lines into pages of at most `capacity` lines.
///
/// A block is kept on one page when it fits on a fresh page; otherwise it
/// is split row by row.
struct Pager {
    capacity: usize,
    continued_header: Vec<String>,
    pages: Vec<Vec<String>>,
    current: Vec<String>,
}

impl Pager {
    fn new(capacity: usize, first_header: Vec<String>, continued_header: Vec<String>) -> Self {
        Pager {
            capacity,
            continued_header,
            pages: Vec::new(),
            current: first_header,
        }
    }

    fn remaining(&self) -> usize {
        self.capacity.saturating_sub(self.current.len())
    }

    fn break_page(&mut self) {
        let next = self.continued_header.clone();
        self.pages.push(std::mem::replace(&mut self.current, next));
    }

    fn push_block(&mut self, block: Vec<String>) {
        let fresh_capacity = self.capacity.saturating_sub(self.continued_header.len());
        if block.len() > self.remaining() && block.len() <= fresh_capacity {
            self.break_page();
        }
        for row in block {
            if self.remaining() == 0 {
                self.break_page();
            }
            self.current.push(row);
        }
    }

    fn finish(mut self) -> Vec<Vec<String>> {
        self.pages.push(self.current);
        self.pages
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::Cart;
    use chrono::NaiveDate;

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(14, 3, 5)
            .unwrap()
    }

    fn asha() -> Customer {
        Customer::new("Asha", "9876543210").unwrap()
    }

    fn milk_and_bread() -> CartSnapshot {
        let mut cart = Cart::new();
        cart.add_item("Milk (1L)", Money::from_rupees(30), 2).unwrap();
        cart.add_item("Bread (loaf)", Money::from_rupees(25), 1).unwrap();
        cart.snapshot()
    }

    #[test]
    fn test_file_name_from_timestamp() {
        assert_eq!(receipt_file_name(timestamp()), "receipt_20261019_140305.txt");
    }

    #[test]
    fn test_render_contents() {
        let receipt = ReceiptFormatter::default()
            .render(&asha(), &milk_and_bread(), timestamp())
            .unwrap();
        let text = receipt.to_text();

        assert_eq!(receipt.file_name, "receipt_20261019_140305.txt");
        assert_eq!(receipt.page_count(), 1);
        assert_eq!(receipt.total, Money::from_rupees(85));

        assert!(text.lines().next().unwrap().trim() == "Grocify Grocery Store");
        assert!(text.contains("Date: 19-10-2026 14:03:05"));
        assert!(text.contains("Customer: Asha"));
        assert!(text.contains("Phone: 9876543210"));
        assert!(text.contains("Total Amount: ₹ 85.00"));
        assert!(text.contains("Thank you for shopping with us!"));
        assert!(text.contains("Page 1 of 1"));
        assert!(!text.contains(PAGE_BREAK));

        let milk = text.lines().find(|l| l.starts_with("Milk (1L)")).unwrap();
        assert!(milk.contains(" 2 "));
        assert!(milk.contains("₹ 30.00"));
        assert!(milk.ends_with("₹ 60.00"));

        // Insertion order
        assert!(text.find("Milk (1L)").unwrap() < text.find("Bread (loaf)").unwrap());
    }

    #[test]
    fn test_columns_align_with_non_ascii() {
        let mut cart = Cart::new();
        cart.add_item("Milk (1L)", Money::from_rupees(30), 2).unwrap();
        cart.add_item("दूध (1L)", Money::from_rupees(32), 10).unwrap();
        let receipt = ReceiptFormatter::default()
            .render(&asha(), &cart.snapshot(), timestamp())
            .unwrap();

        let page = &receipt.pages[0];
        let header = page.iter().find(|l| l.starts_with("Item")).unwrap();
        let rows: Vec<&String> = page
            .iter()
            .filter(|l| l.starts_with("Milk") || l.starts_with("दूध"))
            .collect();
        assert_eq!(rows.len(), 2);
        for row in rows {
            assert_eq!(row.chars().count(), header.chars().count());
        }
    }

    #[test]
    fn test_wide_amounts_widen_columns() {
        let mut cart = Cart::new();
        cart.add_item("Gold Bar", Money::from_rupees(10_000_000_000_000), 9_000)
            .unwrap();
        cart.add_item("Milk (1L)", Money::from_rupees(30), 1_234_567_890)
            .unwrap();
        let formatter = ReceiptFormatter::new(ReceiptLayout {
            currency_symbol: "INR Rs.".to_string(),
            ..ReceiptLayout::default()
        });
        let receipt = formatter
            .render(&asha(), &cart.snapshot(), timestamp())
            .unwrap();

        let page = &receipt.pages[0];
        let header = page.iter().find(|l| l.starts_with("Item")).unwrap();
        let rule = page.iter().find(|l| l.starts_with("---")).unwrap();
        assert_eq!(rule.chars().count(), header.chars().count());

        let rows: Vec<&String> = page
            .iter()
            .filter(|l| l.starts_with("Gold") || l.starts_with("Milk"))
            .collect();
        assert_eq!(rows.len(), 2);
        for row in &rows {
            assert_eq!(row.chars().count(), header.chars().count());
        }
        assert!(rows[0].ends_with("INR Rs. 90000000000000000.00"));
        assert!(rows[1].contains(" 1234567890 "));
    }

    #[test]
    fn test_empty_cart_is_rejected() {
        let err = ReceiptFormatter::default()
            .render(&asha(), &Cart::new().snapshot(), timestamp())
            .unwrap_err();
        assert!(matches!(err, CoreError::EmptyCart));
    }

    #[test]
    fn test_custom_layout() {
        let formatter = ReceiptFormatter::new(ReceiptLayout {
            store_name: "Corner Kirana".to_string(),
            currency_symbol: "Rs.".to_string(),
            closing_message: "Visit again".to_string(),
            page_lines: 5,
        });
        assert_eq!(formatter.layout().page_lines, MIN_PAGE_LINES);

        let text = formatter
            .render(&asha(), &milk_and_bread(), timestamp())
            .unwrap()
            .to_text();
        assert!(text.contains("Corner Kirana"));
        assert!(text.contains("Total Amount: Rs. 85.00"));
        assert!(text.contains("Visit again"));
    }

    #[test]
    fn test_long_cart_paginates() {
        let mut cart = Cart::new();
        for i in 0..50 {
            cart.add_item(&format!("Item number {:02}", i), Money::from_rupees(10), 1)
                .unwrap();
        }
        let layout = ReceiptLayout {
            page_lines: 20,
            ..ReceiptLayout::default()
        };
        let receipt = ReceiptFormatter::new(layout)
            .render(&asha(), &cart.snapshot(), timestamp())
            .unwrap();

        assert!(receipt.page_count() > 1);
        for page in &receipt.pages {
            assert!(page.len() <= 20);
        }
        for (i, page) in receipt.pages.iter().enumerate().skip(1) {
            assert!(page[0].contains("(continued)"));
            assert!(page
                .last()
                .unwrap()
                .ends_with(&format!("Page {} of {}", i + 1, receipt.page_count())));
        }

        let text = receipt.to_text();
        assert_eq!(text.matches(PAGE_BREAK).count(), receipt.page_count() - 1);
        for i in 0..50 {
            assert_eq!(text.matches(&format!("Item number {:02} ", i)).count(), 1);
        }
        assert_eq!(text.matches("Total Amount: ₹ 500.00").count(), 1);
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("Milk (1L)", 24), vec!["Milk (1L)"]);
        assert_eq!(
            wrap("Extra Virgin Olive Oil Cold Pressed (500ml)", 20),
            vec!["Extra Virgin Olive", "Oil Cold Pressed", "(500ml)"]
        );
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap("", 4), vec![""]);
    }

    #[test]
    fn test_long_names_wrap_in_table() {
        let mut cart = Cart::new();
        let long = "Premium Basmati Rice Extra Long Grain Aged Two Years (5kg)";
        cart.add_item(long, Money::from_rupees(899), 1).unwrap();
        let receipt = ReceiptFormatter::default()
            .render(&asha(), &cart.snapshot(), timestamp())
            .unwrap();
        let text = receipt.to_text();

        assert!(text.contains("₹ 899.00"));
        assert!(text.contains("(5kg)"));
        for line in text.lines() {
            assert!(line.chars().count() <= NAME_MAX_WIDTH + 3 + QTY_WIDTH + 2 * MONEY_WIDTH);
        }
    }
}
