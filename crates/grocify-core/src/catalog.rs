//! # Catalog
//!
//! The fixed price list, grouped by category.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Startup                                                                │
//! │    built-in table ──┐                                                   │
//! │                     ├──► CatalogTable ──► Catalog::from_table()        │
//! │    catalog.toml ────┘                        │ (validated once)         │
//! │                                              ▼                          │
//! │  Session                              Catalog (read-only)               │
//! │    list_categories() / list_items() / find_item()                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Item names are unique across the whole catalog because the cart is keyed
//! by item name.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::CatalogItem;
use crate::validation::{validate_catalog_name, validate_price, ValidationResult};

/// Built-in price list, in whole rupees.
const DEFAULT_TABLE: &[(&str, &[(&str, i64)])] = &[
    (
        "Food Items",
        &[
            ("Milk (1L)", 30),
            ("Eggs (6 pcs)", 40),
            ("Butter (100g)", 55),
            ("Cheese (200g)", 90),
            ("Bread (loaf)", 25),
            ("Biscuits (pack)", 20),
            ("Maggi Noodles", 15),
            ("Tea (250g)", 75),
            ("Coffee (100g)", 110),
            ("Juice (1L)", 50),
        ],
    ),
    (
        "Groceries",
        &[
            ("Rice (1kg)", 60),
            ("Wheat Flour (1kg)", 45),
            ("Sugar (1kg)", 42),
            ("Salt (1kg)", 20),
            ("Cooking Oil (1L)", 140),
        ],
    ),
    (
        "Other House Requirements",
        &[
            ("Toothpaste", 50),
            ("Shampoo (100ml)", 70),
            ("Soap (bar)", 35),
            ("Detergent (500g)", 65),
            ("Handwash", 60),
        ],
    ),
];

// =============================================================================
// Configuration Table
// =============================================================================

/// Catalog as written in a configuration file.
///
/// ```toml
/// [[categories]]
/// name = "Groceries"
/// items = [
///     { name = "Rice (1kg)", price = "60.00" },
///     { name = "Salt (1kg)", price = 20 },
/// ]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogTable {
    pub categories: Vec<CategoryTable>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTable {
    pub name: String,
    pub items: Vec<ItemTable>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemTable {
    pub name: String,
    pub price: PriceValue,
}

/// A price as it may appear in a config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceValue {
    /// Whole rupees: `price = 60`
    Rupees(i64),
    /// Decimal string: `price = "42.50"`
    Decimal(String),
}

impl PriceValue {
    fn to_money(&self) -> ValidationResult<Money> {
        match self {
            PriceValue::Rupees(rupees) => rupees
                .checked_mul(100)
                .map(Money::from_paise)
                .ok_or_else(|| ValidationError::InvalidFormat {
                    field: "price".to_string(),
                    reason: "amount is too large".to_string(),
                }),
            PriceValue::Decimal(text) => text.parse(),
        }
    }
}

impl Default for CatalogTable {
    fn default() -> Self {
        CatalogTable {
            categories: DEFAULT_TABLE
                .iter()
                .map(|(category, items)| CategoryTable {
                    name: category.to_string(),
                    items: items
                        .iter()
                        .map(|(name, rupees)| ItemTable {
                            name: name.to_string(),
                            price: PriceValue::Rupees(*rupees),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// A category and its items, in table order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub name: String,
    pub items: Vec<CatalogItem>,
}

/// The validated, read-only catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    /// Validates a table and builds the catalog.
    ///
    /// ## Rules
    /// - Category and item names must not be blank
    /// - Category names are unique
    /// - Item names are unique across all categories
    /// - Prices parse and are non-negative
    pub fn from_table(table: &CatalogTable) -> ValidationResult<Self> {
        let mut seen_categories = HashSet::new();
        let mut seen_items = HashSet::new();
        let mut categories = Vec::with_capacity(table.categories.len());

        for category in &table.categories {
            validate_catalog_name("category", &category.name)?;
            if !seen_categories.insert(category.name.as_str()) {
                return Err(ValidationError::Duplicate {
                    field: "category".to_string(),
                    value: category.name.clone(),
                });
            }

            let mut items = Vec::with_capacity(category.items.len());
            for item in &category.items {
                validate_catalog_name("item", &item.name)?;
                if !seen_items.insert(item.name.as_str()) {
                    return Err(ValidationError::Duplicate {
                        field: "item".to_string(),
                        value: item.name.clone(),
                    });
                }

                let price = item.price.to_money()?;
                validate_price(price)?;

                items.push(CatalogItem {
                    category: category.name.clone(),
                    name: item.name.clone(),
                    price,
                });
            }

            categories.push(Category {
                name: category.name.clone(),
                items,
            });
        }

        Ok(Catalog { categories })
    }

    /// Category names in table order.
    pub fn list_categories(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    /// Items of a category in table order.
    pub fn list_items(&self, category: &str) -> CoreResult<&[CatalogItem]> {
        self.categories
            .iter()
            .find(|c| c.name == category)
            .map(|c| c.items.as_slice())
            .ok_or_else(|| CoreError::CategoryNotFound(category.to_string()))
    }

    /// Looks up an item by name in any category.
    pub fn find_item(&self, name: &str) -> CoreResult<&CatalogItem> {
        self.categories
            .iter()
            .flat_map(|c| c.items.iter())
            .find(|i| i.name == name)
            .ok_or_else(|| CoreError::ItemNotFound(name.to_string()))
    }

    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }
}

impl Default for Catalog {
    /// The built-in Grocify price list.
    fn default() -> Self {
        Catalog {
            categories: DEFAULT_TABLE
                .iter()
                .map(|(category, items)| Category {
                    name: category.to_string(),
                    items: items
                        .iter()
                        .map(|(name, rupees)| CatalogItem {
                            category: category.to_string(),
                            name: name.to_string(),
                            price: Money::from_rupees(*rupees),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, &[(&str, &str)])]) -> CatalogTable {
        CatalogTable {
            categories: entries
                .iter()
                .map(|(name, items)| CategoryTable {
                    name: name.to_string(),
                    items: items
                        .iter()
                        .map(|(item, price)| ItemTable {
                            name: item.to_string(),
                            price: PriceValue::Decimal(price.to_string()),
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_default_catalog() {
        let catalog = Catalog::default();
        assert_eq!(
            catalog.list_categories(),
            vec!["Food Items", "Groceries", "Other House Requirements"]
        );
        assert_eq!(catalog.item_count(), 20);

        let milk = catalog.find_item("Milk (1L)").unwrap();
        assert_eq!(milk.price, Money::from_rupees(30));
        assert_eq!(milk.category, "Food Items");
    }

    #[test]
    fn test_default_table_passes_validation() {
        let validated = Catalog::from_table(&CatalogTable::default()).unwrap();
        assert_eq!(validated, Catalog::default());
    }

    #[test]
    fn test_list_items_keeps_table_order() {
        let catalog = Catalog::default();
        let names: Vec<&str> = catalog
            .list_items("Groceries")
            .unwrap()
            .iter()
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "Rice (1kg)",
                "Wheat Flour (1kg)",
                "Sugar (1kg)",
                "Salt (1kg)",
                "Cooking Oil (1L)"
            ]
        );
    }

    #[test]
    fn test_unknown_category_and_item() {
        let catalog = Catalog::default();
        assert!(matches!(
            catalog.list_items("Electronics"),
            Err(CoreError::CategoryNotFound(name)) if name == "Electronics"
        ));
        assert!(matches!(
            catalog.find_item("Caviar"),
            Err(CoreError::ItemNotFound(_))
        ));
    }

    #[test]
    fn test_from_table_rejects_duplicate_items() {
        let t = table(&[
            ("Dairy", &[("Milk (1L)", "30")]),
            ("Breakfast", &[("Milk (1L)", "31")]),
        ]);
        assert_eq!(
            Catalog::from_table(&t).unwrap_err(),
            ValidationError::Duplicate {
                field: "item".to_string(),
                value: "Milk (1L)".to_string()
            }
        );
    }

    #[test]
    fn test_from_table_rejects_duplicate_categories() {
        let t = table(&[("Dairy", &[("Milk", "30")]), ("Dairy", &[("Curd", "20")])]);
        assert!(matches!(
            Catalog::from_table(&t),
            Err(ValidationError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_from_table_rejects_bad_prices_and_names() {
        assert!(Catalog::from_table(&table(&[("Dairy", &[("Milk", "-1")])])).is_err());
        assert!(Catalog::from_table(&table(&[("Dairy", &[("Milk", "thirty")])])).is_err());
        assert!(Catalog::from_table(&table(&[("Dairy", &[(" ", "30")])])).is_err());
        assert!(Catalog::from_table(&table(&[("", &[("Milk", "30")])])).is_err());
    }

    #[test]
    fn test_table_from_toml() {
        let text = r#"
            [[categories]]
            name = "Mithai"
            items = [
                { name = "Kaju Katli (250g)", price = "249.50" },
                { name = "Rasgulla (tin)", price = 180 },
            ]
        "#;
        let table: CatalogTable = toml::from_str(text).unwrap();
        let catalog = Catalog::from_table(&table).unwrap();

        let items = catalog.list_items("Mithai").unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].price.paise(), 24950);
        assert_eq!(items[1].price, Money::from_rupees(180));
    }
}
