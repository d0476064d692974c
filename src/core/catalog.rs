//! Menu catalog - static, read-only menu entries grouped by category.
//!
//! The catalog is built once at startup, either from the built-in restaurant menu or from
//! the `[[categories]]` tables of the configuration file, and never mutated afterwards.
//! Lookups are total: an unknown category or a search without matches yields an empty
//! result, never an error.

use crate::{
    core::money::Money,
    errors::{Error, Result},
};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Identifier of a menu entry. Bill lines are keyed by it.
pub type ItemId = u32;

/// A single menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CatalogItem {
    /// Identifier, unique across the whole catalog
    pub id: ItemId,
    /// Display name (e.g. "Butter Chicken")
    pub name: String,
    /// Unit price, never negative
    pub price: Money,
    /// Category-scoped SKU (e.g. "MC001")
    pub code: String,
}

impl CatalogItem {
    /// Creates a catalog entry.
    pub fn new(id: ItemId, name: impl Into<String>, price: Money, code: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            code: code.into(),
        }
    }

    /// Case-insensitive substring match against the name or the code.
    /// `needle` must already be lowercase.
    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.code.to_lowercase().contains(needle)
    }
}

/// A named group of menu entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Category name shown in the sidebar
    pub name: String,
    /// Entries in display order
    pub items: Vec<CatalogItem>,
}

impl Category {
    /// Creates a category from its entries.
    pub fn new(name: impl Into<String>, items: Vec<CatalogItem>) -> Self {
        Self {
            name: name.into(),
            items,
        }
    }
}

/// The full menu, categories in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    /// Builds a catalog after validating the entries.
    ///
    /// Exact duplicate entries inside a category are dropped with a warning. Two different
    /// entries sharing an id or a code (ignoring case), two categories sharing a name, or a
    /// negative price are errors.
    ///
    /// # Errors
    /// Returns [`Error::Config`] describing the first inconsistency found.
    pub fn from_categories(categories: Vec<Category>) -> Result<Self> {
        let mut category_names = HashSet::new();
        let mut seen_ids: Vec<&CatalogItem> = Vec::new();
        let mut cleaned = Vec::with_capacity(categories.len());

        for category in &categories {
            if !category_names.insert(category.name.to_lowercase()) {
                return Err(Error::Config {
                    message: format!("Category '{}' is declared more than once", category.name),
                });
            }

            let mut items: Vec<CatalogItem> = Vec::with_capacity(category.items.len());
            for item in &category.items {
                if item.price.is_negative() {
                    return Err(Error::Config {
                        message: format!(
                            "Item '{}' ({}) has a negative price {}",
                            item.name, item.code, item.price.0
                        ),
                    });
                }

                if let Some(existing) = seen_ids.iter().find(|seen| seen.id == item.id) {
                    if *existing == item && items.contains(item) {
                        warn!(
                            "Dropping duplicate menu entry {} '{}' in category '{}'",
                            item.code, item.name, category.name
                        );
                        continue;
                    }
                    return Err(Error::Config {
                        message: format!(
                            "Item id {} is used by both '{}' and '{}'",
                            item.id, existing.name, item.name
                        ),
                    });
                }

                if let Some(existing) = seen_ids
                    .iter()
                    .find(|seen| seen.code.eq_ignore_ascii_case(&item.code))
                {
                    return Err(Error::Config {
                        message: format!(
                            "Code {} is used by both '{}' and '{}'",
                            item.code, existing.name, item.name
                        ),
                    });
                }

                seen_ids.push(item);
                items.push(item.clone());
            }

            cleaned.push(Category::new(category.name.clone(), items));
        }

        debug!("Catalog built with {} categories", cleaned.len());
        Ok(Self {
            categories: cleaned,
        })
    }

    /// The built-in restaurant menu.
    #[must_use]
    pub fn builtin() -> Self {
        let categories = BUILTIN_MENU
            .iter()
            .map(|(name, items)| {
                let items = items
                    .iter()
                    .map(|&(id, item_name, minor, code)| {
                        CatalogItem::new(id, item_name, Money::from_minor(minor), code)
                    })
                    .collect();
                Category::new(*name, items)
            })
            .collect();
        Self { categories }
    }

    /// Category names in declaration order.
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|category| category.name.as_str())
    }

    /// The category selected when a billing screen opens.
    #[must_use]
    pub fn default_category(&self) -> Option<&str> {
        self.categories.first().map(|category| category.name.as_str())
    }

    /// Resolves a category name case-insensitively to its declared spelling.
    #[must_use]
    pub fn resolve_category(&self, name: &str) -> Option<&str> {
        let wanted = name.trim().to_lowercase();
        self.category_names()
            .find(|candidate| candidate.to_lowercase() == wanted)
    }

    /// Items of `category`, or an empty slice when the category is unknown.
    #[must_use]
    pub fn items(&self, category: &str) -> &[CatalogItem] {
        self.categories
            .iter()
            .find(|candidate| candidate.name == category)
            .map(|found| found.items.as_slice())
            .unwrap_or_default()
    }

    /// Items of `category` whose name or code contains `term`, ignoring case.
    /// An empty term matches everything. The term is matched as given, spaces included.
    #[must_use]
    pub fn search(&self, category: &str, term: &str) -> Vec<&CatalogItem> {
        let needle = term.to_lowercase();
        self.items(category)
            .iter()
            .filter(|item| item.matches(&needle))
            .collect()
    }

    /// Finds an entry anywhere in the catalog by its code, ignoring case.
    #[must_use]
    pub fn find_by_code(&self, code: &str) -> Option<&CatalogItem> {
        self.all_items()
            .find(|item| item.code.eq_ignore_ascii_case(code.trim()))
    }

    /// Finds an entry anywhere in the catalog by id.
    #[must_use]
    pub fn find_by_id(&self, id: ItemId) -> Option<&CatalogItem> {
        self.all_items().find(|item| item.id == id)
    }

    fn all_items(&self) -> impl Iterator<Item = &CatalogItem> {
        self.categories
            .iter()
            .flat_map(|category| category.items.iter())
    }
}

type MenuRow = (ItemId, &'static str, i64, &'static str);

const BUILTIN_MENU: &[(&str, &[MenuRow])] = &[
    (
        "Main Courses",
        &[
            (1, "Butter Chicken", 25_000, "MC001"),
            (2, "Paneer Tikka Masala", 22_000, "MC002"),
            (3, "Dal Makhani", 18_000, "MC003"),
        ],
    ),
    (
        "Starters",
        &[
            (4, "Crispy Vegetables", 18_000, "ST001"),
            (5, "Cheese Balls", 16_000, "ST002"),
            (6, "Chicken Tikka", 20_000, "ST003"),
        ],
    ),
    (
        "Beverages",
        &[
            (7, "Coca-Cola", 4_000, "BEV001"),
            (8, "Pepsi", 4_000, "BEV002"),
            (9, "Lemonade", 6_000, "BEV003"),
        ],
    ),
    (
        "Desserts",
        &[
            (10, "Gulab Jamun", 8_000, "DES001"),
            (11, "Rasgulla", 6_000, "DES002"),
            (12, "Ice Cream", 10_000, "DES003"),
        ],
    ),
    (
        "Soups",
        &[
            (13, "Tomato Soup", 9_000, "SOU001"),
            (14, "Sweet Corn Soup", 10_000, "SOU002"),
            (15, "Chicken Soup", 12_000, "SOU003"),
        ],
    ),
    (
        "Salads",
        &[
            (16, "Caesar Salad", 15_000, "SAL001"),
            (17, "Greek Salad", 14_000, "SAL002"),
            (18, "Caprese Salad", 16_000, "SAL003"),
        ],
    ),
    (
        "Appetizers",
        &[
            (19, "Nachos", 12_000, "APP001"),
            (20, "Spring Rolls", 10_000, "APP002"),
            (21, "Chicken Crispy Wings", 18_000, "APP003"),
        ],
    ),
    (
        "Grilled Items",
        &[
            (22, "Grilled Chicken", 20_000, "GRI001"),
            (23, "Grilled Fish", 22_000, "GRI002"),
            (24, "Grilled Paneer", 18_000, "GRI003"),
        ],
    ),
    (
        "Sandwiches",
        &[
            (25, "Veg Sandwich", 10_000, "SAN001"),
            (26, "Chicken Sandwich", 12_000, "SAN002"),
            (27, "Club Sandwich", 14_000, "SAN003"),
        ],
    ),
    ("Breakfast Items", &[]),
    ("Seafood", &[]),
    ("Pasta & Noodles", &[]),
];
