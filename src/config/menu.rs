//! Menu configuration loading from config.toml
//!
//! The `[[categories]]` tables of the configuration file describe the menu. When none are
//! present the built-in restaurant menu is used instead.

use crate::core::{
    catalog::{Catalog, CatalogItem, Category, ItemId},
    money::Money,
};
use crate::errors::Result;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

/// One `[[categories]]` table
#[derive(Debug, Deserialize, Clone)]
pub struct CategoryConfig {
    /// Name shown in the category list
    pub name: String,
    /// Entries of this category
    #[serde(default)]
    pub items: Vec<ItemConfig>,
}

/// One `[[categories.items]]` table
#[derive(Debug, Deserialize, Clone)]
pub struct ItemConfig {
    /// Identifier, unique across the menu
    pub id: ItemId,
    /// Name of the dish or product
    pub name: String,
    /// Unit price; a TOML number or a decimal string such as "12.50"
    pub price: Decimal,
    /// SKU code (e.g. "MC001")
    pub code: String,
}

impl From<ItemConfig> for CatalogItem {
    fn from(config: ItemConfig) -> Self {
        Self::new(config.id, config.name, Money::from(config.price), config.code)
    }
}

/// Builds the catalog from configured categories, or the built-in menu if there are none.
///
/// # Errors
/// Returns an error if the configured menu is inconsistent (negative price, id or code
/// shared by different items, category declared twice).
pub fn build_catalog(categories: Vec<CategoryConfig>) -> Result<Catalog> {
    if categories.is_empty() {
        info!("No menu configured; using the built-in restaurant menu");
        return Ok(Catalog::builtin());
    }

    let categories = categories
        .into_iter()
        .map(|category| {
            let items = category.items.into_iter().map(CatalogItem::from).collect();
            Category::new(category.name, items)
        })
        .collect();
    let catalog = Catalog::from_categories(categories)?;
    info!(
        "Loaded menu with {} categories from configuration",
        catalog.category_names().count()
    );
    Ok(catalog)
}
