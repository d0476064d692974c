//! Billing session - everything the billing screen holds for the bill being built.
//!
//! A session is created empty when the billing screen opens and dropped on logout. It owns
//! the ledger, the table number and captain name fields, the category and search term that
//! filter the menu, and a receipt waiting for print confirmation.

use crate::{
    core::{
        catalog::{Catalog, CatalogItem, ItemId},
        ledger::{Adjustment, BillLine, Ledger},
        money::Money,
        receipt::Receipt,
    },
    errors::{Error, Result},
};
use chrono::Local;
use std::sync::Arc;
use tracing::{debug, info};

/// State of one billing screen.
#[derive(Debug, Clone)]
pub struct BillingSession {
    catalog: Arc<Catalog>,
    selected_category: String,
    search_term: String,
    ledger: Ledger,
    table_number: String,
    captain_name: String,
    pending_print: Option<Receipt>,
}

impl BillingSession {
    /// Opens an empty bill with the catalog's first category selected.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let selected_category = catalog.default_category().unwrap_or_default().to_string();
        Self {
            catalog,
            selected_category,
            search_term: String::new(),
            ledger: Ledger::new(),
            table_number: String::new(),
            captain_name: String::new(),
            pending_print: None,
        }
    }

    /// The menu this bill is built from.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Category whose items are shown.
    #[must_use]
    pub fn selected_category(&self) -> &str {
        &self.selected_category
    }

    /// Switches the menu to `category`. Names are matched case-insensitively; an unknown
    /// name is kept as typed and simply shows no items.
    pub fn select_category(&mut self, category: &str) {
        self.selected_category = self
            .catalog
            .resolve_category(category)
            .unwrap_or(category)
            .to_string();
        debug!("Selected category '{}'", self.selected_category);
    }

    /// Current menu filter.
    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Replaces the menu filter; an empty term shows the whole category.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Menu entries of the selected category matching the search term.
    #[must_use]
    pub fn visible_items(&self) -> Vec<&CatalogItem> {
        self.catalog
            .search(&self.selected_category, &self.search_term)
    }

    /// Adds one unit of `item` to the bill and returns its new quantity.
    pub fn add_item(&mut self, item: &CatalogItem) -> u32 {
        self.discard_pending_print();
        self.ledger.add_item(item)
    }

    /// Adds the catalog entry whose code or id matches `query`.
    ///
    /// # Errors
    /// Returns [`Error::ItemNotFound`] if nothing in the catalog matches.
    pub fn add_by_query(&mut self, query: &str) -> Result<(CatalogItem, u32)> {
        let item = self.lookup(query)?.clone();
        let quantity = self.add_item(&item);
        Ok((item, quantity))
    }

    /// Changes the quantity of `item_id` by `delta`; see [`Ledger::adjust_quantity`].
    pub fn adjust_quantity(&mut self, item_id: ItemId, delta: i64) -> Adjustment {
        let outcome = self.ledger.adjust_quantity(item_id, delta);
        if outcome != Adjustment::Absent {
            self.discard_pending_print();
        }
        outcome
    }

    /// The bill lines and totals.
    #[must_use]
    pub const fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Bill lines in the order they were added.
    #[must_use]
    pub fn lines(&self) -> &[BillLine] {
        self.ledger.lines()
    }

    /// Bill total.
    #[must_use]
    pub fn total(&self) -> Money {
        self.ledger.total()
    }

    /// Free-text table number.
    #[must_use]
    pub fn table_number(&self) -> &str {
        &self.table_number
    }

    /// Sets the table number. Discards a pending print.
    pub fn set_table_number(&mut self, table_number: impl Into<String>) {
        self.table_number = table_number.into();
        self.discard_pending_print();
    }

    /// Free-text captain name.
    #[must_use]
    pub fn captain_name(&self) -> &str {
        &self.captain_name
    }

    /// Sets the captain name. Discards a pending print.
    pub fn set_captain_name(&mut self, captain_name: impl Into<String>) {
        self.captain_name = captain_name.into();
        self.discard_pending_print();
    }

    /// Snapshots the bill and holds it until [`BillingSession::confirm_print`] or
    /// [`BillingSession::cancel_print`].
    ///
    /// # Errors
    /// Returns [`Error::EmptyBill`] when there is nothing to print.
    pub fn request_print(&mut self) -> Result<&Receipt> {
        if self.ledger.is_empty() {
            return Err(Error::EmptyBill);
        }

        let receipt = Receipt::snapshot(
            &self.ledger,
            &self.table_number,
            &self.captain_name,
            Local::now(),
        );
        Ok(&*self.pending_print.insert(receipt))
    }

    /// Receipt waiting for confirmation, if printing was requested.
    #[must_use]
    pub const fn pending_print(&self) -> Option<&Receipt> {
        self.pending_print.as_ref()
    }

    /// Prints the pending receipt and starts a fresh bill.
    ///
    /// # Errors
    /// Returns [`Error::NoPendingPrint`] if printing was not requested first.
    pub fn confirm_print(&mut self) -> Result<Receipt> {
        let receipt = self.pending_print.take().ok_or(Error::NoPendingPrint)?;
        info!(
            "Printed bill for table '{}': {} items, total {}",
            receipt.table_number, receipt.item_count, receipt.total
        );
        self.clear();
        Ok(receipt)
    }

    /// Drops the pending receipt and keeps the bill as it is.
    ///
    /// # Errors
    /// Returns [`Error::NoPendingPrint`] if printing was not requested first.
    pub fn cancel_print(&mut self) -> Result<()> {
        self.pending_print
            .take()
            .map(|_| ())
            .ok_or(Error::NoPendingPrint)
    }

    /// Empties the bill and resets the table number and captain name.
    pub fn clear(&mut self) {
        self.ledger.clear();
        self.table_number.clear();
        self.captain_name.clear();
        self.pending_print = None;
    }

    fn lookup(&self, query: &str) -> Result<&CatalogItem> {
        let query = query.trim();
        self.catalog
            .find_by_code(query)
            .or_else(|| {
                query
                    .parse::<ItemId>()
                    .ok()
                    .and_then(|id| self.catalog.find_by_id(id))
            })
            .ok_or_else(|| Error::ItemNotFound {
                query: query.to_string(),
            })
    }

    fn discard_pending_print(&mut self) {
        if self.pending_print.take().is_some() {
            debug!("Bill changed; pending print discarded");
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_new_session_defaults() {
        let session = test_session();
        assert_eq!(session.selected_category(), "Main Courses");
        assert!(session.ledger().is_empty());
        assert_eq!(session.visible_items().len(), 3);
        assert_eq!(session.total(), Money::ZERO);
    }

    #[test]
    fn test_category_and_search_filter_visible_items() {
        let mut session = test_session();
        session.select_category("starters");
        assert_eq!(session.selected_category(), "Starters");

        session.set_search_term("ST00");
        assert_eq!(session.visible_items().len(), 3);
        session.set_search_term("balls");
        let visible = session.visible_items();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].code, "ST002");

        session.select_category("Brunch");
        assert!(session.visible_items().is_empty());
    }

    #[test]
    fn test_add_by_code_or_id() {
        let mut session = test_session();
        let (item, quantity) = session.add_by_query("mc001").unwrap();
        assert_eq!(item.name, "Butter Chicken");
        assert_eq!(quantity, 1);

        let (_, quantity) = session.add_by_query("1").unwrap();
        assert_eq!(quantity, 2);
        assert_eq!(session.total(), Money::from_minor(50_000));

        assert!(matches!(
            session.add_by_query("XYZ999"),
            Err(Error::ItemNotFound { .. })
        ));
    }

    #[test]
    fn test_clear_resets_ledger_and_fields() {
        let mut session = test_session();
        session.add_by_query("MC002").unwrap();
        session.set_table_number("7");
        session.set_captain_name("Ravi");

        session.clear();
        assert!(session.lines().is_empty());
        assert_eq!(session.table_number(), "");
        assert_eq!(session.captain_name(), "");
    }

    #[test]
    fn test_print_empty_bill_fails() {
        let mut session = test_session();
        assert!(matches!(session.request_print(), Err(Error::EmptyBill)));
        assert!(matches!(session.confirm_print(), Err(Error::NoPendingPrint)));
    }

    #[test]
    fn test_confirm_print_returns_receipt_and_clears() {
        let mut session = test_session();
        session.add_by_query("MC001").unwrap();
        session.add_by_query("BEV001").unwrap();
        session.set_table_number("12");
        session.set_captain_name("Asha");

        let total = session.request_print().unwrap().total;
        assert_eq!(total, Money::from_minor(29_000));

        let receipt = session.confirm_print().unwrap();
        assert_eq!(receipt.table_number, "12");
        assert_eq!(receipt.captain_name, "Asha");
        assert_eq!(receipt.lines.len(), 2);

        assert!(session.ledger().is_empty());
        assert_eq!(session.table_number(), "");
        assert!(session.pending_print().is_none());
    }

    #[test]
    fn test_cancel_print_keeps_bill() {
        let mut session = test_session();
        session.add_by_query("MC003").unwrap();
        session.request_print().unwrap();

        session.cancel_print().unwrap();
        assert!(session.pending_print().is_none());
        assert_eq!(session.lines().len(), 1);
        assert!(matches!(session.cancel_print(), Err(Error::NoPendingPrint)));
    }

    #[test]
    fn test_editing_bill_discards_pending_print() {
        let mut session = test_session();
        session.add_by_query("MC003").unwrap();
        session.request_print().unwrap();

        session.add_by_query("MC003").unwrap();
        assert!(session.pending_print().is_none());
        assert!(matches!(session.confirm_print(), Err(Error::NoPendingPrint)));
        assert_eq!(session.lines()[0].quantity(), 2);
    }
}
