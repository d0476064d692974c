//! Bill ledger - the in-memory list of selected menu entries and their quantities.
//!
//! The ledger holds at most one line per item id and never keeps a line whose quantity
//! dropped to zero. Every operation is total: adjusting an item that is not on the bill is
//! a no-op, and the total of an empty bill is zero.

use crate::core::{
    catalog::{CatalogItem, ItemId},
    money::Money,
};
use tracing::trace;

/// One bill entry: a menu item and how many of it were ordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillLine {
    item: CatalogItem,
    quantity: u32,
}

impl BillLine {
    /// The ordered menu item.
    #[must_use]
    pub const fn item(&self) -> &CatalogItem {
        &self.item
    }

    /// Ordered quantity, always at least 1.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.item.price * self.quantity
    }
}

/// Outcome of [`Ledger::adjust_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    /// The line now has this quantity
    Updated(u32),
    /// The quantity reached zero and the line was removed
    Removed,
    /// No line with that item id exists
    Absent,
}

/// Ordered bill lines keyed by item id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    lines: Vec<BillLine>,
}

impl Ledger {
    /// Creates an empty ledger.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Adds one unit of `item`. An item already on the bill has its quantity bumped in place;
    /// a new item is appended at the end. Returns the line's quantity afterwards.
    pub fn add_item(&mut self, item: &CatalogItem) -> u32 {
        if let Some(line) = self.lines.iter_mut().find(|line| line.item.id == item.id) {
            line.quantity = line.quantity.saturating_add(1);
            trace!("Bumped {} to quantity {}", item.code, line.quantity);
            return line.quantity;
        }

        self.lines.push(BillLine {
            item: item.clone(),
            quantity: 1,
        });
        trace!("Appended {} to the bill", item.code);
        1
    }

    /// Changes the quantity of `item_id` by `delta`, floored at zero. A line reaching zero
    /// is removed.
    pub fn adjust_quantity(&mut self, item_id: ItemId, delta: i64) -> Adjustment {
        let Some(index) = self.lines.iter().position(|line| line.item.id == item_id) else {
            return Adjustment::Absent;
        };

        let current = i64::from(self.lines[index].quantity);
        let next = current.saturating_add(delta).max(0);
        if next == 0 {
            let removed = self.lines.remove(index);
            trace!("Removed {} from the bill", removed.item.code);
            return Adjustment::Removed;
        }

        let next = u32::try_from(next).unwrap_or(u32::MAX);
        self.lines[index].quantity = next;
        Adjustment::Updated(next)
    }

    /// Sum of price times quantity over every line.
    #[must_use]
    pub fn total(&self) -> Money {
        self.lines.iter().map(BillLine::line_total).sum()
    }

    /// Number of distinct items on the bill.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// The line for `item_id`, if that item is on the bill.
    #[must_use]
    pub fn line(&self, item_id: ItemId) -> Option<&BillLine> {
        self.lines.iter().find(|line| line.item.id == item_id)
    }

    /// Lines in the order the items were first added.
    #[must_use]
    pub fn lines(&self) -> &[BillLine] {
        &self.lines
    }

    /// Whether the bill has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Drops every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
