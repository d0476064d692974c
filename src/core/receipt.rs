//! Bill snapshots and their text rendering.
//!
//! A receipt is taken when the operator asks to print; it stays valid even if the live
//! ledger is cleared afterwards. Rendering returns plain strings so any front-end can show
//! them.

use crate::core::{
    clock::format_clock,
    ledger::{BillLine, Ledger},
    money::Money,
};
use chrono::{DateTime, Local};

/// A snapshot of a bill at the moment printing was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    /// Bill lines in order
    pub lines: Vec<BillLine>,
    /// Sum of all line totals
    pub total: Money,
    /// Distinct items on the bill
    pub item_count: usize,
    /// Sum of all quantities
    pub total_quantity: u64,
    /// Table number as typed by the operator
    pub table_number: String,
    /// Captain (server) name as typed by the operator
    pub captain_name: String,
    /// When the snapshot was taken
    pub printed_at: DateTime<Local>,
}

impl Receipt {
    /// Snapshots `ledger` together with the session text fields.
    #[must_use]
    pub fn snapshot(
        ledger: &Ledger,
        table_number: &str,
        captain_name: &str,
        printed_at: DateTime<Local>,
    ) -> Self {
        Self {
            lines: ledger.lines().to_vec(),
            total: ledger.total(),
            item_count: ledger.item_count(),
            total_quantity: ledger.total_quantity(),
            table_number: table_number.to_string(),
            captain_name: captain_name.to_string(),
            printed_at,
        }
    }

    /// The confirmation prompt shown before printing.
    #[must_use]
    pub fn confirmation_prompt(&self, currency: &str) -> String {
        format!(
            "Total Amount: {}\nTable: {}\nCaptain: {}",
            self.total.format_with(currency),
            self.table_number,
            self.captain_name
        )
    }

    /// Full printable bill.
    #[must_use]
    pub fn render(&self, currency: &str) -> String {
        let mut out = format!(
            "Bill - {}\nTable: {}  Captain: {}\n",
            format_clock(&self.printed_at),
            self.table_number,
            self.captain_name
        );
        out.push_str(&render_lines(&self.lines, currency));
        out.push_str(&format!(
            "\nItems: {}  Quantity: {}\nTotal: {}",
            self.item_count,
            self.total_quantity,
            self.total.format_with(currency)
        ));
        out
    }
}

/// Renders bill lines as an aligned Item / Price / Qty / Total table.
#[must_use]
pub fn render_lines(lines: &[BillLine], currency: &str) -> String {
    if lines.is_empty() {
        return "No items added yet".to_string();
    }

    let mut out = format!("{:<24} {:>10} {:>4} {:>11}", "Item", "Price", "Qty", "Total");
    for line in lines {
        let item = line.item();
        out.push_str(&format!(
            "\n{:<24} {:>10} {:>4} {:>11}",
            item.name,
            item.price.format_with(currency),
            line.quantity(),
            line.line_total().format_with(currency)
        ));
    }
    out
}
