//! Command handlers - apply one parsed command to the app state and build the reply text.

use crate::{
    console::{App, commands::Command},
    core::{
        catalog::CatalogItem,
        flow::{BusinessType, Screen},
        ledger::Adjustment,
        receipt::render_lines,
        session::BillingSession,
    },
    errors::Result,
};
use std::fmt::Write;

/// What the console should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print this text and keep going
    Text(String),
    /// Stop the console
    Quit,
}

impl Reply {
    fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
}

/// Summary of all available commands.
#[must_use]
pub fn help_text() -> &'static str {
    "**Billing Counter Help**\n\
    • `login <username> <password>` - Sign in.\n\
    • `types` / `select <type>` / `next` - Choose the business type and open billing.\n\
    • `categories` / `category <name>` - List or switch menu categories.\n\
    • `search [term]` / `menu` - Filter the menu by name or code, then list it.\n\
    • `add <code|id>` - Add one unit of a menu item to the bill.\n\
    • `inc <id>` / `dec <id>` / `qty <id> <delta>` - Change a quantity; zero removes the line.\n\
    • `table <number>` / `captain <name>` - Set the bill's table number and captain.\n\
    • `bill` - Show the current bill.\n\
    • `print` then `confirm` or `cancel` - Print the bill and start a new one.\n\
    • `logout` / `help` / `quit`"
}

/// Executes `command` against `app`.
///
/// # Errors
/// Returns the error of the underlying operation; the app state is unchanged in that case.
pub async fn handle(app: &mut App, command: Command) -> Result<Reply> {
    let action = command.name();
    let reply = match command {
        Command::Login { username, password } => {
            let checker = std::sync::Arc::clone(&app.checker);
            let operator = app.flow.login(&*checker, &username, &password).await?;
            let mut text = format!("✅ Welcome, {}.\n", operator.username);
            text.push_str(&business_types(None));
            Reply::Text(text)
        }
        Command::Types => {
            app.flow.expect_screen(Screen::BusinessTypeSelection, action)?;
            Reply::Text(business_types(app.flow.selected_business_type()))
        }
        Command::Select(kind) => {
            app.flow.select_business_type(kind)?;
            Reply::Text(format!("Selected {kind}. Type `next` to continue."))
        }
        Command::Next => {
            let kind = app.flow.proceed()?;
            app.enter_billing();
            let currency = app.currency.clone();
            let session = app.session_mut(action)?;
            let text = format!(
                "Opened {kind} billing.\n{}\n\n{}",
                categories(session),
                menu(session, &currency)
            );
            Reply::Text(text)
        }
        Command::Categories => Reply::Text(categories(app.session_mut(action)?)),
        Command::Category(name) => {
            let currency = app.currency.clone();
            let session = app.session_mut(action)?;
            session.select_category(&name);
            Reply::Text(menu(session, &currency))
        }
        Command::Search(term) => {
            let currency = app.currency.clone();
            let session = app.session_mut(action)?;
            session.set_search_term(term);
            Reply::Text(menu(session, &currency))
        }
        Command::Menu => {
            let currency = app.currency.clone();
            Reply::Text(menu(app.session_mut(action)?, &currency))
        }
        Command::Add(query) => {
            let currency = app.currency.clone();
            let session = app.session_mut(action)?;
            let (item, quantity) = session.add_by_query(&query)?;
            Reply::Text(format!(
                "Added {} (qty {quantity}). Total: {}",
                item.name,
                session.total().format_with(&currency)
            ))
        }
        Command::Adjust { item_id, delta } => {
            let currency = app.currency.clone();
            let session = app.session_mut(action)?;
            let name = session
                .ledger()
                .line(item_id)
                .map(|line| line.item().name.clone());
            let text = match (session.adjust_quantity(item_id, delta), name) {
                (Adjustment::Updated(quantity), Some(name)) => {
                    format!("{name} quantity is now {quantity}.")
                }
                (Adjustment::Removed, Some(name)) => format!("Removed {name} from the bill."),
                _ => format!("Item {item_id} is not on the bill."),
            };
            Reply::Text(format!(
                "{text} Total: {}",
                session.total().format_with(&currency)
            ))
        }
        Command::Table(table_number) => {
            let session = app.session_mut(action)?;
            session.set_table_number(table_number);
            Reply::Text(format!("Table: {}", session.table_number()))
        }
        Command::Captain(captain_name) => {
            let session = app.session_mut(action)?;
            session.set_captain_name(captain_name);
            Reply::Text(format!("Captain: {}", session.captain_name()))
        }
        Command::Bill => {
            let currency = app.currency.clone();
            Reply::Text(bill(app.session_mut(action)?, &currency))
        }
        Command::Print => {
            let currency = app.currency.clone();
            let receipt = app.session_mut(action)?.request_print()?;
            Reply::Text(format!(
                "Print Bill\n{}\nType `confirm` to print or `cancel` to close.",
                receipt.confirmation_prompt(&currency)
            ))
        }
        Command::Confirm => {
            let currency = app.currency.clone();
            let receipt = app.session_mut(action)?.confirm_print()?;
            Reply::Text(format!(
                "{}\n\nBill Printed: Your bill has been processed.",
                receipt.render(&currency)
            ))
        }
        Command::Cancel => {
            app.session_mut(action)?.cancel_print()?;
            Reply::text("Print cancelled; the bill is unchanged.")
        }
        Command::Logout => {
            app.leave_billing();
            app.flow.logout();
            Reply::text("Signed out.")
        }
        Command::Help => Reply::text(help_text()),
        Command::Quit => Reply::Quit,
    };
    Ok(reply)
}

fn business_types(selected: Option<BusinessType>) -> String {
    let mut text = String::from("Select your business type:");
    for kind in BusinessType::ALL {
        let marker = if selected == Some(kind) { "*" } else { " " };
        let _ = write!(text, "\n {marker} {:<14} {}", kind.label(), kind.description());
    }
    text
}

fn categories(session: &BillingSession) -> String {
    let mut text = String::from("Categories:");
    for name in session.catalog().category_names() {
        let marker = if name == session.selected_category() { "*" } else { " " };
        let _ = write!(text, "\n {marker} {name}");
    }
    text
}

fn menu_row(item: &CatalogItem, currency: &str) -> String {
    format!(
        "{:>3}  {:<7} {:<24} {:>10}",
        item.id,
        item.code,
        item.name,
        item.price.format_with(currency)
    )
}

fn menu(session: &BillingSession, currency: &str) -> String {
    let mut text = session.selected_category().to_string();
    if !session.search_term().is_empty() {
        let _ = write!(text, " (search: {})", session.search_term());
    }

    let items = session.visible_items();
    if items.is_empty() {
        text.push_str("\n  No matching items");
    }
    for item in items {
        let _ = write!(text, "\n{}", menu_row(item, currency));
    }
    text
}

fn bill(session: &BillingSession, currency: &str) -> String {
    format!(
        "Bill Details  (Table: {}  Captain: {})\n{}\nTotal: {}",
        session.table_number(),
        session.captain_name(),
        render_lines(session.lines(), currency),
        session.total().format_with(currency)
    )
}
