//! Console command parsing.
//!
//! One line of operator input becomes one [`Command`]. Parsing only checks the shape of the
//! line; whether the command is allowed on the current screen is decided by the handlers.

use crate::{
    core::{catalog::ItemId, flow::BusinessType},
    errors::{Error, Result},
};
use std::str::FromStr;

/// Everything the operator can type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `login <username> <password>`
    Login {
        /// Operator username
        username: String,
        /// Operator password
        password: String,
    },
    /// `types` - list business types
    Types,
    /// `select <business type>`
    Select(BusinessType),
    /// `next` - confirm the business type
    Next,
    /// `categories`
    Categories,
    /// `category <name>`
    Category(String),
    /// `search [term]` - an empty term clears the filter
    Search(String),
    /// `menu` - list the filtered menu
    Menu,
    /// `add <code|id>`
    Add(String),
    /// `inc <id>`, `dec <id>` or `qty <id> <delta>`
    Adjust {
        /// Item whose line changes
        item_id: ItemId,
        /// Signed change in quantity
        delta: i64,
    },
    /// `table <text>`
    Table(String),
    /// `captain <text>`
    Captain(String),
    /// `bill`
    Bill,
    /// `print` - ask for confirmation
    Print,
    /// `confirm` - print and start a new bill
    Confirm,
    /// `cancel` - keep the bill
    Cancel,
    /// `logout` - back to the login screen
    Logout,
    /// `help`
    Help,
    /// `quit` - close the counter
    Quit,
}

impl Command {
    /// Keyword naming the command in messages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Login { .. } => "login",
            Self::Types => "types",
            Self::Select(_) => "select",
            Self::Next => "next",
            Self::Categories => "categories",
            Self::Category(_) => "category",
            Self::Search(_) => "search",
            Self::Menu => "menu",
            Self::Add(_) => "add",
            Self::Adjust { .. } => "qty",
            Self::Table(_) => "table",
            Self::Captain(_) => "captain",
            Self::Bill => "bill",
            Self::Print => "print",
            Self::Confirm => "confirm",
            Self::Cancel => "cancel",
            Self::Logout => "logout",
            Self::Help => "help",
            Self::Quit => "quit",
        }
    }
}

fn usage(text: &str) -> Error {
    Error::Command {
        message: format!("Usage: {text}"),
    }
}

fn parse_item_id(raw: &str, usage_text: &str) -> Result<ItemId> {
    raw.parse().map_err(|_| usage(usage_text))
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (keyword, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(keyword, rest)| (keyword, rest.trim()));

        let command = match keyword.to_lowercase().as_str() {
            "login" => {
                let mut parts = rest.split_whitespace();
                let username = parts.next().unwrap_or_default().to_string();
                let password = parts.next().unwrap_or_default().to_string();
                if parts.next().is_some() {
                    return Err(usage("login <username> <password>"));
                }
                Self::Login { username, password }
            }
            "types" => Self::Types,
            "select" => {
                if rest.is_empty() {
                    return Err(usage("select <business type>"));
                }
                Self::Select(rest.parse()?)
            }
            "next" => Self::Next,
            "categories" => Self::Categories,
            "category" => {
                if rest.is_empty() {
                    return Err(usage("category <name>"));
                }
                Self::Category(rest.to_string())
            }
            "search" => Self::Search(rest.to_string()),
            "menu" => Self::Menu,
            "add" => {
                if rest.is_empty() {
                    return Err(usage("add <code|id>"));
                }
                Self::Add(rest.to_string())
            }
            "inc" => Self::Adjust {
                item_id: parse_item_id(rest, "inc <id>")?,
                delta: 1,
            },
            "dec" => Self::Adjust {
                item_id: parse_item_id(rest, "dec <id>")?,
                delta: -1,
            },
            "qty" => {
                let (id, delta) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| usage("qty <id> <delta>"))?;
                Self::Adjust {
                    item_id: parse_item_id(id, "qty <id> <delta>")?,
                    delta: delta
                        .trim()
                        .trim_start_matches('+')
                        .parse()
                        .map_err(|_| usage("qty <id> <delta>"))?,
                }
            }
            "table" => Self::Table(rest.to_string()),
            "captain" => Self::Captain(rest.to_string()),
            "bill" => Self::Bill,
            "print" => Self::Print,
            "confirm" => Self::Confirm,
            "cancel" => Self::Cancel,
            "logout" => Self::Logout,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => {
                return Err(Error::Command {
                    message: format!("Unknown command '{other}'. Type `help` for the list."),
                });
            }
        };
        Ok(command)
    }
}
