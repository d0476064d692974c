//! Unified error type for the billing counter.

use thiserror::Error;

/// Every failure the billing counter can report.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or is inconsistent
    #[error("Configuration error: {message}")]
    Config {
        /// What was wrong with the configuration
        message: String,
    },

    /// User input rejected before any state changed
    #[error("{message}")]
    Validation {
        /// Message shown to the operator
        message: String,
    },

    /// The credential checker rejected the username/password pair
    #[error("Incorrect username or password. Please try again.")]
    InvalidCredentials,

    /// The credential checker could not answer
    #[error("Credential service unavailable: {message}")]
    CredentialService {
        /// Underlying cause
        message: String,
    },

    /// An operation was attempted from a screen that does not offer it
    #[error("'{action}' is not available on the {screen} screen")]
    Navigation {
        /// The attempted action
        action: &'static str,
        /// The screen the flow is currently on
        screen: &'static str,
    },

    /// No catalog entry matches what the operator typed
    #[error("No menu item matches '{query}'")]
    ItemNotFound {
        /// The code or id that was looked up
        query: String,
    },

    /// Printing was requested for a bill without lines
    #[error("Cannot print an empty bill")]
    EmptyBill,

    /// Confirm or cancel without a pending print
    #[error("No bill is waiting for print confirmation")]
    NoPendingPrint,

    /// A console line could not be parsed into a command
    #[error("{message}")]
    Command {
        /// Parse failure description
        message: String,
    },

    /// Reading operator input or writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a [`Error::Validation`] with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
