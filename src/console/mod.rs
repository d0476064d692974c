//! Console layer - a terminal front-end for the billing counter.
//!
//! Reads one command per line (stdin, or any buffered reader), applies it to the [`App`]
//! state and writes the reply. While the billing screen is open the header clock is
//! refreshed in between.

/// Command line parsing
pub mod commands;
/// Command execution against the app state
pub mod handlers;

use crate::{
    config::Settings,
    core::{
        auth::CredentialChecker,
        catalog::Catalog,
        clock::{Clock, ClockGuard, format_clock},
        flow::{Flow, Screen},
        session::BillingSession,
    },
    errors::{Error, Result},
};
use commands::Command;
use handlers::Reply;
use std::{io::Write, sync::Arc};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{info, warn};

/// Everything the console front-end holds.
pub struct App {
    flow: Flow,
    session: Option<BillingSession>,
    catalog: Arc<Catalog>,
    checker: Arc<dyn CredentialChecker>,
    clock: Clock,
    clock_guard: Option<ClockGuard>,
    currency: String,
}

impl App {
    /// Creates the app on the login screen.
    #[must_use]
    pub fn new(catalog: Catalog, checker: Arc<dyn CredentialChecker>, settings: &Settings) -> Self {
        Self {
            flow: Flow::new(),
            session: None,
            catalog: Arc::new(catalog),
            checker,
            clock: Clock::new(settings.clock_interval()),
            clock_guard: None,
            currency: settings.currency_symbol.clone(),
        }
    }

    /// Navigation state.
    #[must_use]
    pub const fn flow(&self) -> &Flow {
        &self.flow
    }

    /// The open bill, present only on the billing screen.
    #[must_use]
    pub const fn session(&self) -> Option<&BillingSession> {
        self.session.as_ref()
    }

    /// Whether the header clock task is running.
    #[must_use]
    pub const fn clock_running(&self) -> bool {
        self.clock_guard.is_some()
    }

    /// Header line: current time and version.
    #[must_use]
    pub fn header(&self) -> String {
        format!(
            "{}  |  v{}",
            format_clock(&self.clock.now()),
            env!("CARGO_PKG_VERSION")
        )
    }

    /// Opens a fresh bill and starts the clock. Called when the billing screen gains focus.
    fn enter_billing(&mut self) {
        self.session = Some(BillingSession::new(Arc::clone(&self.catalog)));
        self.clock_guard = Some(self.clock.start());
    }

    /// Drops the bill and stops the clock. Called when the billing screen loses focus.
    fn leave_billing(&mut self) {
        self.session = None;
        self.clock_guard = None;
    }

    fn session_mut(&mut self, action: &'static str) -> Result<&mut BillingSession> {
        self.flow.expect_screen(Screen::Billing, action)?;
        self.session.as_mut().ok_or(Error::Navigation {
            action,
            screen: self.flow.screen().title(),
        })
    }
}

fn prompt<W: Write>(app: &App, output: &mut W) -> Result<()> {
    write!(output, "{}> ", app.flow.screen().title())?;
    output.flush()?;
    Ok(())
}

/// Runs the console on stdin and stdout until `quit` or end of input.
///
/// # Errors
/// Returns an error only if stdin cannot be read or stdout cannot be written.
pub async fn run(app: App) -> Result<()> {
    let input = BufReader::new(tokio::io::stdin());
    let mut output = std::io::stdout();
    serve(app, input, &mut output).await
}

/// Runs the console loop over any line source and writer until `quit` or end of input.
///
/// Commands are read from `input` one per line; replies, errors and clock refreshes are
/// written to `output`.
///
/// # Errors
/// Returns an error only if `input` cannot be read or `output` cannot be written.
pub async fn serve<R, W>(mut app: App, input: R, output: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut ticks = app.clock.subscribe();

    writeln!(output, "{}", handlers::help_text())?;
    prompt(&app, output)?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("End of input; closing the counter");
                    break;
                };
                if line.trim().is_empty() {
                    prompt(&app, output)?;
                    continue;
                }

                let outcome = match line.parse::<Command>() {
                    Ok(command) => handlers::handle(&mut app, command).await,
                    Err(e) => Err(e),
                };
                match outcome {
                    Ok(Reply::Quit) => break,
                    Ok(Reply::Text(text)) => writeln!(output, "{text}")?,
                    Err(e) => {
                        warn!("Command '{}' failed: {}", line.trim(), e);
                        writeln!(output, "❌ {e}")?;
                    }
                }
                prompt(&app, output)?;
            }
            changed = ticks.changed() => {
                if changed.is_ok() && app.clock_running() {
                    writeln!(output, "\n{}", app.header())?;
                    prompt(&app, output)?;
                }
            }
        }
    }

    app.leave_billing();
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    async fn transcript(input: &str) -> String {
        let mut output = Vec::new();
        serve(test_app(), input.as_bytes(), &mut output)
            .await
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[tokio::test]
    async fn test_session_over_in_memory_input() {
        let out = transcript(&format!(
            "login {TEST_USERNAME} {TEST_PASSWORD}\n\
             select restaurant\n\
             next\n\
             \n\
             add MC001\n\
             add XYZ\n\
             inc 1\n\
             quit\n\
             add MC002\n"
        ))
        .await;

        assert!(out.starts_with("**Billing Counter Help**"));
        assert!(out.contains("✅ Welcome, abc@gmail.com."));
        assert!(out.contains("Opened Restaurant billing."));
        assert!(out.contains("Added Butter Chicken (qty 1). Total: ₹250.00"));
        assert!(out.contains("❌ No menu item matches 'XYZ'"));
        assert!(out.contains("Butter Chicken quantity is now 2. Total: ₹500.00"));
        assert!(out.contains("billing> "));
        // nothing after quit is executed
        assert!(!out.contains("Added Paneer Tikka Masala"));
    }

    #[tokio::test]
    async fn test_end_of_input_closes_the_counter() {
        let out = transcript("add MC001\nlogin\n").await;
        assert!(out.contains("❌ 'add' is not available on the login screen"));
        assert!(out.contains("❌ Please fill in all fields"));
        assert!(out.ends_with("login> "));
    }
}
