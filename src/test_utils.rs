//! Shared test utilities for the billing counter.
//!
//! Helpers for building catalog entries, sessions and a console app with sensible defaults.

use crate::{
    config::Settings,
    console::{App, handlers},
    core::{
        auth::StaticCredentialChecker,
        catalog::{Catalog, CatalogItem, ItemId},
        money::Money,
        session::BillingSession,
    },
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Username accepted by [`test_checker`].
pub const TEST_USERNAME: &str = "abc@gmail.com";
/// Password accepted by [`test_checker`].
pub const TEST_PASSWORD: &str = "12345";

/// Installs a tracing subscriber that writes through the test harness.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates a catalog entry named `Item <id>` with code `T<id>`.
///
/// # Arguments
/// * `id` - Item id
/// * `minor` - Price in minor units (25_000 is 250.00)
pub fn sample_item(id: ItemId, minor: i64) -> CatalogItem {
    CatalogItem::new(id, format!("Item {id}"), Money::from_minor(minor), format!("T{id:03}"))
}

/// A checker that accepts only [`TEST_USERNAME`] / [`TEST_PASSWORD`].
pub fn test_checker() -> StaticCredentialChecker {
    StaticCredentialChecker::empty().with_account(TEST_USERNAME, TEST_PASSWORD)
}

/// A billing session over the built-in menu.
pub fn test_session() -> BillingSession {
    BillingSession::new(Arc::new(Catalog::builtin()))
}

/// A console app on the login screen with the built-in menu and default settings.
pub fn test_app() -> App {
    init_test_tracing();
    App::new(
        Catalog::builtin(),
        Arc::new(test_checker()),
        &Settings::default(),
    )
}

/// Sets up a console app that is signed in and on the restaurant billing screen.
/// Must be called inside a tokio runtime because the header clock starts.
#[allow(clippy::unwrap_used)]
pub async fn signed_in_app() -> App {
    let mut app = test_app();
    for line in [
        format!("login {TEST_USERNAME} {TEST_PASSWORD}"),
        "select restaurant".to_string(),
        "next".to_string(),
    ] {
        handlers::handle(&mut app, line.parse().unwrap())
            .await
            .unwrap();
    }
    app
}
