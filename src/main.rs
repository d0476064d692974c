use billing_counter::{config, config::menu::build_catalog, config::credentials, console};
use billing_counter::errors::Result;
use dotenvy::dotenv;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible); stdout belongs to the console
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok(); // Make it non-fatal, env vars can be set externally
    info!("Attempted to load .env file.");

    // 3. Load the application configuration and build the menu
    let app_config = config::load_app_configuration()
        .inspect_err(|e| error!("Critical error loading application configuration: {}", e))?;
    let catalog = build_catalog(app_config.categories)
        .inspect_err(|e| error!("Invalid menu configuration: {}", e))?;

    // 4. Credential checker for the sign-in screen
    let checker = Arc::new(credentials::checker_from_env());

    // 5. Run the console
    let app = console::App::new(catalog, checker, &app_config.settings);
    console::run(app)
        .await
        .inspect_err(|e| error!("Console stopped with an error: {}", e))?;

    info!("Billing counter closed.");
    Ok(())
}
