/// Application settings loading from config.toml
pub mod app;

/// Placeholder operator account from environment variables
pub mod credentials;

/// Menu categories and items loading from config.toml
pub mod menu;

pub use app::{AppConfig, Settings, load_app_configuration, load_config};
