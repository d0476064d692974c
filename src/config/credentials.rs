//! Operator account configuration from environment variables.
//!
//! Reads `POS_USERNAME` and `POS_PASSWORD` (a `.env` file is honored) to build the
//! placeholder [`StaticCredentialChecker`]. Without both variables no one can sign in.

use crate::core::auth::StaticCredentialChecker;
use tracing::warn;

/// Environment variable holding the operator username
pub const USERNAME_VAR: &str = "POS_USERNAME";
/// Environment variable holding the operator password
pub const PASSWORD_VAR: &str = "POS_PASSWORD";

/// Builds the credential checker from the environment.
#[must_use]
pub fn checker_from_env() -> StaticCredentialChecker {
    checker_from_lookup(|key| std::env::var(key).ok())
}

/// Builds the credential checker from any key lookup. Blank values count as missing.
pub fn checker_from_lookup<F>(lookup: F) -> StaticCredentialChecker
where
    F: Fn(&str) -> Option<String>,
{
    let present = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let (Some(username), Some(password)) = (present(USERNAME_VAR), present(PASSWORD_VAR)) {
        StaticCredentialChecker::empty().with_account(username.trim(), &password)
    } else {
        warn!("{USERNAME_VAR} / {PASSWORD_VAR} not set; every sign-in will be rejected");
        StaticCredentialChecker::empty()
    }
}
