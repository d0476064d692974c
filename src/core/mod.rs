//! Core billing logic - framework-agnostic catalog, ledger, session and flow.
//!
//! Nothing in here knows about the terminal; the console layer drives these types the way
//! any other front-end would.

/// Operator sign-in and the pluggable credential checker
pub mod auth;
/// Static menu catalog and search
pub mod catalog;
/// Periodic header clock with scoped start/stop
pub mod clock;
/// Login, business type and billing screen flow
pub mod flow;
/// Bill lines, quantity adjustment and totals
pub mod ledger;
/// Exact decimal money
pub mod money;
/// Bill snapshots and rendering
pub mod receipt;
/// Per-screen billing state
pub mod session;
