//! API layer for the Accounts domain
//!
//! Contains HTTP handlers, routes, and domain state definition.

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::{AccountsState, CurrentUser};
pub use routes::routes;
