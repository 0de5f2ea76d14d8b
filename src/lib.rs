//! Bookshelf Client Library
//!
//! Client-side core for the book catalog API: the logged-in session, the
//! paginated catalog with infinite scrolling, login validation, and the
//! HTTP gateway underneath them.

pub mod api;
pub mod app;
pub mod auth;
pub mod books;
pub mod core;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use crate::core::{ClientError, Config, Observable, Subject};
pub use app::AppContext;
pub use auth::{HeaderView, LoginForm, SessionService};
pub use books::{BookList, CatalogService};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
