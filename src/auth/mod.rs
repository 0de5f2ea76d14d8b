//! Authentication module
//!
//! This module provides:
//! - The session holder (current user, persisted across restarts)
//! - Login form state and credential validation
//! - The header view following the current user

pub mod header;
pub mod login;
pub mod session;
pub mod validation;

pub use header::HeaderView;
pub use login::{FieldErrors, LoginForm};
pub use session::{RestoreError, SessionService, CURRENT_USER_KEY};
pub use validation::{validate_password, validate_username};
