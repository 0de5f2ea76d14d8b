//! Login credential validation

use lazy_static::lazy_static;
use regex::Regex;

pub const USERNAME_REQUIRED: &str = "Username is required";
pub const PASSWORD_REQUIRED: &str = "Password is required";
pub const PASSWORD_TOO_WEAK: &str =
    "Password must contain at least one uppercase letter, one digit, and one special character";

/// Special characters accepted (and one of which is required) in passwords
const SPECIAL_CHARS: &str = "@$!%*?&";

lazy_static! {
    static ref PASSWORD_CHARSET: Regex = Regex::new(r"^[A-Za-z\d@$!%*?&]+$").unwrap();
}

/// Error message for the username field, `None` when valid
pub fn validate_username(username: &str) -> Option<&'static str> {
    if username.is_empty() {
        Some(USERNAME_REQUIRED)
    } else {
        None
    }
}

/// Error message for the password field, `None` when valid
///
/// Only letters, digits and `@$!%*?&` are allowed; at least one uppercase
/// letter, one digit and one of those specials must appear.
pub fn validate_password(password: &str) -> Option<&'static str> {
    if password.is_empty() {
        return Some(PASSWORD_REQUIRED);
    }

    let strong = PASSWORD_CHARSET.is_match(password)
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| SPECIAL_CHARS.contains(c));

    if strong {
        None
    } else {
        Some(PASSWORD_TOO_WEAK)
    }
}
