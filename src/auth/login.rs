//! Login form controller

use crate::api::models::{Credentials, User};
use crate::auth::session::SessionService;
use crate::auth::validation::{validate_password, validate_username};
use crate::core::error::{ClientError, Result};

/// Per-field validation messages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.password.is_none()
    }
}

/// State behind the login screen
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    errors: FieldErrors,
    is_loading: bool,
    is_show_password: bool,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_show_password(&self) -> bool {
        self.is_show_password
    }

    pub fn toggle_password_visibility(&mut self) {
        self.is_show_password = !self.is_show_password;
    }

    pub fn validate_username(&mut self) {
        self.errors.username = validate_username(&self.username).map(str::to_string);
    }

    pub fn validate_password(&mut self) {
        self.errors.password = validate_password(&self.password).map(str::to_string);
    }

    /// Validate and, if both fields pass, log in through the session
    ///
    /// Invalid input never reaches the network; the messages stay on the
    /// form and the call fails with [`ClientError::Validation`].
    pub async fn submit(&mut self, session: &SessionService) -> Result<User> {
        self.validate_username();
        self.validate_password();

        if !self.errors.is_empty() {
            let message = [&self.errors.username, &self.errors.password]
                .into_iter()
                .flatten()
                .cloned()
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ClientError::Validation(message));
        }

        self.is_loading = true;
        let result = session
            .login(&Credentials::new(self.username.clone(), self.password.clone()))
            .await;
        self.is_loading = false;
        result
    }
}
