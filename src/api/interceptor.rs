//! Gateway decorator reacting to unauthorized responses
//!
//! Any 401, whichever request triggered it, sends the user back to the login
//! screen with an "Unauthorized Access" notification. The error itself is
//! passed on unchanged so the caller still settles with a failure.

use crate::api::gateway::{ApiRequest, HttpGateway};
use crate::core::error::Result;
use crate::core::navigation::{Navigator, LOGIN_PATH};
use crate::core::notify::{Notification, Notifier};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized Access";

pub struct ErrorInterceptor<G> {
    inner: G,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
}

impl<G: HttpGateway> ErrorInterceptor<G> {
    pub fn new(inner: G, navigator: Arc<dyn Navigator>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            inner,
            navigator,
            notifier,
        }
    }
}

#[async_trait]
impl<G: HttpGateway> HttpGateway for ErrorInterceptor<G> {
    async fn send(&self, request: ApiRequest) -> Result<Value> {
        let path = request.path.clone();
        match self.inner.send(request).await {
            Err(err) if err.is_unauthorized() => {
                tracing::warn!(path = %path, "Unauthorized response, redirecting to login");
                self.navigator.navigate(LOGIN_PATH);
                self.notifier
                    .notify(Notification::error(UNAUTHORIZED_MESSAGE, "Error"));
                Err(err)
            }
            other => other,
        }
    }
}
