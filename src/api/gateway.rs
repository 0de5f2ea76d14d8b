//! HTTP gateway to the book API
//!
//! [`HttpGateway`] is the seam between the state holders and the network.
//! [`ReqwestGateway`] talks JSON to a fixed base URL; tests substitute
//! their own implementations.

use crate::api::models::ErrorBody;
use crate::core::config::ApiConfig;
use crate::core::error::{ClientError, Result};
use async_trait::async_trait;
use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// A JSON request relative to the API base URL
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn post<B: Serialize>(path: impl Into<String>, body: &B) -> Result<Self> {
        Self::new(Method::POST, path).with_body(body)
    }

    pub fn put<B: Serialize>(path: impl Into<String>, body: &B) -> Result<Self> {
        Self::new(Method::PUT, path).with_body(body)
    }

    pub fn with_query(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    fn with_body<B: Serialize>(mut self, body: &B) -> Result<Self> {
        let body = serde_json::to_value(body)
            .map_err(|e| ClientError::Serialization(e.to_string()))?;
        self.body = Some(body);
        Ok(self)
    }
}

/// Performs requests against the remote API
///
/// Non-2xx responses come back as [`ClientError::Http`]. An empty 2xx body
/// is returned as `Value::Null`.
#[async_trait]
pub trait HttpGateway: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<Value>;
}

/// Typed helpers on top of any gateway
#[async_trait]
pub trait GatewayExt: HttpGateway {
    /// Send a request and decode the JSON response into `T`
    async fn fetch<T>(&self, request: ApiRequest) -> Result<T>
    where
        T: DeserializeOwned + Send,
    {
        let value = self.send(request).await?;
        serde_json::from_value(value).map_err(|e| ClientError::Deserialization(e.to_string()))
    }
}

impl<G: HttpGateway + ?Sized> GatewayExt for G {}

/// reqwest-backed gateway
pub struct ReqwestGateway {
    client: Client,
    base_url: Url,
}

impl ReqwestGateway {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Self::with_client(client, &config.base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        // A trailing slash makes `join` append instead of replacing the last segment
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalized)
            .map_err(|e| ClientError::Config(format!("Invalid base URL {}: {}", base_url, e)))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL for a request, query included
    pub fn url_for(&self, request: &ApiRequest) -> Result<Url> {
        let mut url = self
            .base_url
            .join(request.path.trim_start_matches('/'))
            .map_err(|e| ClientError::InvalidRequest(format!("{}: {}", request.path, e)))?;

        if !request.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &request.query {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }
}

#[async_trait]
impl HttpGateway for ReqwestGateway {
    async fn send(&self, request: ApiRequest) -> Result<Value> {
        let url = self.url_for(&request)?;
        tracing::debug!(method = %request.method, url = %url, "Sending API request");

        let mut builder = self.client.request(request.method.clone(), url.clone());
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            let err = ClientError::from(e);
            tracing::warn!(method = %request.method, url = %url, error = %err, "API request failed");
            err
        })?;

        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let err = ClientError::Http {
                status,
                message: ErrorBody::message_from(&bytes),
            };
            tracing::warn!(
                method = %request.method,
                url = %url,
                status = status.as_u16(),
                "API request rejected: {}",
                err
            );
            return Err(err);
        }

        if bytes.is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&bytes).map_err(|e| ClientError::Deserialization(e.to_string()))
    }
}
