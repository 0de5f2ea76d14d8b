//! Fakes shared by the unit tests

use crate::api::gateway::{ApiRequest, HttpGateway};
use crate::core::error::{ClientError, Result};
use crate::core::navigation::Navigator;
use crate::core::notify::{Notification, Notifier};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::sync::Mutex;
use std::time::Duration;

type Handler = Box<dyn Fn(&ApiRequest) -> (Duration, Result<Value>) + Send + Sync>;

/// Gateway answering from a closure and recording every request
pub struct FakeGateway {
    handler: Handler,
    requests: Mutex<Vec<ApiRequest>>,
}

impl FakeGateway {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&ApiRequest) -> Result<Value> + Send + Sync + 'static,
    {
        Self::with_delays(move |req| (Duration::ZERO, handler(req)))
    }

    /// Like `new`, but each answer is delayed by the returned duration
    pub fn with_delays<F>(handler: F) -> Self
    where
        F: Fn(&ApiRequest) -> (Duration, Result<Value>) + Send + Sync + 'static,
    {
        Self {
            handler: Box::new(handler),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpGateway for FakeGateway {
    async fn send(&self, request: ApiRequest) -> Result<Value> {
        self.requests.lock().unwrap().push(request.clone());
        let (delay, result) = (self.handler)(&request);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        result
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn all(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<Notification> {
        self.notifications.lock().unwrap().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications.lock().unwrap().push(notification);
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    paths: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.paths.lock().unwrap().push(path.to_string());
    }
}

pub fn http_error(status: u16, message: Option<&str>) -> ClientError {
    ClientError::Http {
        status: StatusCode::from_u16(status).unwrap(),
        message: message.map(str::to_string),
    }
}

/// Value of a query parameter on a recorded request
pub fn query_param(request: &ApiRequest, key: &str) -> Option<String> {
    request
        .query
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.clone())
}

/// A list envelope holding books with the given ids
pub fn page_body(current_page: u32, items_per_page: u32, total_items: u64, ids: &[i64]) -> Value {
    let data: Vec<Value> = ids
        .iter()
        .map(|id| json!({ "id": id, "title": format!("Book {}", id) }))
        .collect();
    json!({
        "data": data,
        "meta": {
            "currentPage": current_page,
            "itemsPerPage": items_per_page,
            "totalItems": total_items,
            "status": 200,
            "message": "OK"
        }
    })
}
