//! Catalog state: the latest page of books plus single-book CRUD

use crate::api::gateway::{ApiRequest, GatewayExt, HttpGateway};
use crate::api::models::{ApiResponse, Book, BookId, BookQuery};
use crate::core::error::{ClientError, Result};
use crate::core::notify::{Notification, Notifier};
use crate::core::observable::{Observable, Subject};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

pub type BookPage = ApiResponse<Vec<Book>>;

/// Holder of the most recent list response
///
/// Every `fetch_page` is numbered. A response is published only if no later
/// request has already been published, so a slow page can never overwrite a
/// newer one.
pub struct CatalogService {
    gateway: Arc<dyn HttpGateway>,
    notifier: Arc<dyn Notifier>,
    books: Subject<BookPage>,
    issued: AtomicU64,
    applied: Mutex<u64>,
}

impl CatalogService {
    pub fn new(gateway: Arc<dyn HttpGateway>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            gateway,
            notifier,
            books: Subject::new(BookPage::default()),
            issued: AtomicU64::new(0),
            applied: Mutex::new(0),
        }
    }

    /// Replay-latest stream of list responses, initially `{ data: [] }`
    pub fn books(&self) -> Observable<BookPage> {
        self.books.as_observable()
    }

    pub fn latest(&self) -> BookPage {
        self.books.value()
    }

    /// Fetch one page of the catalog, optionally filtered by genre
    pub async fn fetch_page(&self, page: u32, genre: Option<&str>) -> Result<BookPage> {
        if page == 0 {
            return Err(ClientError::Validation("page numbers start at 1".to_string()));
        }

        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let query = BookQuery::page(page).with_genre(genre);
        let request = ApiRequest::get("books").with_query(query.to_pairs());

        let result: Result<BookPage> = self.gateway.fetch(request).await;
        match result {
            Ok(response) => {
                let mut applied = self.applied.lock().unwrap_or_else(PoisonError::into_inner);
                if seq < *applied {
                    warn!(page, seq, applied = *applied, "Discarding stale page response");
                    return Ok(response);
                }
                *applied = seq;
                debug!(page, items = response.data.len(), "Publishing page");
                self.books.next(response.clone());
                Ok(response)
            }
            Err(e) => {
                warn!(page, error = %e, "Failed to fetch books");
                self.notifier
                    .notify(Notification::error("Error while retrieving books", "Error"));
                Err(e)
            }
        }
    }

    /// Run `fetch_page` as a detached task; the handle settles with it
    pub fn spawn_fetch_page(
        self: &Arc<Self>,
        page: u32,
        genre: Option<String>,
    ) -> JoinHandle<Result<BookPage>> {
        let service = self.clone();
        tokio::spawn(async move { service.fetch_page(page, genre.as_deref()).await })
    }

    pub async fn fetch_one(&self, id: BookId) -> Result<Book> {
        let request = ApiRequest::get(format!("books/{}", id));
        let result: Result<Book> = self.gateway.fetch(request).await;
        self.report(result, None, "Error while retrieving the book")
    }

    pub async fn create(&self, book: &Book) -> Result<Value> {
        let result = match ApiRequest::post("books", book) {
            Ok(request) => self.gateway.send(request).await,
            Err(e) => Err(e),
        };
        self.report(
            result,
            Some("Book created successfully!"),
            "Error while creating the book",
        )
    }

    pub async fn update(&self, id: BookId, book: &Book) -> Result<Value> {
        let result = match ApiRequest::put(format!("books/{}", id), book) {
            Ok(request) => self.gateway.send(request).await,
            Err(e) => Err(e),
        };
        self.report(
            result,
            Some("Book updated successfully!"),
            "Error while updating the book",
        )
    }

    pub async fn delete(&self, id: BookId) -> Result<Value> {
        let result = self
            .gateway
            .send(ApiRequest::delete(format!("books/{}", id)))
            .await;
        self.report(
            result,
            Some("Book removed successfully!"),
            "Error while removing the book",
        )
    }

    fn report<T>(&self, result: Result<T>, success: Option<&str>, failure: &str) -> Result<T> {
        match &result {
            Ok(_) => {
                if let Some(message) = success {
                    self.notifier.notify(Notification::success(message, "Success"));
                }
            }
            Err(e) => {
                warn!(error = %e, "{}", failure);
                self.notifier.notify(Notification::error(failure, "Error"));
            }
        }
        result
    }
}
