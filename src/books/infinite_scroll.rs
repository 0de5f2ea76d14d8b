//! Infinite-scroll book list
//!
//! [`ScrollState`] is the pure pagination policy: the page counter, the
//! in-flight guard and the accumulated records. [`BookList`] wires it to a
//! [`CatalogService`]: it accumulates every published page and turns
//! "near bottom" signals into page fetches.

use crate::api::models::{is_end_of_list, Book, PageMeta};
use crate::books::service::{BookPage, CatalogService};
use crate::core::observable::Subscription;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::JoinHandle;
use tracing::debug;

/// True when the viewport bottom has reached the page bottom
pub fn is_scrolled_to_bottom(scroll_y: f64, visible_height: f64, page_height: f64) -> bool {
    scroll_y + visible_height >= page_height
}

/// Pagination and accumulation state behind the list screen
#[derive(Debug, Clone)]
pub struct ScrollState {
    page_index: u32,
    is_loading: bool,
    books: Option<Vec<Book>>,
    meta: Option<PageMeta>,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            page_index: 1,
            is_loading: false,
            books: None,
            meta: None,
        }
    }
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page_index(&self) -> u32 {
        self.page_index
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn books(&self) -> &[Book] {
        self.books.as_deref().unwrap_or(&[])
    }

    pub fn meta(&self) -> Option<&PageMeta> {
        self.meta.as_ref()
    }

    pub fn is_end_of_list(&self) -> bool {
        is_end_of_list(self.meta.as_ref())
    }

    /// Fold a published page into the accumulated list
    ///
    /// The very first page received initializes the list; every later one
    /// is appended, whatever its page number.
    pub fn accumulate(&mut self, page: &BookPage) {
        match self.books.as_mut() {
            Some(books) => books.extend(page.data.iter().cloned()),
            None => self.books = Some(page.data.clone()),
        }
        self.meta = page.meta.clone();
    }

    /// Mark the first page as loading; returns the page to fetch
    pub fn begin_initial(&mut self) -> u32 {
        self.is_loading = true;
        self.page_index
    }

    /// Advance to the next page unless the list is exhausted or a fetch is
    /// already running; a refused advance leaves the counter untouched
    pub fn begin_next_page(&mut self) -> Option<u32> {
        if self.is_end_of_list() || self.is_loading {
            return None;
        }
        self.page_index += 1;
        self.is_loading = true;
        Some(self.page_index)
    }

    /// Clear the in-flight guard once a fetch has settled
    pub fn settle(&mut self) {
        self.is_loading = false;
    }

    /// Forget everything and start again from page 1
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// List screen controller
pub struct BookList {
    catalog: Arc<CatalogService>,
    state: Arc<Mutex<ScrollState>>,
    genre: Option<String>,
    _subscription: Subscription,
}

fn lock(state: &Mutex<ScrollState>) -> MutexGuard<'_, ScrollState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl BookList {
    pub fn new(catalog: Arc<CatalogService>) -> Self {
        Self::with_genre(catalog, None)
    }

    pub fn with_genre(catalog: Arc<CatalogService>, genre: Option<String>) -> Self {
        let state = Arc::new(Mutex::new(ScrollState::new()));
        let sink = state.clone();
        let subscription = catalog
            .books()
            .subscribe(move |page: &BookPage| lock(&sink).accumulate(page));

        Self {
            catalog,
            state,
            genre,
            _subscription: subscription,
        }
    }

    /// Fetch the first page
    pub fn load_initial(&self) -> JoinHandle<()> {
        let page = lock(&self.state).begin_initial();
        self.spawn_fetch(page)
    }

    /// "Near bottom of viewport" signal; `None` when the signal was ignored
    pub fn near_bottom(&self) -> Option<JoinHandle<()>> {
        let next = lock(&self.state).begin_next_page();
        match next {
            Some(page) => Some(self.spawn_fetch(page)),
            None => {
                debug!("Ignoring scroll signal: end of list or fetch in flight");
                None
            }
        }
    }

    /// Scroll event; fires `near_bottom` when the bottom has been reached
    pub fn on_scroll(
        &self,
        scroll_y: f64,
        visible_height: f64,
        page_height: f64,
    ) -> Option<JoinHandle<()>> {
        if is_scrolled_to_bottom(scroll_y, visible_height, page_height) {
            self.near_bottom()
        } else {
            None
        }
    }

    fn spawn_fetch(&self, page: u32) -> JoinHandle<()> {
        let catalog = self.catalog.clone();
        let state = self.state.clone();
        let genre = self.genre.clone();
        tokio::spawn(async move {
            // failures are already reported by the catalog
            let _ = catalog.fetch_page(page, genre.as_deref()).await;
            lock(&state).settle();
        })
    }

    pub fn snapshot(&self) -> ScrollState {
        lock(&self.state).clone()
    }

    pub fn books(&self) -> Vec<Book> {
        lock(&self.state).books().to_vec()
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.state).is_loading()
    }

    pub fn is_end_of_list(&self) -> bool {
        lock(&self.state).is_end_of_list()
    }
}
