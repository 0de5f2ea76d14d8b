//! Book catalog
//!
//! This module provides:
//! - The catalog holder (latest page, single-book CRUD)
//! - The infinite-scroll list controller

pub mod infinite_scroll;
pub mod service;

pub use infinite_scroll::{is_scrolled_to_bottom, BookList, ScrollState};
pub use service::{BookPage, CatalogService};
