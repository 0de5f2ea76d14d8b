//! Core application layer
//!
//! This module provides the building blocks shared by every feature:
//! - Replay-latest subjects for state publication
//! - Configuration management
//! - Structured logging system
//! - Error handling and type system
//! - Durable key-value storage
//! - Notification and navigation side channels

pub mod config;
pub mod error;
pub mod logging;
pub mod navigation;
pub mod notify;
pub mod observable;
pub mod storage;

pub use config::Config;
pub use error::{ClientError, Result};
pub use logging::Logger;
pub use navigation::{Location, Navigator, Route, Router, HOME_PATH, LOGIN_PATH};
pub use notify::{Notification, Notifier, Severity, TracingNotifier};
pub use observable::{Observable, Subject, Subscription};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
