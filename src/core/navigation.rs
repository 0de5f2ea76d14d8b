//! Screen navigation
//!
//! [`Navigator`] is the side channel services use to change the current
//! screen. [`Router`] is the in-memory implementation: it resolves a path to
//! a [`Route`] and publishes the result.

use crate::core::observable::{Observable, Subject};
use serde::Serialize;

/// Path of the login screen
pub const LOGIN_PATH: &str = "auth/login";

/// Path of the home screen (the book list)
pub const HOME_PATH: &str = "";

/// "Change current screen to path P"
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Screens known to the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Route {
    Login,
    BookList,
    BookDetail,
    NotFound,
}

impl Route {
    /// Resolve a path; surrounding slashes are ignored
    pub fn resolve(path: &str) -> Self {
        match path.trim_matches('/') {
            "auth" | "auth/login" => Route::Login,
            "" | "books" => Route::BookList,
            "books/detail" | "detail" => Route::BookDetail,
            _ => Route::NotFound,
        }
    }
}

/// Where the application currently is
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub path: String,
    pub route: Route,
}

impl Location {
    fn at(path: &str) -> Self {
        let path = path.trim_matches('/').to_string();
        let route = Route::resolve(&path);
        Self { path, route }
    }
}

/// In-memory router
pub struct Router {
    location: Subject<Location>,
}

impl Router {
    pub fn new() -> Self {
        Self::starting_at(HOME_PATH)
    }

    pub fn starting_at(path: &str) -> Self {
        Self {
            location: Subject::new(Location::at(path)),
        }
    }

    pub fn current(&self) -> Location {
        self.location.value()
    }

    pub fn location(&self) -> Observable<Location> {
        self.location.as_observable()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator for Router {
    fn navigate(&self, path: &str) {
        let location = Location::at(path);
        tracing::debug!(path = %location.path, route = ?location.route, "Navigating");
        self.location.next(location);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_route_resolution() {
        assert_eq!(Route::resolve(""), Route::BookList);
        assert_eq!(Route::resolve("/"), Route::BookList);
        assert_eq!(Route::resolve("books"), Route::BookList);
        assert_eq!(Route::resolve("books/detail"), Route::BookDetail);
        assert_eq!(Route::resolve("auth/login"), Route::Login);
        assert_eq!(Route::resolve("/auth/login"), Route::Login);
        assert_eq!(Route::resolve("auth"), Route::Login);
        assert_eq!(Route::resolve("admin/settings"), Route::NotFound);
    }

    #[test]
    fn test_router_publishes_locations() {
        let router = Router::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let _sub = router
            .location()
            .subscribe(move |loc: &Location| sink.lock().unwrap().push(loc.route));

        router.navigate(LOGIN_PATH);
        router.navigate("/nowhere");

        assert_eq!(
            *seen.lock().unwrap(),
            vec![Route::BookList, Route::Login, Route::NotFound]
        );
        assert_eq!(router.current().path, "nowhere");
    }
}
