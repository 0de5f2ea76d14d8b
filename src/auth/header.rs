//! Header: shows who is logged in and offers logout

use crate::api::models::User;
use crate::auth::session::SessionService;
use crate::core::observable::Subscription;
use std::sync::{Arc, Mutex, PoisonError};

pub struct HeaderView {
    session: Arc<SessionService>,
    current_user: Arc<Mutex<Option<User>>>,
    _subscription: Subscription,
}

impl HeaderView {
    pub fn new(session: Arc<SessionService>) -> Self {
        let current_user = Arc::new(Mutex::new(None));
        let sink = current_user.clone();
        let subscription = session.current_user().subscribe(move |user: &Option<User>| {
            *sink.lock().unwrap_or_else(PoisonError::into_inner) = user.clone();
        });

        Self {
            session,
            current_user,
            _subscription: subscription,
        }
    }

    pub fn current_user(&self) -> Option<User> {
        self.current_user
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn logout(&self) {
        self.session.logout();
    }
}
