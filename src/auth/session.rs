//! Session state: who is logged in
//!
//! The current user lives in a replay-latest subject and is mirrored to the
//! key-value store under [`CURRENT_USER_KEY`], so a restarted client picks
//! the session back up.

use crate::api::gateway::{ApiRequest, GatewayExt, HttpGateway};
use crate::api::models::{ApiResponse, Credentials, User};
use crate::core::error::{ClientError, Result};
use crate::core::navigation::{Navigator, HOME_PATH, LOGIN_PATH};
use crate::core::notify::{Notification, Notifier};
use crate::core::observable::{Observable, Subject};
use crate::core::storage::KeyValueStore;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Storage key holding the JSON-serialized current user
pub const CURRENT_USER_KEY: &str = "currentUser";

pub const LOGIN_SUCCESS_MESSAGE: &str = "Đăng nhập thành công!";
pub const LOGIN_FALLBACK_ERROR: &str = "Có lôi xảy ra xin vui lòng thử lại!";

/// Why a stored session could not be restored
#[derive(Debug, thiserror::Error)]
pub enum RestoreError {
    #[error("failed to read stored session: {0}")]
    Read(#[from] ClientError),

    #[error("stored session is not a valid user record: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Single source of truth for the authenticated user
pub struct SessionService {
    gateway: Arc<dyn HttpGateway>,
    store: Arc<dyn KeyValueStore>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    current_user: Subject<Option<User>>,
}

impl SessionService {
    /// Create the service and restore any persisted session
    pub fn new(
        gateway: Arc<dyn HttpGateway>,
        store: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let service = Self {
            gateway,
            store,
            notifier,
            navigator,
            current_user: Subject::new(None),
        };
        service.restore();
        service
    }

    /// Load the persisted user, leaving the session empty on any failure
    pub fn restore(&self) {
        match self.read_stored_user() {
            Ok(Some(user)) => {
                debug!(user_id = user.id, username = %user.username, "Restored session");
                self.current_user.next(Some(user));
            }
            Ok(None) => debug!("No stored session"),
            Err(e) => debug!(error = %e, "Ignoring unreadable stored session"),
        }
    }

    fn read_stored_user(&self) -> std::result::Result<Option<User>, RestoreError> {
        match self.store.get(CURRENT_USER_KEY)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Authenticate against `POST /auth/login`
    ///
    /// Success publishes and persists the user and navigates home. Failure
    /// shows an error notification and leaves the session untouched. Either
    /// way the returned future settles once the attempt is over.
    pub async fn login(&self, credentials: &Credentials) -> Result<User> {
        let request = ApiRequest::post("auth/login", credentials)?;

        let result: Result<ApiResponse<Option<User>>> = self.gateway.fetch(request).await;
        // a 2xx carrying `data: null` is a failed login, not an anonymous session
        let result = result.and_then(|response| {
            response.data.ok_or_else(|| {
                ClientError::Deserialization("login response carried no user".to_string())
            })
        });
        match result {
            Ok(user) => {
                info!(user_id = user.id, username = %user.username, "Logged in");

                self.current_user.next(Some(user.clone()));
                self.notifier
                    .notify(Notification::success(LOGIN_SUCCESS_MESSAGE, "Success"));
                self.persist(&user);
                self.navigator.navigate(HOME_PATH);
                Ok(user)
            }
            Err(e) => {
                warn!(username = %credentials.username, error = %e, "Login failed");
                let message = e.server_message().unwrap_or(LOGIN_FALLBACK_ERROR);
                self.notifier.notify(Notification::error(message, "Error"));
                Err(e)
            }
        }
    }

    fn persist(&self, user: &User) {
        let written = serde_json::to_string(user)
            .map_err(|e| ClientError::Serialization(e.to_string()))
            .and_then(|raw| self.store.set(CURRENT_USER_KEY, &raw));
        if let Err(e) = written {
            warn!(error = %e, "Failed to persist session");
        }
    }

    /// Clear the session and go to the login screen
    pub fn logout(&self) {
        self.current_user.next(None);
        if let Err(e) = self.store.remove(CURRENT_USER_KEY) {
            warn!(error = %e, "Failed to remove stored session");
        }
        self.navigator.navigate(LOGIN_PATH);
        info!("Logged out");
    }

    /// Replay-latest stream of the current user
    pub fn current_user(&self) -> Observable<Option<User>> {
        self.current_user.as_observable()
    }

    pub fn current_user_value(&self) -> Option<User> {
        self.current_user.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::Role;
    use crate::core::notify::Severity;
    use crate::core::storage::MemoryStore;
    use crate::test_support::{http_error, FakeGateway, RecordingNavigator, RecordingNotifier};
    use serde_json::json;
    use std::sync::Mutex;

    struct Harness {
        gateway: Arc<FakeGateway>,
        store: Arc<MemoryStore>,
        notifier: Arc<RecordingNotifier>,
        navigator: Arc<RecordingNavigator>,
    }

    impl Harness {
        fn new(gateway: FakeGateway) -> Self {
            Self {
                gateway: Arc::new(gateway),
                store: Arc::new(MemoryStore::new()),
                notifier: Arc::new(RecordingNotifier::default()),
                navigator: Arc::new(RecordingNavigator::default()),
            }
        }

        fn service(&self) -> SessionService {
            SessionService::new(
                self.gateway.clone(),
                self.store.clone(),
                self.notifier.clone(),
                self.navigator.clone(),
            )
        }
    }

    fn admin() -> User {
        User {
            id: 1,
            username: "admin".into(),
            password: "Admin@123".into(),
            role: Role::Admin,
        }
    }

    fn accepting_gateway() -> FakeGateway {
        FakeGateway::new(|_| {
            Ok(json!({
                "data": { "id": 1, "username": "admin", "password": "Admin@123", "role": "admin" }
            }))
        })
    }

    #[test]
    fn test_restore_valid_record() {
        let h = Harness::new(accepting_gateway());
        h.store
            .set(CURRENT_USER_KEY, &serde_json::to_string(&admin()).unwrap())
            .unwrap();

        let service = h.service();

        assert_eq!(service.current_user_value(), Some(admin()));
    }

    #[test]
    fn test_restore_corrupt_or_absent_record() {
        let h = Harness::new(accepting_gateway());
        assert_eq!(h.service().current_user_value(), None);

        h.store.set(CURRENT_USER_KEY, "{not json").unwrap();
        assert_eq!(h.service().current_user_value(), None);

        h.store.set(CURRENT_USER_KEY, r#"{"id":"x"}"#).unwrap();
        assert_eq!(h.service().current_user_value(), None);
    }

    #[tokio::test]
    async fn test_successful_login() {
        let h = Harness::new(accepting_gateway());
        let service = h.service();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let _sub = service
            .current_user()
            .subscribe(move |u: &Option<User>| sink.lock().unwrap().push(u.clone()));

        let user = service
            .login(&Credentials::new("admin", "Admin@123"))
            .await
            .unwrap();

        assert_eq!(user, admin());
        assert_eq!(*seen.lock().unwrap(), vec![None, Some(admin())]);
        let stored: User =
            serde_json::from_str(&h.store.get(CURRENT_USER_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(stored, admin());
        assert_eq!(h.navigator.paths(), vec![HOME_PATH.to_string()]);
        assert_eq!(h.notifier.last().unwrap().severity, Severity::Success);

        let requests = h.gateway.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, "auth/login");
        assert_eq!(
            requests[0].body,
            Some(json!({ "username": "admin", "password": "Admin@123" }))
        );
    }

    #[tokio::test]
    async fn test_failed_login_with_server_message() {
        let h = Harness::new(FakeGateway::new(|_| {
            Err(http_error(400, Some("Wrong username or password")))
        }));
        let service = h.service();

        let result = service.login(&Credentials::new("admin", "Wrong@123")).await;

        assert!(result.is_err());
        assert_eq!(service.current_user_value(), None);
        assert_eq!(h.store.get(CURRENT_USER_KEY).unwrap(), None);
        assert!(h.navigator.paths().is_empty());
        let note = h.notifier.last().unwrap();
        assert_eq!(note.severity, Severity::Error);
        assert_eq!(note.body, "Wrong username or password");
    }

    #[tokio::test]
    async fn test_failed_login_falls_back_to_generic_message() {
        let h = Harness::new(FakeGateway::new(|_| {
            Err(ClientError::Network("connection refused".into()))
        }));
        let service = h.service();

        assert!(service.login(&Credentials::new("a", "b")).await.is_err());
        assert_eq!(h.notifier.last().unwrap().body, LOGIN_FALLBACK_ERROR);
    }

    #[tokio::test]
    async fn test_login_without_user_is_a_failure() {
        let h = Harness::new(FakeGateway::new(|_| Ok(json!({ "data": null }))));
        let service = h.service();

        let err = service
            .login(&Credentials::new("admin", "Admin@123"))
            .await
            .unwrap_err();

        assert_eq!(err.error_type(), "Deserialization");
        assert_eq!(service.current_user_value(), None);
        assert_eq!(h.store.get(CURRENT_USER_KEY).unwrap(), None);
        assert!(h.navigator.paths().is_empty());
        let note = h.notifier.last().unwrap();
        assert_eq!(note.severity, Severity::Error);
        assert_eq!(note.body, LOGIN_FALLBACK_ERROR);
    }

    #[tokio::test]
    async fn test_failed_login_keeps_existing_session() {
        let h = Harness::new(FakeGateway::new(|_| Err(http_error(500, None))));
        h.store
            .set(CURRENT_USER_KEY, &serde_json::to_string(&admin()).unwrap())
            .unwrap();
        let service = h.service();

        assert!(service.login(&Credentials::new("x", "y")).await.is_err());
        assert_eq!(service.current_user_value(), Some(admin()));
    }

    #[tokio::test]
    async fn test_logout() {
        let h = Harness::new(accepting_gateway());
        let service = h.service();
        service
            .login(&Credentials::new("admin", "Admin@123"))
            .await
            .unwrap();

        service.logout();

        assert_eq!(service.current_user_value(), None);
        assert_eq!(h.store.get(CURRENT_USER_KEY).unwrap(), None);
        assert_eq!(
            h.navigator.paths(),
            vec![HOME_PATH.to_string(), LOGIN_PATH.to_string()]
        );
    }

    #[test]
    fn test_logout_without_session() {
        let h = Harness::new(accepting_gateway());
        let service = h.service();
        service.logout();
        assert_eq!(service.current_user_value(), None);
        assert_eq!(h.navigator.paths(), vec![LOGIN_PATH.to_string()]);
    }
}
