//! Application context
//!
//! Everything the screens need is built once at startup and shared by
//! reference. Nothing lives in globals; dropping the context drops it all.

use crate::api::{ErrorInterceptor, HttpGateway, ReqwestGateway};
use crate::auth::SessionService;
use crate::books::CatalogService;
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::navigation::{Navigator, Router};
use crate::core::notify::{Notifier, TracingNotifier};
use crate::core::storage::{FileStore, KeyValueStore};
use std::sync::Arc;
use tracing::info;

pub struct AppContext {
    pub router: Arc<Router>,
    pub notifier: Arc<dyn Notifier>,
    pub store: Arc<dyn KeyValueStore>,
    pub gateway: Arc<dyn HttpGateway>,
    pub session: Arc<SessionService>,
    pub catalog: Arc<CatalogService>,
}

impl AppContext {
    /// Wire up the real gateway, file-backed storage and tracing notifier
    pub fn new(config: &Config) -> Result<Self> {
        let router = Arc::new(Router::new());
        let notifier: Arc<dyn Notifier> = Arc::new(TracingNotifier);
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(&config.storage.path));

        let gateway: Arc<dyn HttpGateway> = Arc::new(ErrorInterceptor::new(
            ReqwestGateway::new(&config.api)?,
            router.clone(),
            notifier.clone(),
        ));

        info!(
            base_url = %config.api.base_url,
            storage = ?config.storage.path,
            "Application context ready"
        );

        Ok(Self::from_parts(router, notifier, store, gateway))
    }

    /// Assemble a context from already-built collaborators
    pub fn from_parts(
        router: Arc<Router>,
        notifier: Arc<dyn Notifier>,
        store: Arc<dyn KeyValueStore>,
        gateway: Arc<dyn HttpGateway>,
    ) -> Self {
        let navigator: Arc<dyn Navigator> = router.clone();
        let session = Arc::new(SessionService::new(
            gateway.clone(),
            store.clone(),
            notifier.clone(),
            navigator,
        ));
        let catalog = Arc::new(CatalogService::new(gateway.clone(), notifier.clone()));

        Self {
            router,
            notifier,
            store,
            gateway,
            session,
            catalog,
        }
    }
}
