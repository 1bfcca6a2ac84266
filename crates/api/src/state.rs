use std::sync::Arc;

use cityfolio_core::auth::TokenConfig;
use cityfolio_core::media::MediaHost;
use cityfolio_core::store::ContentStore;

use crate::config::AppConfig;

/// Shared application state, passed to all handlers via Axum's `State` extractor.
/// Wrapped in `Arc` so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    store: Arc<dyn ContentStore>,
    media: Arc<dyn MediaHost>,
    config: AppConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn ContentStore>, media: Arc<dyn MediaHost>, config: AppConfig) -> Self {
        Self {
            inner: Arc::new(InnerState {
                store,
                media,
                config,
            }),
        }
    }

    pub fn store(&self) -> &dyn ContentStore {
        self.inner.store.as_ref()
    }

    pub fn media(&self) -> &dyn MediaHost {
        self.inner.media.as_ref()
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn tokens(&self) -> &TokenConfig {
        &self.inner.config.token
    }
}
