//! Shared application state.
//!
//! Built once in `main` and cloned into every handler; holds the store and
//! metrics handles so nothing lives in module-level globals.

use std::sync::Arc;

use crate::db::TodoStore;
use crate::metrics::Metrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<dyn TodoStore>,
    metrics: Metrics,
}

impl AppState {
    pub fn new(store: Arc<dyn TodoStore>, metrics: Metrics) -> Self {
        Self {
            inner: Arc::new(AppStateInner { store, metrics }),
        }
    }

    pub fn store(&self) -> &dyn TodoStore {
        self.inner.store.as_ref()
    }

    pub fn metrics(&self) -> &Metrics {
        &self.inner.metrics
    }
}
