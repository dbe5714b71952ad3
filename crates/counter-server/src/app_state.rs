//! Shared application state for the counter server.

use std::sync::Arc;

use counter_core::Counter;

use crate::obs::metrics::ServiceMetrics;

#[derive(Clone, Default)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

#[derive(Default)]
struct AppStateInner {
    counter: Counter,
    metrics: ServiceMetrics,
}

impl AppState {
    /// Fresh state with the counter at zero.
    pub fn new() -> Self {
        Self::with_counter(Counter::new())
    }

    /// State around an existing counter (e.g. one already at a boundary).
    pub fn with_counter(counter: Counter) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                counter,
                metrics: ServiceMetrics::default(),
            }),
        }
    }

    pub fn counter(&self) -> &Counter {
        &self.inner.counter
    }

    pub fn metrics(&self) -> &ServiceMetrics {
        &self.inner.metrics
    }

    pub fn set_draining(&self) {
        self.inner.metrics.set_draining();
    }

    pub fn is_draining(&self) -> bool {
        self.inner.metrics.is_draining()
    }
}
