use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Operational state shared with the health, readiness and metrics routes.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// State handed to the form routes: the shared remote API client.
pub struct PortalState<A> {
    pub api: Arc<A>,
}

impl<A> PortalState<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }
}

impl<A> Clone for PortalState<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
        }
    }
}
