//! Stand-in collaborators the harness binds into the endpoint.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use bindkit_core::error::Result;
use bindkit_core::lifecycle::EndpointRegistrar;
use bindkit_endpoint::services::QueryApi;
use bindkit_endpoint::EnvironmentEndpoint;

/// Query API with a fixed identity and no behavior.
#[derive(Debug)]
pub struct StaticQueryApi {
    pub generation: usize,
}

impl QueryApi for StaticQueryApi {}

/// Connector that counts registrations instead of opening a transport.
#[derive(Debug, Default)]
pub struct RecordingConnector {
    registrations: AtomicUsize,
    with_query_api: AtomicUsize,
}

impl RecordingConnector {
    pub fn registrations(&self) -> usize {
        self.registrations.load(Ordering::SeqCst)
    }

    pub fn registrations_with_query_api(&self) -> usize {
        self.with_query_api.load(Ordering::SeqCst)
    }
}

impl EndpointRegistrar<EnvironmentEndpoint, dyn QueryApi> for RecordingConnector {
    fn register_endpoint(
        &self,
        endpoint: Arc<EnvironmentEndpoint>,
        query_api: Option<Arc<dyn QueryApi>>,
    ) -> Result<()> {
        self.registrations.fetch_add(1, Ordering::SeqCst);
        if query_api.is_some() {
            self.with_query_api.fetch_add(1, Ordering::SeqCst);
        }
        tracing::debug!(endpoint = endpoint.name(), "connector accepted endpoint");
        Ok(())
    }
}
