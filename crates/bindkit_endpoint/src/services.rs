//! Collaborator interfaces consumed by the endpoint.
//!
//! Only the boundary lives here: the query service content and the transport
//! wire format belong to the collaborators themselves.

use bindkit_core::lifecycle::EndpointRegistrar;

use crate::endpoint::EnvironmentEndpoint;

/// Environment data-query service.
///
/// The endpoint never calls into it; a bound instance is only handed to the
/// connector during the activation handshake.
pub trait QueryApi: Send + Sync {}

/// Message-transport connector: the primary collaborator.
///
/// Receives `register_endpoint(endpoint, query_api)` once per activation.
pub type Connector = dyn EndpointRegistrar<EnvironmentEndpoint, dyn QueryApi>;
