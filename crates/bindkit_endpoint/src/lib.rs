//! bindkit_endpoint
//!
//! Environment endpoint component for a host runtime that binds collaborator
//! services dynamically. Slot and lifecycle semantics live in `bindkit_core`;
//! this crate wires them to the concrete query API and connector slots, the
//! host context, diagnostics and the event stream.

pub mod error;
pub mod events;
pub mod host;
pub mod services;

mod endpoint;
pub use endpoint::{EnvironmentEndpoint, CONNECTOR_SLOT, QUERY_API_SLOT};

// Re-export core types that endpoint users will commonly need
pub use bindkit_core::error::{CoreError, Result};
pub use bindkit_core::lifecycle::{EndpointRegistrar, Handshake, State, Transition};
