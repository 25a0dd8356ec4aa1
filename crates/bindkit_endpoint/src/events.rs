//! Endpoint event stream.
//!
//! Published on a `tokio::sync::broadcast` channel so binding and lifecycle
//! calls never block on a slow observer; lagging receivers drop old events.

use bindkit_core::lifecycle::{Handshake, State, Transition};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndpointEvent {
    /// A collaborator was stored in `slot`.
    Bound { slot: &'static str },

    /// The collaborator in `slot` was removed.
    Unbound { slot: &'static str },

    /// An unbind named an instance `slot` no longer holds; nothing changed.
    StaleUnbind { slot: &'static str },

    /// A lifecycle call completed.
    ///
    /// `handshake` is `None` for deactivation and for an activation whose
    /// registration call failed.
    Transitioned {
        transition: Transition,
        start_state: State,
        goal_state: State,
        handshake: Option<Handshake>,
    },
}
