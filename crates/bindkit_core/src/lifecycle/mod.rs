//! bindkit_core::lifecycle
//!
//! Host-agnostic activation semantics for a component with dependency slots.
//!
//! Key ideas:
//! - Two stable states, `Inactive` and `Active`, toggled by host calls
//! - `activate` snapshots the slots once and performs at most one handshake
//! - `deactivate` releases lifecycle resources only; slots follow bind/unbind
//! - Redundant calls are absorbed, never rejected

mod controller;
mod engine;
mod handshake;
mod state;
mod transition;

pub use controller::{Activation, ComponentLifecycleState, LifecycleController};
pub use engine::{goal_state, is_noop};
pub use handshake::{handshake, EndpointRegistrar, Handshake};
pub use state::State;
pub use transition::Transition;
