//! bindkit_core: host-agnostic primitives for dynamically bound components.
//!
//! Design goals:
//! - Pure, testable logic (no host runtime deps).
//! - Explicit types; no macro wizardry.
//! - Small, stable public API surface.

pub mod error;

/// Atomically-updatable dependency reference holders.
pub mod slot;

/// Activation toggle + registration handshake.
pub mod lifecycle;

pub use slot::DependencySlot;
