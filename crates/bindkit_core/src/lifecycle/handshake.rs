use std::sync::Arc;

use crate::error::Result;
use crate::slot::DependencySlot;

/// Registration entry point of a primary collaborator.
///
/// Invoked once per activation with the activating component and the
/// snapshot of its secondary dependency (`None` when that slot was empty).
/// Errors are not handled by bindkit; they go back to whoever called
/// `activate`.
///
/// The component keeps the registrar bound in its primary slot, and
/// deactivation never clears that slot. An implementation that stores the
/// `Arc<E>` it is handed therefore forms a reference cycle that outlives
/// every host call; keep `Arc::downgrade(&endpoint)` instead and upgrade it
/// when needed.
pub trait EndpointRegistrar<E: ?Sized, S: ?Sized>: Send + Sync {
    fn register_endpoint(&self, endpoint: Arc<E>, secondary: Option<Arc<S>>) -> Result<()>;
}

/// Outcome of the activation handshake.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Handshake {
    /// The primary collaborator accepted the registration.
    Registered { secondary_bound: bool },

    /// The primary slot was empty; no collaborator was called.
    Skipped { missing: &'static str },
}

impl Handshake {
    pub const fn is_registered(self) -> bool {
        matches!(self, Handshake::Registered { .. })
    }
}

/// Snapshot both slots once and, if the primary is bound, register `endpoint`
/// with it.
///
/// No waiting or retry: a slot that is empty at this instant stays empty for
/// this handshake.
pub fn handshake<E, P, S>(
    endpoint: Arc<E>,
    primary: &DependencySlot<P>,
    secondary: &DependencySlot<S>,
) -> Result<Handshake>
where
    E: ?Sized,
    P: EndpointRegistrar<E, S> + ?Sized,
    S: ?Sized,
{
    let primary_ref = primary.get();
    let secondary_ref = secondary.get();

    let Some(registrar) = primary_ref else {
        return Ok(Handshake::Skipped {
            missing: primary.name(),
        });
    };

    let secondary_bound = secondary_ref.is_some();
    registrar.register_endpoint(endpoint, secondary_ref)?;

    Ok(Handshake::Registered { secondary_bound })
}
