use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::Result;

use super::{goal_state, is_noop, Handshake, State, Transition};

/// Resources held while a component is active.
///
/// `activation_context` is present exactly between a completed `activate`
/// and the next `deactivate`; the diagnostics handle shares that lifetime.
#[derive(Debug)]
pub struct ComponentLifecycleState<C, D> {
    activation_context: Option<Arc<C>>,
    diagnostics: Option<D>,
}

impl<C, D> ComponentLifecycleState<C, D> {
    const fn empty() -> Self {
        Self {
            activation_context: None,
            diagnostics: None,
        }
    }

    pub fn state(&self) -> State {
        if self.activation_context.is_some() {
            State::Active
        } else {
            State::Inactive
        }
    }

    pub fn activation_context(&self) -> Option<&Arc<C>> {
        self.activation_context.as_ref()
    }

    pub fn diagnostics(&self) -> Option<&D> {
        self.diagnostics.as_ref()
    }
}

/// Outcome of one `activate` call.
///
/// `start_state` is read under the same lock that stores the new context, so
/// it is accurate even when the handshake fails.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Activation {
    pub start_state: State,
    pub handshake: Result<Handshake>,
}

/// Host-driven activate/deactivate toggle for a single component.
///
/// The controller owns the lifecycle resources; it never owns dependency
/// slots. The handshake runs after the state lock is released, so a
/// collaborator may call back into the component during registration.
///
/// Deactivation has no unregister counterpart: a registration made during
/// activation outlives it.
#[derive(Debug)]
pub struct LifecycleController<C, D> {
    inner: Mutex<ComponentLifecycleState<C, D>>,
}

impl<C, D> LifecycleController<C, D> {
    /// Create a controller in `Inactive`.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(ComponentLifecycleState::empty()),
        }
    }

    pub fn state(&self) -> State {
        self.lock().state()
    }

    pub fn is_active(&self) -> bool {
        self.state().is_active()
    }

    /// Host context of the current activation, if any.
    pub fn context(&self) -> Option<Arc<C>> {
        self.lock().activation_context.clone()
    }

    /// Diagnostics handle of the current activation, if any.
    pub fn diagnostics(&self) -> Option<D>
    where
        D: Clone,
    {
        self.lock().diagnostics.clone()
    }

    /// Store `context` and `diagnostics`, then run `handshake` once.
    ///
    /// Repeated activation replaces the stored context and repeats the
    /// handshake. A handshake error is returned as-is; the component stays
    /// `Active` and the host decides whether that is fatal.
    pub fn activate<F>(&self, context: Arc<C>, diagnostics: D, handshake: F) -> Activation
    where
        F: FnOnce() -> Result<Handshake>,
    {
        let start_state = {
            let mut inner = self.lock();
            let start_state = inner.state();
            inner.activation_context = Some(context);
            inner.diagnostics = Some(diagnostics);
            debug_assert_eq!(inner.state(), goal_state(start_state, Transition::Activate));
            start_state
        };

        Activation {
            start_state,
            handshake: handshake(),
        }
    }

    /// Release the activation context and diagnostics handle.
    ///
    /// Returns the state the component left, or `None` when it was already
    /// inactive.
    pub fn deactivate(&self) -> Option<State> {
        let released = {
            let mut inner = self.lock();
            let start_state = inner.state();
            if is_noop(start_state, Transition::Deactivate) {
                return None;
            }
            std::mem::replace(&mut *inner, ComponentLifecycleState::empty())
        };

        let start_state = released.state();
        // Dropped outside the lock.
        drop(released);
        Some(start_state)
    }

    fn lock(&self) -> MutexGuard<'_, ComponentLifecycleState<C, D>> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poison) => poison.into_inner(),
        }
    }
}

impl<C, D> Default for LifecycleController<C, D> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, ErrorKind};
    use std::sync::atomic::{AtomicUsize, Ordering};

    type Controller = LifecycleController<&'static str, u32>;

    fn registered() -> Result<Handshake> {
        Ok(Handshake::Registered {
            secondary_bound: true,
        })
    }

    #[test]
    fn starts_inactive_with_no_resources() {
        let c = Controller::new();
        assert_eq!(c.state(), State::Inactive);
        assert!(c.context().is_none());
        assert!(c.diagnostics().is_none());
    }

    #[test]
    fn activate_stores_context_and_runs_handshake_once() {
        let c = Controller::new();
        let calls = AtomicUsize::new(0);

        let activation = c.activate(Arc::new("ctx"), 7, || {
            calls.fetch_add(1, Ordering::SeqCst);
            registered()
        });

        assert_eq!(activation.start_state, State::Inactive);
        assert!(activation.handshake.unwrap().is_registered());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(*c.context().unwrap(), "ctx");
        assert_eq!(c.diagnostics(), Some(7));
        assert!(c.is_active());
    }

    #[test]
    fn repeated_activate_replaces_context_and_repeats_handshake() {
        let c = Controller::new();
        let calls = AtomicUsize::new(0);
        let count = || {
            calls.fetch_add(1, Ordering::SeqCst);
            registered()
        };

        c.activate(Arc::new("first"), 1, count).handshake.unwrap();
        let again = c.activate(Arc::new("second"), 2, count);

        assert_eq!(again.start_state, State::Active);
        assert!(again.handshake.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(*c.context().unwrap(), "second");
    }

    #[test]
    fn deactivate_is_idempotent() {
        let c = Controller::new();
        assert_eq!(c.deactivate(), None);

        c.activate(Arc::new("ctx"), 1, registered).handshake.unwrap();
        assert_eq!(c.deactivate(), Some(State::Active));
        assert_eq!(c.deactivate(), None);

        assert_eq!(c.state(), State::Inactive);
        assert!(c.context().is_none());
        assert!(c.diagnostics().is_none());
    }

    #[test]
    fn handshake_error_propagates_and_leaves_component_active() {
        let c = Controller::new();
        let activation = c.activate(Arc::new("ctx"), 1, || {
            Err(CoreError::registration_failed("primary", "down"))
        });

        assert_eq!(activation.start_state, State::Inactive);
        assert_eq!(activation.handshake.unwrap_err().kind, ErrorKind::Registration);
        assert!(c.is_active());
    }

    #[test]
    fn failed_reactivation_reports_active_start_state() {
        let c = Controller::new();
        c.activate(Arc::new("first"), 1, registered).handshake.unwrap();

        let activation = c.activate(Arc::new("second"), 2, || {
            Err(CoreError::registration_failed("primary", "down"))
        });

        assert_eq!(activation.start_state, State::Active);
        assert!(activation.handshake.is_err());
        assert_eq!(*c.context().unwrap(), "second");
    }

    #[test]
    fn handshake_may_reenter_controller() {
        let c = Controller::new();
        c.activate(Arc::new("ctx"), 3, || {
            assert!(c.is_active());
            assert_eq!(c.diagnostics(), Some(3));
            registered()
        })
        .handshake
        .unwrap();
    }
}
