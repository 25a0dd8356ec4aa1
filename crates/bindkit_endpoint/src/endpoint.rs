use std::sync::Arc;

use bindkit_core::error::{CoreError, Domain, ErrorKind, Result};
use bindkit_core::lifecycle::{goal_state, handshake, Handshake, LifecycleController, State, Transition};
use bindkit_core::DependencySlot;
use tokio::sync::broadcast;

use crate::error::log_core_error;
use crate::events::EndpointEvent;
use crate::host::{Diagnostics, HostContext};
use crate::services::{Connector, QueryApi};

/// Slot name of the environment query API.
pub const QUERY_API_SLOT: &str = "query_api";
/// Slot name of the message-transport connector (primary collaborator).
pub const CONNECTOR_SLOT: &str = "connector";

const EVENT_CAPACITY: usize = 32;

/// Endpoint exposing environment information over a message connector.
///
/// Responsibilities:
/// - Hold the current query API and connector bindings
/// - Register itself with the connector when the host activates it
/// - Hold the host context + diagnostics while active
/// - Publish binding and lifecycle events
///
/// Every method is synchronous and may be called from any host thread. Share
/// the endpoint as `Arc<EnvironmentEndpoint>`; `activate` needs the `Arc` to
/// hand itself to the connector.
pub struct EnvironmentEndpoint {
    name: String,
    query_api: DependencySlot<dyn QueryApi>,
    connector: DependencySlot<Connector>,
    lifecycle: LifecycleController<HostContext, Diagnostics>,
    events: broadcast::Sender<EndpointEvent>,
}

impl EnvironmentEndpoint {
    /// Create an unbound, inactive endpoint.
    pub fn new(name: impl Into<String>) -> Result<Arc<Self>> {
        let name = name.into();
        if name.is_empty() {
            return Err(CoreError::error()
                .domain(Domain::Lifecycle)
                .kind(ErrorKind::InvalidArgument)
                .msg("endpoint name must not be empty")
                .build());
        }

        let (events, _rx) = broadcast::channel(EVENT_CAPACITY);

        Ok(Arc::new(Self {
            name,
            query_api: DependencySlot::new(QUERY_API_SLOT),
            connector: DependencySlot::new(CONNECTOR_SLOT),
            lifecycle: LifecycleController::new(),
            events,
        }))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> State {
        self.lifecycle.state()
    }

    pub fn is_active(&self) -> bool {
        self.lifecycle.is_active()
    }

    /// Host context of the current activation.
    pub fn context(&self) -> Option<Arc<HostContext>> {
        self.lifecycle.context()
    }

    pub fn query_api(&self) -> Option<Arc<dyn QueryApi>> {
        self.query_api.get()
    }

    pub fn connector(&self) -> Option<Arc<Connector>> {
        self.connector.get()
    }

    /// Subscribe to binding and lifecycle events.
    pub fn subscribe_events(&self) -> broadcast::Receiver<EndpointEvent> {
        self.events.subscribe()
    }

    // ---------------- Lifecycle ----------------

    /// Host activation.
    ///
    /// Stores `context`, then registers with the connector if one is bound,
    /// passing the current query API (or `None`). A missing connector skips
    /// registration without error. A connector error is returned unchanged;
    /// the endpoint is still considered active.
    pub fn activate(self: &Arc<Self>, context: HostContext) -> Result<Handshake> {
        let diagnostics = Diagnostics::new(&self.name, &context);
        let span = diagnostics.span().clone();
        let _entered = span.enter();

        let this = Arc::clone(self);
        let activation = self.lifecycle.activate(Arc::new(context), diagnostics, move || {
            tracing::info!("activated");
            handshake(Arc::clone(&this), &this.connector, &this.query_api)
        });

        let outcome = match activation.handshake {
            Ok(outcome) => outcome,
            Err(err) => {
                log_core_error(&err);
                self.emit_transition(Transition::Activate, activation.start_state, None);
                return Err(err);
            }
        };

        match outcome {
            Handshake::Registered { secondary_bound } => {
                tracing::info!(query_api_bound = secondary_bound, "registered with connector");
            }
            Handshake::Skipped { missing } => {
                tracing::info!(slot = missing, "registration skipped; dependency not bound");
            }
        }

        self.emit_transition(Transition::Activate, activation.start_state, Some(outcome));
        Ok(outcome)
    }

    /// Host deactivation.
    ///
    /// Drops the host context and diagnostics. Bindings are untouched and the
    /// connector is not notified. Returns `false` if already inactive.
    pub fn deactivate(&self) -> bool {
        if let Some(diagnostics) = self.lifecycle.diagnostics() {
            diagnostics.in_scope(|| tracing::info!("deactivating"));
        }

        match self.lifecycle.deactivate() {
            Some(start_state) => {
                self.emit_transition(Transition::Deactivate, start_state, None);
                true
            }
            None => {
                tracing::debug!(endpoint = %self.name, "deactivate ignored; already inactive");
                false
            }
        }
    }

    // ---------------- Bind / unbind ----------------

    /// Bind the environment query API.
    pub fn added_query_api(&self, api: Arc<dyn QueryApi>) {
        self.bind(&self.query_api, api);
    }

    /// Unbind the environment query API if it is still the bound instance.
    pub fn removed_query_api(&self, api: &Arc<dyn QueryApi>) -> bool {
        self.unbind(&self.query_api, api)
    }

    /// Bind the message connector.
    pub fn added_connector(&self, connector: Arc<Connector>) {
        self.bind(&self.connector, connector);
    }

    /// Unbind the message connector if it is still the bound instance.
    pub fn removed_connector(&self, connector: &Arc<Connector>) -> bool {
        self.unbind(&self.connector, connector)
    }

    fn bind<T: ?Sized>(&self, slot: &DependencySlot<T>, value: Arc<T>) {
        slot.set(value);
        tracing::debug!(endpoint = %self.name, slot = slot.name(), "bound");
        self.emit(EndpointEvent::Bound { slot: slot.name() });
    }

    fn unbind<T: ?Sized>(&self, slot: &DependencySlot<T>, value: &Arc<T>) -> bool {
        if slot.clear_if_equal(value) {
            tracing::debug!(endpoint = %self.name, slot = slot.name(), "unbound");
            self.emit(EndpointEvent::Unbound { slot: slot.name() });
            true
        } else {
            log_core_error(&CoreError::stale_unbind(slot.name()));
            self.emit(EndpointEvent::StaleUnbind { slot: slot.name() });
            false
        }
    }

    fn emit_transition(
        &self,
        transition: Transition,
        start_state: State,
        handshake: Option<Handshake>,
    ) {
        let goal = goal_state(start_state, transition);
        tracing::debug!(
            endpoint = %self.name,
            transition = transition.label(),
            from = start_state.label(),
            to = goal.label(),
            "transition"
        );
        self.emit(EndpointEvent::Transitioned {
            transition,
            start_state,
            goal_state: goal,
            handshake,
        });
    }

    // No receivers (or lagging receivers) must not affect the caller.
    fn emit(&self, event: EndpointEvent) {
        let _ = self.events.send(event);
    }
}

impl std::fmt::Debug for EnvironmentEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvironmentEndpoint")
            .field("name", &self.name)
            .field("state", &self.state())
            .field("query_api", &self.query_api)
            .field("connector", &self.connector)
            .finish()
    }
}
