use std::collections::BTreeMap;

use tracing::Span;

/// Activation context supplied by the host runtime.
///
/// Stored by the endpoint for the duration of one activation and dropped on
/// deactivation.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HostContext {
    component_id: String,
    properties: BTreeMap<String, String>,
}

impl HostContext {
    pub fn new(component_id: impl Into<String>) -> Self {
        Self {
            component_id: component_id.into(),
            properties: BTreeMap::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn component_id(&self) -> &str {
        &self.component_id
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn properties(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Per-activation diagnostics handle.
///
/// Wraps a `tracing` span named after the endpoint and the host component so
/// records emitted while active are attributable. Created on activation,
/// released on deactivation.
#[derive(Debug, Clone)]
pub struct Diagnostics {
    span: Span,
}

impl Diagnostics {
    pub fn new(endpoint: &str, context: &HostContext) -> Self {
        let span = tracing::info_span!(
            "endpoint",
            name = %endpoint,
            component = %context.component_id()
        );
        Self { span }
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Run `f` inside the diagnostics span.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        self.span.in_scope(f)
    }
}
