use std::borrow::Cow;
use std::fmt;
use thiserror::Error;

/// Convenient result alias for bindkit_core.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Log/handling importance. Maps onto logging levels in the endpoint layer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub enum Severity {
    Debug,
    Warn,
    Error,
}

/// Where an error came from (helps triage and routing).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Domain {
    Binding,
    Lifecycle,
    Collaborator,
    Config,
    Other,
}

/// Stable error "kind" for matching/branching.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ErrorKind {
    InvalidArgument,
    Registration,
    /// An unbind named an instance the slot no longer holds.
    StaleReference,
    Other,
}

/// Optional structured payload for rich context without forcing allocation.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Payload {
    None,

    /// Generic key/value context.
    Context {
        key: &'static str,
        value: Cow<'static, str>,
    },

    /// The dependency slot an error relates to.
    Slot { slot: &'static str },
}

/// The one error type that crosses module boundaries in bindkit.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
#[error("{severity:?}: {message}")]
pub struct CoreError {
    pub domain: Domain,
    pub kind: ErrorKind,
    pub severity: Severity,
    pub message: Cow<'static, str>,
    pub payload: Payload,
}

impl CoreError {
    #[inline]
    pub fn debug() -> ErrB {
        ErrB::new(Severity::Debug)
    }
    #[inline]
    pub fn warn() -> ErrB {
        ErrB::new(Severity::Warn)
    }
    #[inline]
    pub fn error() -> ErrB {
        ErrB::new(Severity::Error)
    }

    /// A primary collaborator rejected the activation handshake.
    ///
    /// Collaborators return this from `register_endpoint`; the endpoint hands it
    /// back to whoever called `activate`.
    pub fn registration_failed(slot: &'static str, detail: impl Into<Cow<'static, str>>) -> Self {
        CoreError::error()
            .domain(Domain::Collaborator)
            .kind(ErrorKind::Registration)
            .msg(detail)
            .payload(Payload::Slot { slot })
            .build()
    }

    /// An unbind that arrived after its instance was replaced.
    ///
    /// Not returned to the host; the endpoint only logs it.
    pub fn stale_unbind(slot: &'static str) -> Self {
        CoreError::debug()
            .domain(Domain::Binding)
            .kind(ErrorKind::StaleReference)
            .msgf(format_args!("stale unbind ignored on {slot}"))
            .payload(Payload::Slot { slot })
            .build()
    }

    /// Construct an invalid-argument error for a configuration value.
    pub fn invalid_config(key: &'static str, value: impl Into<Cow<'static, str>>) -> Self {
        CoreError::warn()
            .domain(Domain::Config)
            .kind(ErrorKind::InvalidArgument)
            .msg("invalid configuration value")
            .payload(Payload::Context {
                key,
                value: value.into(),
            })
            .build()
    }
}

/// Fluent builder (takes self, returns Self).
/// Defaults:
/// - domain = Other
/// - kind = Other
/// - message = ""
/// - payload = None
#[derive(Debug, Clone)]
pub struct ErrB {
    domain: Domain,
    kind: ErrorKind,
    severity: Severity,
    message: Cow<'static, str>,
    payload: Payload,
}

impl ErrB {
    #[inline]
    fn new(severity: Severity) -> Self {
        Self {
            domain: Domain::Other,
            kind: ErrorKind::Other,
            severity,
            message: Cow::Borrowed(""),
            payload: Payload::None,
        }
    }

    #[inline]
    pub fn domain(mut self, d: Domain) -> Self {
        self.domain = d;
        self
    }

    #[inline]
    pub fn kind(mut self, k: ErrorKind) -> Self {
        self.kind = k;
        self
    }

    #[inline]
    pub fn msg(mut self, m: impl Into<Cow<'static, str>>) -> Self {
        self.message = m.into();
        self
    }

    /// Formatting-friendly message setter.
    #[inline]
    pub fn msgf(mut self, args: fmt::Arguments<'_>) -> Self {
        self.message = Cow::Owned(args.to_string());
        self
    }

    /// Only one payload: this replaces any previous payload.
    #[inline]
    pub fn payload(mut self, p: Payload) -> Self {
        self.payload = p;
        self
    }

    #[inline]
    pub fn build(self) -> CoreError {
        CoreError {
            domain: self.domain,
            kind: self.kind,
            severity: self.severity,
            message: self.message,
            payload: self.payload,
        }
    }
}

impl From<ErrB> for CoreError {
    fn from(b: ErrB) -> Self {
        b.build()
    }
}
