use bindkit_core::error::{CoreError, Payload, Severity};

/// Emit `err` through `tracing` at the level matching its severity.
pub fn log_core_error(err: &CoreError) {
    let slot = match err.payload {
        Payload::Slot { slot } => slot,
        _ => "-",
    };

    match err.severity {
        Severity::Debug => tracing::debug!(slot, "{err}"),
        Severity::Warn => tracing::warn!(slot, "{err}"),
        Severity::Error => tracing::error!(slot, "{err}"),
    }
}
