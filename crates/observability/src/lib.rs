//! Shared tracing/logging setup for stockyard services.

/// Initialize process-wide logging.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Tracing configuration (filters, layers).
pub mod tracing;
