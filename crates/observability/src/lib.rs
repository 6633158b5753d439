//! Logging setup shared by binaries.

/// Tracing configuration (filter, formatter).
pub mod tracing;

/// Initialize process-wide logging.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}
