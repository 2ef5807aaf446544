//! Tracing/logging setup shared by storefront binaries and tests.

pub mod logging;

pub use logging::{LogConfig, LogFormat};

/// Initialize process-wide observability (tracing/logging).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init(config: &LogConfig) {
    logging::init(config);
}
