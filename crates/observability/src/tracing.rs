//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset: catalog derivations at `debug`, the rest at `info`.
pub const DEFAULT_FILTER: &str = "info,catalogsync_products=debug,catalogsync_tax=debug";

/// Filter from `RUST_LOG`, or [`DEFAULT_FILTER`] when unset or unparseable.
pub fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    // JSON logs + timestamps, configurable via RUST_LOG.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();

    ::tracing::debug!(default_filter = DEFAULT_FILTER, "tracing initialized");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_parses() {
        let filter = EnvFilter::try_new(DEFAULT_FILTER).expect("default directives are valid");
        let rendered = filter.to_string();
        assert!(rendered.contains("catalogsync_products=debug"));
        assert!(rendered.contains("catalogsync_tax=debug"));
    }

    #[test]
    fn init_is_idempotent() {
        super::init();
        super::init();
    }
}
