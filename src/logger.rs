// src/logger.rs
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DEFAULT_FILTER: &str = "academy_codelab_lib=info,academy_codelab=info";

/// `RUST_LOG` wins, then the configured filter, then [`DEFAULT_FILTER`].
pub fn build_filter(configured: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .ok()
        .or_else(|| configured.and_then(|f| EnvFilter::try_new(f).ok()))
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber. Safe to call more than once; only the
/// first call takes effect.
pub fn init_logger(configured: Option<&str>) {
    let fmt_layer = fmt::layer().with_target(false).with_level(true).compact();

    let _ = tracing_subscriber::registry()
        .with(build_filter(configured))
        .with(fmt_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_configured_filter_falls_back() {
        // Only checks that building never panics on junk.
        let _filter = build_filter(Some("=[not a filter"));
        let _filter = build_filter(None);
    }

    #[test]
    fn init_twice_is_harmless() {
        init_logger(None);
        init_logger(Some("academy_codelab_lib=debug"));
    }
}
