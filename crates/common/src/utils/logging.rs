use std::io;

use configs::{LogFormat, LoggingConfig};
use tracing_subscriber::{fmt, EnvFilter};

pub const DEFAULT_FILTER: &str = "info,tower_http=info,axum=info,sqlx=warn";

/// Build the filter: `RUST_LOG` first, then the configured directives, then
/// [`DEFAULT_FILTER`].
pub fn build_filter(cfg: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| match cfg.filter.as_deref() {
            Some(directives) => EnvFilter::try_new(directives),
            None => EnvFilter::try_new(DEFAULT_FILTER),
        })
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the process subscriber described by `cfg`.
///
/// Called once from startup with the loaded configuration. Returns `false`
/// when a subscriber was already installed (tests, embedding).
pub fn init_logging(cfg: &LoggingConfig) -> bool {
    let env_filter = build_filter(cfg);
    let builder = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stdout);
    match cfg.format {
        LogFormat::Compact => builder.compact().try_init().is_ok(),
        LogFormat::Json => builder.json().try_init().is_ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_filter_is_used() {
        if std::env::var("RUST_LOG").is_ok() { return; }
        let cfg = LoggingConfig { format: LogFormat::Json, filter: Some("debug".into()) };
        assert_eq!(build_filter(&cfg).to_string(), "debug");
    }

    #[test]
    fn invalid_filter_falls_back_to_default() {
        if std::env::var("RUST_LOG").is_ok() { return; }
        let cfg = LoggingConfig { format: LogFormat::Compact, filter: Some("service=verbose".into()) };
        let rendered = build_filter(&cfg).to_string();
        assert!(rendered.contains("info"));
    }
}
