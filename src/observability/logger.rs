//! Subscriber setup
//!
//! `RUST_LOG` wins over the configured level. Logs go to stderr so that
//! stdout stays free for command output.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, Registry};

use super::config::{LogConfig, LogFormat};

/// Build the filter from `RUST_LOG`, falling back to `config.level`
pub fn env_filter(config: &LogConfig) -> EnvFilter {
    let fallback = || {
        EnvFilter::builder()
            .with_default_directive(LevelFilter::INFO.into())
            .parse_lossy(&config.level)
    };

    match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) if !directives.trim().is_empty() => {
            EnvFilter::try_new(directives).unwrap_or_else(|_| fallback())
        }
        _ => fallback(),
    }
}

fn fmt_layer(format: LogFormat) -> Box<dyn Layer<Registry> + Send + Sync> {
    match format {
        LogFormat::Pretty => Box::new(
            tracing_subscriber::fmt::layer()
                .pretty()
                .with_writer(std::io::stderr)
                .with_target(true),
        ),
        LogFormat::Compact => Box::new(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr)
                .with_target(true),
        ),
        LogFormat::Json => Box::new(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_current_span(true)
                .with_span_list(true),
        ),
    }
}

/// Install the global subscriber; fails when one is already installed
pub fn init(config: &LogConfig) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(fmt_layer(config.format))
        .with(env_filter(config))
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unparsable_level_is_tolerated() {
        let config = LogConfig {
            level: "not a directive ===".into(),
            format: LogFormat::Compact,
        };
        let _filter = env_filter(&config);
    }

    #[test]
    fn test_second_init_fails() {
        let config = LogConfig::default();
        let _ = init(&config);
        assert!(init(&config).is_err());
    }
}
