//! Structured logging setup.
//!
//! The SDK only emits `tracing` spans and events. Applications that want them
//! printed can install a subscriber with [`init_logging`] or
//! [`try_init_logging`]. `RUST_LOG` takes precedence over [`LogConfig::level`].
//!
//! ```rust
//! use htx_core::logging::{LogConfig, try_init_logging};
//!
//! try_init_logging(&LogConfig::test());
//! tracing::info!(symbol = "btcusdt", "ready");
//! ```

use tracing::Level;
use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

/// Log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Everything, including per-request payload previews.
    Trace,
    /// Request/response summaries.
    Debug,
    /// Normal operation.
    Info,
    /// Recoverable problems.
    Warn,
    /// Failures only.
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        };
        f.write_str(s)
    }
}

/// Output format of the installed subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line human readable output.
    Pretty,
    /// Single-line human readable output.
    Compact,
    /// One JSON object per line.
    Json,
}

/// Options for [`init_logging`].
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Level applied to the `htx_core` and `htx_client` targets.
    pub level: LogLevel,
    /// Output format.
    pub format: LogFormat,
    /// Print timestamps.
    pub show_time: bool,
    /// Print thread ids.
    pub show_thread_ids: bool,
    /// Print the event target (module path).
    pub show_target: bool,
    /// Emit events when spans are entered and closed.
    pub show_span_events: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Pretty,
            show_time: true,
            show_thread_ids: false,
            show_target: true,
            show_span_events: false,
        }
    }
}

impl LogConfig {
    /// Debug level, pretty output, span enter/close events.
    pub fn development() -> Self {
        Self {
            level: LogLevel::Debug,
            show_span_events: true,
            ..Self::default()
        }
    }

    /// Info level JSON lines with thread ids.
    pub fn production() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Json,
            show_thread_ids: true,
            ..Self::default()
        }
    }

    /// Quiet compact output for test runs.
    pub fn test() -> Self {
        Self {
            level: LogLevel::Warn,
            format: LogFormat::Compact,
            show_time: false,
            show_thread_ids: false,
            show_target: false,
            show_span_events: false,
        }
    }

    /// Filter directive used when `RUST_LOG` is unset.
    pub fn default_directive(&self) -> String {
        format!("htx_core={},htx_client={}", self.level, self.level)
    }
}

fn build_layer(config: &LogConfig) -> Box<dyn Layer<Registry> + Send + Sync> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_directive()));

    let span_events = if config.show_span_events {
        FmtSpan::ENTER | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let base = fmt::layer()
        .with_thread_ids(config.show_thread_ids)
        .with_target(config.show_target)
        .with_span_events(span_events);

    match (config.format, config.show_time) {
        (LogFormat::Pretty, true) => base.pretty().with_filter(env_filter).boxed(),
        (LogFormat::Pretty, false) => base.pretty().without_time().with_filter(env_filter).boxed(),
        (LogFormat::Compact, true) => base.compact().with_filter(env_filter).boxed(),
        (LogFormat::Compact, false) => {
            base.compact().without_time().with_filter(env_filter).boxed()
        }
        (LogFormat::Json, true) => base.json().with_filter(env_filter).boxed(),
        (LogFormat::Json, false) => base.json().without_time().with_filter(env_filter).boxed(),
    }
}

/// Installs the global subscriber.
///
/// # Panics
///
/// Panics if a global subscriber is already set. Use [`try_init_logging`]
/// where that can happen, such as in tests.
pub fn init_logging(config: &LogConfig) {
    tracing_subscriber::registry().with(build_layer(config)).init();
}

/// Installs the global subscriber unless one is already set.
///
/// Returns `false` when another subscriber was installed first.
pub fn try_init_logging(config: &LogConfig) -> bool {
    let result: Result<(), TryInitError> =
        tracing_subscriber::registry().with(build_layer(config)).try_init();
    result.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(Level::from(LogLevel::Trace), Level::TRACE);
        assert_eq!(Level::from(LogLevel::Warn), Level::WARN);
        assert_eq!(Level::from(LogLevel::Error), Level::ERROR);
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevel::Debug.to_string(), "debug");
        assert_eq!(LogLevel::Info.to_string(), "info");
    }

    #[test]
    fn test_default_directive_targets_both_crates() {
        let config = LogConfig::development();
        assert_eq!(config.default_directive(), "htx_core=debug,htx_client=debug");
    }

    #[test]
    fn test_log_config_presets() {
        let production = LogConfig::production();
        assert_eq!(production.format, LogFormat::Json);
        assert!(production.show_thread_ids);

        let test = LogConfig::test();
        assert_eq!(test.level, LogLevel::Warn);
        assert!(!test.show_time);
    }

    #[test]
    fn test_try_init_logging_twice() {
        let _ = try_init_logging(&LogConfig::test());
        assert!(!try_init_logging(&LogConfig::test()));
    }
}
