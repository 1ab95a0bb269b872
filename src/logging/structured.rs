//! Structured logging setup using tracing
//!
//! Console output goes to stderr, as text or JSON. The level filter sits
//! behind a reload layer so it can be raised once the configuration has been
//! loaded and asks for `debug`.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

use super::Verbosity;
use crate::domain::{ConfigError, Result};

const CRATE_TARGET: &str = "rancher_config";

/// Handle to the installed subscriber's level filter
#[derive(Clone)]
pub struct LoggingHandle {
    filter: reload::Handle<EnvFilter, Registry>,
}

impl LoggingHandle {
    fn new(filter: reload::Handle<EnvFilter, Registry>) -> Self {
        Self { filter }
    }

    /// Replaces the level filter
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown level or when the subscriber is gone.
    pub fn set_level(&self, level_str: &str) -> Result<()> {
        let level = parse_log_level(level_str)?;
        self.filter
            .modify(|filter| *filter = crate_filter(level))
            .map_err(|e| ConfigError::Logging(format!("Failed to change log level: {e}")))
    }

    /// Current filter directives, lowercased, e.g. `rancher_config=info`
    pub fn current_filter(&self) -> Option<String> {
        self.filter
            .with_current(|filter| filter.to_string().to_lowercase())
            .ok()
    }
}

impl Verbosity for LoggingHandle {
    fn enable_debug(&self) {
        match self.set_level("debug") {
            Ok(()) => tracing::debug!("Debug logging enabled by configuration"),
            Err(e) => tracing::warn!(error = %e, "Could not enable debug logging"),
        }
    }
}

/// Initialize the logging system
///
/// `RUST_LOG` takes precedence over `log_level_str` when it is set.
///
/// # Arguments
///
/// * `log_level_str` - Log level as a string (trace, debug, info, warn, error)
/// * `json` - Emit JSON lines instead of human readable text
///
/// # Errors
///
/// Returns [`ConfigError::Logging`] for an unknown level or when a global
/// subscriber is already installed.
///
/// # Example
///
/// ```no_run
/// use rancher_config::logging::init_logging;
///
/// let logging = init_logging("info", false).expect("Failed to initialize logging");
/// tracing::info!("Bootstrap started");
/// ```
pub fn init_logging(log_level_str: &str, json: bool) -> Result<LoggingHandle> {
    let log_level = parse_log_level(log_level_str)?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| crate_filter(log_level));
    let (filter_layer, handle) = reload::Layer::new(env_filter);

    let json_layer = json.then(|| {
        fmt::layer()
            .json()
            .with_target(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| {
        fmt::layer()
            .with_target(true)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(json_layer)
        .with(text_layer)
        .try_init()
        .map_err(|e| ConfigError::Logging(format!("Failed to install subscriber: {e}")))?;

    tracing::debug!(level = %log_level, json, "Logging initialized");

    Ok(LoggingHandle::new(handle))
}

fn crate_filter(level: Level) -> EnvFilter {
    EnvFilter::new(format!("{CRATE_TARGET}={}", level.as_str().to_lowercase()))
}

/// Parse log level from string
fn parse_log_level(level_str: &str) -> Result<Level> {
    match level_str.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(ConfigError::Logging(format!(
            "Invalid log level: {level_str}. Must be one of: trace, debug, info, warn, error"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level_valid() {
        assert_eq!(parse_log_level("trace").unwrap(), Level::TRACE);
        assert_eq!(parse_log_level("debug").unwrap(), Level::DEBUG);
        assert_eq!(parse_log_level("info").unwrap(), Level::INFO);
        assert_eq!(parse_log_level("warn").unwrap(), Level::WARN);
        assert_eq!(parse_log_level("error").unwrap(), Level::ERROR);
    }

    #[test]
    fn test_parse_log_level_case_insensitive() {
        assert_eq!(parse_log_level("TRACE").unwrap(), Level::TRACE);
        assert_eq!(parse_log_level("Debug").unwrap(), Level::DEBUG);
    }

    #[test]
    fn test_parse_log_level_invalid() {
        assert!(parse_log_level("verbose").is_err());
        assert!(parse_log_level("").is_err());
    }

    // The reload layer is exercised without installing a global subscriber,
    // which can only happen once per process.
    #[test]
    fn test_enable_debug_rewrites_filter() {
        let (_layer, handle) = reload::Layer::<EnvFilter, Registry>::new(crate_filter(Level::INFO));
        let logging = LoggingHandle::new(handle);

        assert_eq!(logging.current_filter().as_deref(), Some("rancher_config=info"));
        logging.enable_debug();
        assert_eq!(logging.current_filter().as_deref(), Some("rancher_config=debug"));
    }

    #[test]
    fn test_set_level_rejects_unknown_level() {
        let (_layer, handle) = reload::Layer::<EnvFilter, Registry>::new(crate_filter(Level::INFO));
        let logging = LoggingHandle::new(handle);

        assert!(logging.set_level("loud").is_err());
        assert_eq!(logging.current_filter().as_deref(), Some("rancher_config=info"));
    }

    #[test]
    fn test_enable_debug_after_subscriber_dropped() {
        let (layer, handle) = reload::Layer::<EnvFilter, Registry>::new(crate_filter(Level::INFO));
        drop(layer);

        let logging = LoggingHandle::new(handle);
        logging.enable_debug();
        assert!(logging.set_level("debug").is_err());
        assert!(logging.current_filter().is_none());
    }
}
