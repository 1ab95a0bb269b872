//! Logging and observability
//!
//! This module provides:
//! - [`init_logging`]: a tracing subscriber writing text or JSON to stderr
//! - [`Verbosity`]: the seam the loader uses to raise the log level when the
//!   loaded configuration has `debug` set
//!
//! # Example
//!
//! ```no_run
//! use rancher_config::config::ConfigLoader;
//! use rancher_config::logging::init_logging;
//!
//! let logging = init_logging("info", false).expect("Failed to initialize logging");
//! // Raises the filter to debug if the command line carries `rancher.debug`
//! let config = ConfigLoader::new().load(&logging);
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingHandle};

/// Receiver of the "configuration asked for debug logging" signal
pub trait Verbosity {
    /// Raises logging to debug level
    fn enable_debug(&self);
}

/// Log the progress of one init step
///
/// # Example
///
/// ```no_run
/// use rancher_config::log_step_progress;
///
/// log_step_progress!(debug, 2, 4, "Done");
/// ```
#[macro_export]
macro_rules! log_step_progress {
    ($level:ident, $current:expr, $total:expr, $message:expr) => {
        tracing::$level!(
            step = $current,
            total = $total,
            progress_pct = ($current * 100 / $total),
            "[{}/{}] {} {}%",
            $current,
            $total,
            $message,
            ($current * 100 / $total)
        );
    };
}
