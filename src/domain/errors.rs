//! Domain error types
//!
//! Every fatal condition of configuration loading maps onto one variant of
//! [`ConfigError`]. Stray, malformed or colliding command line tokens are not
//! errors and never show up here.

use thiserror::Error;

/// Main configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The system command line source could not be read
    #[error("Command line source unavailable: {path}: {source}")]
    SourceUnavailable {
        /// Path of the source that failed
        path: String,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// An overlay tree or the configuration record could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// An overlay value does not fit the typed field it targets
    #[error("Schema mismatch at '{path}': expected {expected}, found {found}")]
    SchemaMismatch {
        /// Dotted path of the offending field, without the namespace prefix
        path: String,
        /// Kind of value the field accepts
        expected: &'static str,
        /// Kind of value the overlay carried
        found: &'static str,
    },

    /// Logging setup errors
    #[error("Logging error: {0}")]
    Logging(String),
}

impl ConfigError {
    /// Builds a [`ConfigError::SchemaMismatch`] for a dotted path
    pub fn schema_mismatch(
        path: impl Into<String>,
        expected: &'static str,
        found: &'static str,
    ) -> Self {
        ConfigError::SchemaMismatch {
            path: path.into(),
            expected,
            found,
        }
    }

    /// Returns true when the error came from decoding an overlay
    pub fn is_schema_mismatch(&self) -> bool {
        matches!(self, ConfigError::SchemaMismatch { .. })
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Serialization(err.to_string())
    }
}
