//! Configuration loader
//!
//! Builds a [`Config`] from its built-in defaults, then overlays the system
//! command line, then overlays the process arguments. The argument overlay is
//! applied last and therefore wins on conflicting keys.

use std::fs;
use std::path::{Path, PathBuf};

use super::defaults::{CMDLINE_PATH, NAMESPACE};
use super::schema::Config;
use crate::cmdline::parse_cmdline_with_namespace;
use crate::domain::{ConfigError, Result};
use crate::logging::Verbosity;

/// Loads configuration from the kernel command line and process arguments
///
/// # Examples
///
/// ```no_run
/// use rancher_config::config::ConfigLoader;
/// use rancher_config::logging::init_logging;
///
/// let logging = init_logging("info", false).expect("Failed to initialize logging");
/// let config = ConfigLoader::new()
///     .with_args(["rancher.rescue"])
///     .load(&logging)
///     .expect("Failed to load configuration");
/// assert!(config.rescue);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    cmdline_path: PathBuf,
    args: Vec<String>,
    namespace: String,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Loader reading `/proc/cmdline` and this process' arguments
    pub fn new() -> Self {
        Self {
            cmdline_path: PathBuf::from(CMDLINE_PATH),
            args: std::env::args_os()
                .skip(1)
                .map(|arg| arg.to_string_lossy().into_owned())
                .collect(),
            namespace: NAMESPACE.to_string(),
        }
    }

    /// Reads the system command line from `path` instead of `/proc/cmdline`
    pub fn with_cmdline_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cmdline_path = path.into();
        self
    }

    /// Replaces the process argument source
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Uses a namespace prefix other than `rancher`
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Path of the system command line source
    pub fn cmdline_path(&self) -> &Path {
        &self.cmdline_path
    }

    /// Loads a fresh record
    ///
    /// Starts from [`Config::default`], applies both sources and raises
    /// logging verbosity through `verbosity` if the result has `debug` set.
    ///
    /// # Errors
    ///
    /// Returns the first failure of either source. No record is returned on
    /// failure.
    pub fn load(&self, verbosity: &dyn Verbosity) -> Result<Config> {
        let mut config = Config::default();
        self.reload(&mut config)?;

        if config.debug {
            verbosity.enable_debug();
        }

        Ok(config)
    }

    /// Overlays both sources onto an existing record
    ///
    /// Each overlay is atomic, the pair is not: if the argument overlay fails
    /// the command line overlay has already been applied.
    pub fn reload(&self, config: &mut Config) -> Result<()> {
        tracing::debug!(path = %self.cmdline_path.display(), "Reading config cmdline");
        let cmdline = self.read_cmdline()?;
        self.overlay(config, "cmdline", &cmdline)?;

        tracing::debug!("Reading config args");
        let args = self.args.join(" ");
        self.overlay(config, "args", &args)
    }

    /// Reads the system command line source
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SourceUnavailable`] if the file cannot be read.
    pub fn read_cmdline(&self) -> Result<String> {
        let bytes = fs::read(&self.cmdline_path).map_err(|e| ConfigError::SourceUnavailable {
            path: self.cmdline_path.display().to_string(),
            source: e,
        })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn overlay(&self, config: &mut Config, source: &str, text: &str) -> Result<()> {
        let text = text.trim();
        if text.is_empty() {
            tracing::debug!(source = %source, "Config source is empty, nothing to apply");
            return Ok(());
        }

        tracing::debug!(source = %source, text = %text, "Applying config source");
        let tree = parse_cmdline_with_namespace(text, &self.namespace);
        config.merge(&tree).inspect_err(|e| {
            tracing::error!(source = %source, error = %e, "Failed to apply config source");
        })
    }
}

/// Loads configuration from `/proc/cmdline` and this process' arguments
///
/// # Examples
///
/// ```no_run
/// use rancher_config::config::load_config;
/// use rancher_config::logging::init_logging;
///
/// let logging = init_logging("info", false).expect("Failed to initialize logging");
/// match load_config(&logging) {
///     Ok(config) => println!("{}", config.dump().unwrap_or_default()),
///     Err(e) => eprintln!("Configuration error: {e}"),
/// }
/// ```
pub fn load_config(verbosity: &dyn Verbosity) -> Result<Config> {
    ConfigLoader::new().load(verbosity)
}
