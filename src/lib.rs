// rancher-config - Bootstrap configuration from the kernel command line
// Copyright (c) 2025 rancher-config Contributors
// Licensed under the MIT License

//! # rancher-config
//!
//! Loads the configuration of an operating system bootstrap by layering
//! `rancher.*` tokens from the kernel command line and the process arguments
//! onto typed defaults.
//!
//! ## Architecture
//!
//! - [`cmdline`] - Tokenizing, value coercion and the nested overlay tree
//! - [`config`] - The configuration record, typed overlays and the loader
//! - [`init`] - Sequential init step runner consuming the loaded record
//! - [`domain`] - Error and result types
//! - [`logging`] - Structured logging and the verbosity seam
//! - [`cli`] - Command-line interface of the diagnostic binary
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rancher_config::config::ConfigLoader;
//! use rancher_config::logging::init_logging;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let logging = init_logging("info", false)?;
//!
//!     // /proc/cmdline first, then this process' arguments
//!     let config = ConfigLoader::new().load(&logging)?;
//!
//!     println!("{}", config.dump()?);
//!     Ok(())
//! }
//! ```
//!
//! ## Precedence
//!
//! ```rust
//! use rancher_config::cmdline::parse_cmdline;
//! use rancher_config::config::Config;
//!
//! let mut config = Config::default();
//! config.merge(&parse_cmdline("rancher.debug=false rancher.disable=[docker,network]")).unwrap();
//! config.merge(&parse_cmdline("rancher.debug=true")).unwrap();
//!
//! assert!(config.debug);
//! assert_eq!(config.disable, vec!["docker", "network"]);
//! ```
//!
//! ## Error Handling
//!
//! Library functions return [`domain::Result`]. Unknown or colliding tokens
//! are never errors; an unreadable command line or a value that does not fit
//! its field is.
//!
//! ## Logging
//!
//! All diagnostics go through `tracing`:
//!
//! ```rust,no_run
//! tracing::debug!(overlay = "{\"debug\":true}", "Parsed command line");
//! ```

pub mod cli;
pub mod cmdline;
pub mod config;
pub mod domain;
pub mod init;
pub mod logging;
