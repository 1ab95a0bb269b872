//! Configuration management.
//!
//! # Overview
//!
//! The bootstrap configuration is a typed [`Config`] record built in layers:
//!
//! 1. Built-in defaults ([`Config::default`])
//! 2. The kernel command line (`/proc/cmdline`)
//! 3. The process arguments
//!
//! Later layers win. Only `rancher.`-prefixed tokens take part; the rest of
//! the command line is left to the kernel and other consumers.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use rancher_config::config::load_config;
//! use rancher_config::logging::init_logging;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let logging = init_logging("info", false)?;
//! let config = load_config(&logging)?;
//!
//! println!("Console container: {}", config.console_container);
//! if config.rescue {
//!     println!("Rescue mode requested");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Command line syntax
//!
//! ```text
//! rancher.debug                          debug = true
//! rancher.state.dev=LABEL=RANCHER_STATE  state.dev = "LABEL=RANCHER_STATE"
//! rancher.dns=[8.8.8.8,8.8.4.4]          dns = ["8.8.8.8", "8.8.4.4"]
//! rancher.rescueContainer.id=rescue      rescueContainer.id = "rescue"
//! ```
//!
//! Values are typed by spelling (see [`crate::cmdline::coerce`]). A value
//! that does not fit its field fails the load with
//! [`ConfigError::SchemaMismatch`](crate::domain::ConfigError::SchemaMismatch).

pub mod defaults;
pub mod loader;
pub mod overlay;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, ConfigLoader};
pub use overlay::{ConfigOverlay, ContainerOverlay, Overlay, StateOverlay};
pub use schema::{Config, ContainerConfig, StateConfig};
