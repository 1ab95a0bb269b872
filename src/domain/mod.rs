//! Domain error and result types.
//!
//! All fallible operations of the crate return [`Result<T>`], an alias over
//! [`ConfigError`]:
//!
//! ```rust
//! use rancher_config::domain::Result;
//!
//! fn example() -> Result<()> {
//!     let config = rancher_config::config::Config::default();
//!     let _text = config.dump()?;
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod errors;
pub mod result;

pub use errors::ConfigError;
pub use result::Result;
