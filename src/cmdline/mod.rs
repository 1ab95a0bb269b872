//! Kernel command line parsing.
//!
//! The command line is flat text; configuration is a nested record. This
//! module bridges the two in three steps:
//!
//! - [`coerce`] infers a typed value from token text
//! - [`place`] puts that value at a dotted path inside an [`OverlayNode`] tree
//! - [`parse_cmdline`] drives both for every namespaced token on a line
//!
//! ```rust
//! use rancher_config::cmdline::{parse_cmdline, CoercedValue};
//!
//! let tree = parse_cmdline("rancher.debug rancher.disable=[docker,network] quiet");
//! assert_eq!(tree.leaf("debug"), Some(&CoercedValue::Bool(true)));
//! assert_eq!(
//!     tree.leaf("disable"),
//!     Some(&CoercedValue::List(vec!["docker".into(), "network".into()]))
//! );
//! ```
//!
//! Parsing never fails. Tokens outside the namespace are ignored and tokens
//! whose path runs through an existing leaf are dropped.

pub mod coerce;
pub mod parser;
pub mod tree;

pub use coerce::{coerce, coerce_value, CoercedValue};
pub use parser::{parse_cmdline, parse_cmdline_with_namespace};
pub use tree::{place, OverlayNode};
