//! Command line parser
//!
//! Turns a flat command line such as
//!
//! ```text
//! console=tty0 rancher.debug rancher.state.dev=LABEL=STATE rancher.dns=[8.8.8.8,8.8.4.4]
//! ```
//!
//! into a nested [`OverlayNode`] tree. Tokens are separated by single spaces
//! with no quoting or escaping. Only tokens carrying the namespace prefix are
//! kept; everything else on the line belongs to other consumers.

use super::coerce::{coerce_value, CoercedValue};
use super::tree::{place, OverlayNode};
use crate::config::defaults::NAMESPACE;

/// Parses a command line using the default `rancher` namespace
pub fn parse_cmdline(line: &str) -> OverlayNode {
    parse_cmdline_with_namespace(line, NAMESPACE)
}

/// Parses a command line, keeping only `<namespace>.`-prefixed tokens
///
/// A token without `=` is a presence flag and becomes `true`. Only the first
/// `=` separates key from value, so values may contain `=` themselves.
///
/// # Examples
///
/// ```
/// use rancher_config::cmdline::{parse_cmdline_with_namespace, CoercedValue};
///
/// let tree = parse_cmdline_with_namespace("quiet os.rescue os.state.dev=LABEL=STATE", "os");
/// assert_eq!(tree.leaf("rescue"), Some(&CoercedValue::Bool(true)));
/// assert_eq!(tree.leaf("state.dev"), Some(&CoercedValue::Str("LABEL=STATE".into())));
/// assert!(tree.get("quiet").is_none());
/// ```
pub fn parse_cmdline_with_namespace(line: &str, namespace: &str) -> OverlayNode {
    let prefix = format!("{namespace}.");
    let mut root = OverlayNode::new();

    for token in line.split(' ') {
        if !token.starts_with(&prefix) {
            continue;
        }

        let (key, value) = match token.split_once('=') {
            Some((key, raw)) => (key, coerce_value(raw)),
            None => (token, CoercedValue::Bool(true)),
        };

        let segments: Vec<&str> = key.split('.').skip(1).collect();
        if !place(&mut root, &segments, value) {
            tracing::debug!(token = %token, "Skipping command line token that collides with an existing value");
        }
    }

    match root.to_json() {
        Ok(json) => tracing::debug!(namespace = %namespace, overlay = %json, "Parsed command line"),
        Err(e) => tracing::debug!(namespace = %namespace, error = %e, "Parsed command line"),
    }

    root
}
