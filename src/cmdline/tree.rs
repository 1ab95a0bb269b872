//! Nested overlay tree built from dotted key paths

use serde::Serialize;
use std::collections::BTreeMap;

use super::coerce::CoercedValue;
use crate::domain::Result;

/// One node of an overlay tree
///
/// Serializes untagged, so a tree renders as plain nested JSON objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OverlayNode {
    /// A coerced value at the end of a key path
    Leaf(CoercedValue),
    /// A mapping from path segment to child node
    Node(BTreeMap<String, OverlayNode>),
}

impl Default for OverlayNode {
    fn default() -> Self {
        OverlayNode::Node(BTreeMap::new())
    }
}

impl OverlayNode {
    /// Creates an empty mapping node
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true for a mapping with no children
    pub fn is_empty(&self) -> bool {
        matches!(self, OverlayNode::Node(children) if children.is_empty())
    }

    /// Looks up a child by a dotted path, e.g. `state.dev`
    pub fn get(&self, path: &str) -> Option<&OverlayNode> {
        let mut current = self;
        for segment in path.split('.') {
            match current {
                OverlayNode::Node(children) => current = children.get(segment)?,
                OverlayNode::Leaf(_) => return None,
            }
        }
        Some(current)
    }

    /// Returns the leaf value at a dotted path, if there is one
    pub fn leaf(&self, path: &str) -> Option<&CoercedValue> {
        match self.get(path)? {
            OverlayNode::Leaf(value) => Some(value),
            OverlayNode::Node(_) => None,
        }
    }

    /// Human readable name of the node kind, used in schema mismatch errors
    pub fn kind(&self) -> &'static str {
        match self {
            OverlayNode::Leaf(value) => value.kind(),
            OverlayNode::Node(_) => "mapping",
        }
    }

    /// Encodes the tree as compact JSON for diagnostics
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Places `value` at `segments` below `root`
///
/// Missing intermediate mappings are created. The final segment is always
/// overwritten. When an intermediate segment already holds a leaf, nothing is
/// changed and `false` is returned so sibling state is never corrupted.
///
/// # Examples
///
/// ```
/// use rancher_config::cmdline::{place, CoercedValue, OverlayNode};
///
/// let mut root = OverlayNode::new();
/// assert!(place(&mut root, &["state", "dev"], CoercedValue::Str("LABEL=STATE".into())));
/// assert!(!place(&mut root, &["state", "dev", "x"], CoercedValue::Bool(true)));
/// assert_eq!(root.leaf("state.dev"), Some(&CoercedValue::Str("LABEL=STATE".into())));
/// ```
pub fn place<S: AsRef<str>>(root: &mut OverlayNode, segments: &[S], value: CoercedValue) -> bool {
    let Some((last, parents)) = segments.split_last() else {
        return false;
    };

    if !path_is_open(root, parents) {
        return false;
    }

    let mut current = root;
    for segment in parents {
        current = match current {
            OverlayNode::Node(children) => children
                .entry(segment.as_ref().to_string())
                .or_insert_with(OverlayNode::new),
            OverlayNode::Leaf(_) => return false,
        };
    }

    match current {
        OverlayNode::Node(children) => {
            children.insert(last.as_ref().to_string(), OverlayNode::Leaf(value));
            true
        }
        OverlayNode::Leaf(_) => false,
    }
}

/// True when no prefix of `parents` resolves to a leaf
fn path_is_open<S: AsRef<str>>(root: &OverlayNode, parents: &[S]) -> bool {
    let mut current = root;
    for segment in parents {
        match current {
            OverlayNode::Leaf(_) => return false,
            OverlayNode::Node(children) => match children.get(segment.as_ref()) {
                Some(child) => current = child,
                None => return true,
            },
        }
    }
    matches!(current, OverlayNode::Node(_))
}
