//! Typed overlays
//!
//! An overlay mirrors a configuration record with every field optional. It is
//! decoded from an [`OverlayNode`] tree by walking the tree one path segment
//! at a time, then applied with a plain "present field overwrites" rule.
//!
//! Decoding checks every leaf against the field it targets before anything
//! is applied, so a failed merge never leaves a half-updated record behind.
//!
//! Key matching follows the external (camelCase) names. An exact match is
//! preferred; otherwise keys match case-insensitively, so `consolecontainer`
//! reaches `consoleContainer`. Unknown keys are ignored.

use std::collections::BTreeMap;

use super::schema::{Config, ContainerConfig, StateConfig};
use crate::cmdline::{CoercedValue, OverlayNode};
use crate::domain::{ConfigError, Result};

/// Something that can be laid over a target value
pub trait Overlay {
    /// The record this overlay updates
    type Target;

    /// Overwrites every field of `target` that is present in `self`
    fn apply_to(self, target: &mut Self::Target);
}

/// Optional-field mirror of [`Config`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverlay {
    pub console_container: Option<String>,
    pub debug: Option<bool>,
    pub disable: Option<Vec<String>>,
    pub dns: Option<Vec<String>>,
    pub rescue: Option<bool>,
    pub rescue_container: Option<ContainerOverlay>,
    pub state: Option<StateOverlay>,
    /// Never produced by the command line, which has no syntax for a list of
    /// records. Programmatic overlays may still set it.
    pub system_containers: Option<Vec<ContainerConfig>>,
    pub system_docker_args: Option<Vec<String>>,
    pub modules: Option<Vec<String>>,
}

/// Optional-field mirror of [`ContainerConfig`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerOverlay {
    pub id: Option<String>,
    pub cmd: Option<Vec<String>>,
}

/// Optional-field mirror of [`StateConfig`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateOverlay {
    pub fs_type: Option<String>,
    pub dev: Option<String>,
    pub required: Option<bool>,
}

const CONFIG_KEYS: &[&str] = &[
    "consoleContainer",
    "debug",
    "disable",
    "dns",
    "rescue",
    "rescueContainer",
    "state",
    "systemContainers",
    "systemDockerArgs",
    "modules",
];

const CONTAINER_KEYS: &[&str] = &["id", "run"];

const STATE_KEYS: &[&str] = &["fsType", "dev", "required"];

impl ConfigOverlay {
    /// Decodes an overlay tree into a typed overlay
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SchemaMismatch`] when a value does not fit its
    /// field, e.g. `debug=yes` or `state=ext4`.
    pub fn from_tree(tree: &OverlayNode) -> Result<Self> {
        let mut overlay = Self::default();

        for (key, node) in mapping(tree, "")? {
            let Some(field) = canonical_key(key, CONFIG_KEYS) else {
                tracing::debug!(key = %key, "Ignoring unknown configuration key");
                continue;
            };
            let path = field;
            match field {
                "consoleContainer" => overlay.console_container = Some(string(node, path)?),
                "debug" => overlay.debug = Some(boolean(node, path)?),
                "disable" => overlay.disable = Some(strings(node, path)?),
                "dns" => overlay.dns = Some(strings(node, path)?),
                "rescue" => overlay.rescue = Some(boolean(node, path)?),
                "rescueContainer" => {
                    overlay.rescue_container = Some(ContainerOverlay::from_tree(node, path)?)
                }
                "state" => overlay.state = Some(StateOverlay::from_tree(node, path)?),
                "systemContainers" => {
                    return Err(ConfigError::schema_mismatch(
                        path,
                        "list of containers",
                        node.kind(),
                    ))
                }
                "systemDockerArgs" => overlay.system_docker_args = Some(strings(node, path)?),
                "modules" => overlay.modules = Some(strings(node, path)?),
                _ => unreachable!("CONFIG_KEYS and the decoder disagree on '{field}'"),
            }
        }

        Ok(overlay)
    }

    /// True when the overlay would not change anything
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl ContainerOverlay {
    fn from_tree(tree: &OverlayNode, parent: &str) -> Result<Self> {
        let mut overlay = Self::default();

        for (key, node) in mapping(tree, parent)? {
            let Some(field) = canonical_key(key, CONTAINER_KEYS) else {
                tracing::debug!(key = %join(parent, key), "Ignoring unknown configuration key");
                continue;
            };
            let path = join(parent, field);
            match field {
                "id" => overlay.id = Some(string(node, &path)?),
                "run" => overlay.cmd = Some(strings(node, &path)?),
                _ => unreachable!("CONTAINER_KEYS and the decoder disagree on '{field}'"),
            }
        }

        Ok(overlay)
    }
}

impl StateOverlay {
    fn from_tree(tree: &OverlayNode, parent: &str) -> Result<Self> {
        let mut overlay = Self::default();

        for (key, node) in mapping(tree, parent)? {
            let Some(field) = canonical_key(key, STATE_KEYS) else {
                tracing::debug!(key = %join(parent, key), "Ignoring unknown configuration key");
                continue;
            };
            let path = join(parent, field);
            match field {
                "fsType" => overlay.fs_type = Some(string(node, &path)?),
                "dev" => overlay.dev = Some(string(node, &path)?),
                "required" => overlay.required = Some(boolean(node, &path)?),
                _ => unreachable!("STATE_KEYS and the decoder disagree on '{field}'"),
            }
        }

        Ok(overlay)
    }
}

impl Overlay for ConfigOverlay {
    type Target = Config;

    fn apply_to(self, target: &mut Config) {
        overwrite(&mut target.console_container, self.console_container);
        overwrite(&mut target.debug, self.debug);
        overwrite(&mut target.disable, self.disable);
        overwrite(&mut target.dns, self.dns);
        overwrite(&mut target.rescue, self.rescue);
        nested(&mut target.rescue_container, self.rescue_container);
        nested(&mut target.state, self.state);
        overwrite(&mut target.system_containers, self.system_containers);
        overwrite(&mut target.system_docker_args, self.system_docker_args);
        overwrite(&mut target.modules, self.modules);
    }
}

impl Overlay for ContainerOverlay {
    type Target = ContainerConfig;

    fn apply_to(self, target: &mut ContainerConfig) {
        overwrite(&mut target.id, self.id);
        overwrite(&mut target.cmd, self.cmd);
    }
}

impl Overlay for StateOverlay {
    type Target = StateConfig;

    fn apply_to(self, target: &mut StateConfig) {
        overwrite(&mut target.fs_type, self.fs_type);
        overwrite(&mut target.dev, self.dev);
        overwrite(&mut target.required, self.required);
    }
}

impl Config {
    /// Applies a typed overlay; never fails
    pub fn apply(&mut self, overlay: ConfigOverlay) {
        overlay.apply_to(self);
    }

    /// Decodes `tree` and applies it to this record
    ///
    /// Fields missing from the tree keep their current value. Lists are
    /// replaced, never concatenated.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SchemaMismatch`] if the tree does not fit the
    /// record. The record is unchanged in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use rancher_config::cmdline::parse_cmdline;
    /// use rancher_config::config::Config;
    ///
    /// let mut config = Config::default();
    /// config.merge(&parse_cmdline("rancher.dns=[8.8.8.8] rancher.state.required"))?;
    /// assert_eq!(config.dns, vec!["8.8.8.8".to_string()]);
    /// assert!(config.state.required);
    ///
    /// assert!(config.merge(&parse_cmdline("rancher.debug=maybe")).is_err());
    /// assert!(!config.debug);
    /// # Ok::<(), rancher_config::domain::ConfigError>(())
    /// ```
    pub fn merge(&mut self, tree: &OverlayNode) -> Result<()> {
        let overlay = ConfigOverlay::from_tree(tree)?;
        self.apply(overlay);
        Ok(())
    }
}

fn overwrite<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

fn nested<O: Overlay>(target: &mut O::Target, overlay: Option<O>) {
    if let Some(overlay) = overlay {
        overlay.apply_to(target);
    }
}

/// Picks the declared key for `key`, exact match first
fn canonical_key(key: &str, declared: &[&'static str]) -> Option<&'static str> {
    declared
        .iter()
        .find(|name| **name == key)
        .or_else(|| declared.iter().find(|name| name.eq_ignore_ascii_case(key)))
        .copied()
}

fn join(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

fn mapping<'a>(node: &'a OverlayNode, path: &str) -> Result<&'a BTreeMap<String, OverlayNode>> {
    match node {
        OverlayNode::Node(children) => Ok(children),
        OverlayNode::Leaf(value) => Err(ConfigError::schema_mismatch(
            display_path(path),
            "mapping",
            value.kind(),
        )),
    }
}

fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "<root>"
    } else {
        path
    }
}

fn boolean(node: &OverlayNode, path: &str) -> Result<bool> {
    match node {
        OverlayNode::Leaf(CoercedValue::Bool(b)) => Ok(*b),
        other => Err(ConfigError::schema_mismatch(path, "boolean", other.kind())),
    }
}

fn string(node: &OverlayNode, path: &str) -> Result<String> {
    match node {
        OverlayNode::Leaf(CoercedValue::Str(s)) => Ok(s.clone()),
        other => Err(ConfigError::schema_mismatch(path, "string", other.kind())),
    }
}

fn strings(node: &OverlayNode, path: &str) -> Result<Vec<String>> {
    match node {
        OverlayNode::Leaf(CoercedValue::List(items)) => Ok(items.clone()),
        other => Err(ConfigError::schema_mismatch(path, "list", other.kind())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmdline::parse_cmdline;

    #[test]
    fn test_from_tree_empty() {
        let overlay = ConfigOverlay::from_tree(&OverlayNode::new()).unwrap();
        assert!(overlay.is_empty());
    }

    #[test]
    fn test_from_tree_all_scalar_kinds() {
        let tree = parse_cmdline(
            "rancher.consoleContainer=debian rancher.debug rancher.disable=[docker] rancher.modules=[btrfs,overlay]",
        );
        let overlay = ConfigOverlay::from_tree(&tree).unwrap();

        assert_eq!(overlay.console_container.as_deref(), Some("debian"));
        assert_eq!(overlay.debug, Some(true));
        assert_eq!(overlay.disable, Some(vec!["docker".to_string()]));
        assert_eq!(
            overlay.modules,
            Some(vec!["btrfs".to_string(), "overlay".to_string()])
        );
        assert_eq!(overlay.rescue, None);
        assert_eq!(overlay.state, None);
    }

    #[test]
    fn test_from_tree_nested_records() {
        let tree = parse_cmdline(
            "rancher.state.dev=LABEL=RANCHER_STATE rancher.state.required=false rancher.rescueContainer.run=[/bin/sh,-l]",
        );
        let overlay = ConfigOverlay::from_tree(&tree).unwrap();

        let state = overlay.state.unwrap();
        assert_eq!(state.dev.as_deref(), Some("LABEL=RANCHER_STATE"));
        assert_eq!(state.required, Some(false));
        assert_eq!(state.fs_type, None);

        let rescue = overlay.rescue_container.unwrap();
        assert_eq!(rescue.cmd, Some(vec!["/bin/sh".to_string(), "-l".to_string()]));
        assert_eq!(rescue.id, None);
    }

    #[test]
    fn test_from_tree_case_insensitive_keys() {
        let tree = parse_cmdline("rancher.consolecontainer=alpine rancher.STATE.FSTYPE=btrfs");
        let overlay = ConfigOverlay::from_tree(&tree).unwrap();

        assert_eq!(overlay.console_container.as_deref(), Some("alpine"));
        assert_eq!(overlay.state.unwrap().fs_type.as_deref(), Some("btrfs"));
    }

    #[test]
    fn test_from_tree_ignores_unknown_keys() {
        let tree = parse_cmdline("rancher.a.b=5 rancher.flag rancher.state.colour=red");
        let overlay = ConfigOverlay::from_tree(&tree).unwrap();
        assert_eq!(overlay.state, Some(StateOverlay::default()));
        assert_eq!(overlay.debug, None);
    }

    #[test]
    fn test_from_tree_rejects_wrong_scalar() {
        let err = ConfigOverlay::from_tree(&parse_cmdline("rancher.debug=yes")).unwrap_err();
        match err {
            ConfigError::SchemaMismatch {
                path,
                expected,
                found,
            } => {
                assert_eq!(path, "debug");
                assert_eq!(expected, "boolean");
                assert_eq!(found, "string");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_from_tree_rejects_integer_for_string() {
        let err = ConfigOverlay::from_tree(&parse_cmdline("rancher.state.dev=5")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Schema mismatch at 'state.dev': expected string, found integer"
        );
    }

    #[test]
    fn test_merge_rejects_out_of_range_integer_for_string() {
        let mut config = Config::default();
        let result = config.merge(&parse_cmdline("rancher.consoleContainer=99999999999999999999"));

        assert!(result.unwrap_err().is_schema_mismatch());
        assert_eq!(config.console_container, "console");
    }

    #[test]
    fn test_from_tree_rejects_scalar_for_list() {
        let err = ConfigOverlay::from_tree(&parse_cmdline("rancher.dns=8.8.8.8")).unwrap_err();
        assert!(err.is_schema_mismatch());
    }

    #[test]
    fn test_from_tree_rejects_leaf_for_record() {
        let err = ConfigOverlay::from_tree(&parse_cmdline("rancher.state=ext4")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Schema mismatch at 'state': expected mapping, found string"
        );
    }

    #[test]
    fn test_from_tree_rejects_mapping_for_scalar() {
        let err = ConfigOverlay::from_tree(&parse_cmdline("rancher.debug.level=1")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Schema mismatch at 'debug': expected boolean, found mapping"
        );
    }

    #[test]
    fn test_from_tree_rejects_system_containers() {
        let err =
            ConfigOverlay::from_tree(&parse_cmdline("rancher.systemContainers=[udev]")).unwrap_err();
        assert!(err.is_schema_mismatch());
    }

    #[test]
    fn test_from_tree_rejects_leaf_root() {
        let err = ConfigOverlay::from_tree(&OverlayNode::Leaf(CoercedValue::Bool(true))).unwrap_err();
        assert!(err.to_string().contains("<root>"));
    }

    #[test]
    fn test_merge_keeps_absent_fields() {
        let mut config = Config {
            dns: vec!["1.1.1.1".to_string()],
            ..Config::default()
        };
        config.merge(&parse_cmdline("rancher.debug")).unwrap();

        assert!(config.debug);
        assert_eq!(config.dns, vec!["1.1.1.1".to_string()]);
        assert_eq!(config.console_container, "console");
    }

    #[test]
    fn test_merge_replaces_lists_wholesale() {
        let mut config = Config {
            disable: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            ..Config::default()
        };
        config.merge(&parse_cmdline("rancher.disable=[x]")).unwrap();
        assert_eq!(config.disable, vec!["x".to_string()]);
    }

    #[test]
    fn test_merge_nested_records_field_by_field() {
        let mut config = Config::default();
        config.state.fs_type = "ext4".to_string();
        config.state.dev = "/dev/sda1".to_string();

        config.merge(&parse_cmdline("rancher.state.dev=/dev/vda1")).unwrap();

        assert_eq!(config.state.fs_type, "ext4");
        assert_eq!(config.state.dev, "/dev/vda1");
    }

    #[test]
    fn test_merge_failure_leaves_record_untouched() {
        let mut config = Config::default();
        let before = config.clone();

        let result = config.merge(&parse_cmdline(
            "rancher.debug rancher.dns=[8.8.8.8] rancher.state.required=sometimes",
        ));

        assert!(result.is_err());
        assert_eq!(config, before);
    }

    #[test]
    fn test_apply_programmatic_overlay() {
        let mut config = Config::default();
        config.apply(ConfigOverlay {
            system_containers: Some(vec![ContainerConfig {
                id: "syslog".to_string(),
                cmd: Vec::new(),
            }]),
            ..ConfigOverlay::default()
        });
        assert!(config.container_by_id("syslog").is_some());
    }

    #[test]
    fn test_canonical_key_prefers_exact_match() {
        assert_eq!(canonical_key("dns", CONFIG_KEYS), Some("dns"));
        assert_eq!(canonical_key("DNS", CONFIG_KEYS), Some("dns"));
        assert_eq!(canonical_key("dnsx", CONFIG_KEYS), None);
    }
}
