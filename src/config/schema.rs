//! Configuration schema types
//!
//! The record handed to the rest of the bootstrap pipeline. External key
//! names are camelCase and shared by the command line overlay and the dump.

use serde::{Deserialize, Serialize};

use super::defaults::default_console_container;
use crate::domain::Result;

/// Main bootstrap configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Id of the container providing the console
    #[serde(skip_serializing_if = "String::is_empty")]
    pub console_container: String,

    /// Verbose logging
    pub debug: bool,

    /// Services or containers to leave disabled
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub disable: Vec<String>,

    /// Nameservers
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dns: Vec<String>,

    /// Boot into the rescue container
    pub rescue: bool,

    /// Container started in rescue mode
    pub rescue_container: ContainerConfig,

    /// Persistent state filesystem
    pub state: StateConfig,

    /// Containers run by the system docker daemon
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub system_containers: Vec<ContainerConfig>,

    /// Extra arguments for the system docker daemon
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub system_docker_args: Vec<String>,

    /// Kernel modules to load
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub modules: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            console_container: default_console_container(),
            debug: false,
            disable: Vec::new(),
            dns: Vec::new(),
            rescue: false,
            rescue_container: ContainerConfig::default(),
            state: StateConfig::default(),
            system_containers: Vec::new(),
            system_docker_args: Vec::new(),
            modules: Vec::new(),
        }
    }
}

impl Config {
    /// Finds a system container by id
    pub fn container_by_id(&self, id: &str) -> Option<&ContainerConfig> {
        self.system_containers.iter().find(|c| c.id == id)
    }

    /// Renders the record as indented JSON for diagnostics
    ///
    /// Keys follow field declaration order. Empty strings and lists are left
    /// out. Booleans are always printed, `false` included, so `debug`,
    /// `rescue` and `state.required` appear in every dump. The output is not
    /// meant to be read back.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Serialization`](crate::domain::ConfigError::Serialization)
    /// if encoding fails.
    pub fn dump(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A container definition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// Container id
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// Command line to run
    #[serde(rename = "run", skip_serializing_if = "Vec::is_empty")]
    pub cmd: Vec<String>,
}

/// State partition settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StateConfig {
    /// Filesystem type of the state device
    #[serde(skip_serializing_if = "String::is_empty")]
    pub fs_type: String,

    /// State device, e.g. `LABEL=RANCHER_STATE`
    #[serde(skip_serializing_if = "String::is_empty")]
    pub dev: String,

    /// Fail the boot when the state device is missing
    pub required: bool,
}
