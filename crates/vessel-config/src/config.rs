//! Container launch configuration.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use vessel_net::{Network, Route};

use crate::error::Result;

/// Opaque mount configuration, passed through unchanged to the mount
/// collaborator. The core only inspects presence or absence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MountConfig(pub serde_json::Value);

/// Opaque cgroup configuration, passed through unchanged to the
/// resource-control collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CgroupConfig(pub serde_json::Value);

/// Configuration for executing a process inside a contained environment.
///
/// This is the aggregate root a caller builds (or deserializes) once per
/// launch, runs through the [`Validator`](crate::Validator), and hands to
/// the runtime collaborators. It owns every nested descriptor; cloning the
/// configuration clones the whole tree.
///
/// Every field except `root_fs` is optional on the wire, and omission means
/// the documented zero value, never an error. An absent mount, cgroup, or
/// network section means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerConfig {
    /// Mount-specific options, opaque to this crate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mount_config: Option<MountConfig>,

    /// Path to the container's root filesystem. Required; must not be the
    /// host root.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub root_fs: String,

    /// Hostname to set inside the container, when non-empty.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub hostname: String,

    /// User the process runs as, in `uid[:gid]` or name form.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user: String,

    /// Working directory inside the container's rootfs. Must be absolute
    /// when set.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub working_dir: String,

    /// Process environment as ordered `KEY=VALUE` entries. Replaces the
    /// inherited environment entirely; nothing from the parent survives.
    #[serde(rename = "environment", default, skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<String>,

    /// Allocate a pty on the host and mount it inside the rootfs.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub tty: bool,

    /// Namespace kinds to isolate when cloning the init process. A kind
    /// that is absent (or mapped to false) stays shared with the parent.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub namespaces: BTreeMap<String, bool>,

    /// Capabilities to keep for the contained process. Everything not
    /// listed is dropped from the capability mask.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub capabilities: Vec<String>,

    /// Network interfaces to create for the container.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub networks: Vec<Network>,

    /// Route table entries to install at launch, independent of any one
    /// interface.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<Route>,

    /// Cgroup settings limiting the container's resources, opaque to this
    /// crate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cgroups: Option<CgroupConfig>,

    /// AppArmor profile applied when the process is execed.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub apparmor_profile: String,

    /// SELinux label applied to the contained process.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub process_label: String,

    /// Remount /proc/sys and /sys read-only and mask sysrq-trigger,
    /// /proc/irq, and /proc/bus.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub restrict_sys: bool,
}

impl ContainerConfig {
    /// Creates a configuration rooted at `root_fs` with everything else at
    /// its zero value.
    #[must_use]
    pub fn new(root_fs: impl Into<String>) -> Self {
        Self { root_fs: root_fs.into(), ..Default::default() }
    }

    /// Parses a configuration from a JSON string.
    ///
    /// Parsing does not validate; run the result through a
    /// [`Validator`](crate::Validator) before acting on it.
    ///
    /// # Errors
    ///
    /// Returns an error when the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the configuration to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error when serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Loads a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Serializes the configuration and writes it to a file.
    ///
    /// # Errors
    ///
    /// Returns an error when serialization or the write fails.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
