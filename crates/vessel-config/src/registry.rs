//! Read-only registries of known namespace kinds and capability names.
//!
//! The validator is a pure function of (configuration, registries): the
//! registries are built once at process start and never mutated afterwards,
//! so validation needs no locking and tests can inject custom sets.

use std::collections::BTreeSet;

/// Namespace kinds a configuration may ask to isolate.
const NAMESPACE_KINDS: &[&str] = &["pid", "net", "ipc", "uts", "mnt", "user"];

/// Capability names a configuration may keep.
const CAPABILITY_NAMES: &[&str] = &[
    "CAP_AUDIT_CONTROL",
    "CAP_AUDIT_READ",
    "CAP_AUDIT_WRITE",
    "CAP_BLOCK_SUSPEND",
    "CAP_CHOWN",
    "CAP_DAC_OVERRIDE",
    "CAP_DAC_READ_SEARCH",
    "CAP_FOWNER",
    "CAP_FSETID",
    "CAP_IPC_LOCK",
    "CAP_IPC_OWNER",
    "CAP_KILL",
    "CAP_LEASE",
    "CAP_LINUX_IMMUTABLE",
    "CAP_MAC_ADMIN",
    "CAP_MAC_OVERRIDE",
    "CAP_MKNOD",
    "CAP_NET_ADMIN",
    "CAP_NET_BIND_SERVICE",
    "CAP_NET_BROADCAST",
    "CAP_NET_RAW",
    "CAP_SETFCAP",
    "CAP_SETGID",
    "CAP_SETPCAP",
    "CAP_SETUID",
    "CAP_SYSLOG",
    "CAP_SYS_ADMIN",
    "CAP_SYS_BOOT",
    "CAP_SYS_CHROOT",
    "CAP_SYS_MODULE",
    "CAP_SYS_NICE",
    "CAP_SYS_PACCT",
    "CAP_SYS_PTRACE",
    "CAP_SYS_RAWIO",
    "CAP_SYS_RESOURCE",
    "CAP_SYS_TIME",
    "CAP_SYS_TTY_CONFIG",
    "CAP_WAKE_ALARM",
];

/// The fixed set of namespace kinds the validator accepts.
#[derive(Debug, Clone)]
pub struct NamespaceRegistry {
    kinds: BTreeSet<String>,
}

impl NamespaceRegistry {
    /// Builds a registry over a custom kind set.
    #[must_use]
    pub fn new<I, S>(kinds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { kinds: kinds.into_iter().map(Into::into).collect() }
    }

    /// Whether `kind` is a known namespace kind.
    #[must_use]
    pub fn contains(&self, kind: &str) -> bool {
        self.kinds.contains(kind)
    }

    /// Iterates the known kinds in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.kinds.iter().map(String::as_str)
    }
}

impl Default for NamespaceRegistry {
    fn default() -> Self {
        Self::new(NAMESPACE_KINDS.iter().copied())
    }
}

/// The fixed set of capability names the validator accepts.
#[derive(Debug, Clone)]
pub struct CapabilityRegistry {
    names: BTreeSet<String>,
}

impl CapabilityRegistry {
    /// Builds a registry over a custom name set.
    #[must_use]
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { names: names.into_iter().map(Into::into).collect() }
    }

    /// Whether `name` is a known capability.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Iterates the known names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl Default for CapabilityRegistry {
    fn default() -> Self {
        Self::new(CAPABILITY_NAMES.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_namespace_kinds() {
        let registry = NamespaceRegistry::default();
        for kind in ["pid", "net", "ipc", "uts", "mnt", "user"] {
            assert!(registry.contains(kind), "{kind} should be known");
        }
        assert!(!registry.contains("cgroup"));
        assert!(!registry.contains("network"));
    }

    #[test]
    fn test_default_capabilities() {
        let registry = CapabilityRegistry::default();
        assert!(registry.contains("CAP_NET_ADMIN"));
        assert!(registry.contains("CAP_SYS_ADMIN"));
        assert!(!registry.contains("NET_ADMIN"));
        assert!(!registry.contains("CAP_DOES_NOT_EXIST"));
    }

    #[test]
    fn test_custom_sets() {
        let registry = NamespaceRegistry::new(["net"]);
        assert!(registry.contains("net"));
        assert!(!registry.contains("pid"));
        assert_eq!(registry.iter().collect::<Vec<_>>(), vec!["net"]);
    }
}
