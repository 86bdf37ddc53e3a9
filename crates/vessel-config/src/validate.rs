//! Configuration validation and normalization.
//!
//! [`Validator::validate`] is the gate every configuration passes before any
//! irreversible kernel-level action: it either returns a normalized,
//! runtime-ready configuration or a [`ValidationReport`] listing every
//! violated invariant. Collaborators downstream may assume field
//! combinations are consistent and only need to check environment
//! preconditions (bridge exists, namespace path is mounted).

use std::collections::HashSet;
use std::fmt;

use thiserror::Error;
use tracing::{debug, trace};
use vessel_net::{NetworkError, NetworkKind, RouteError, DEFAULT_VETH_PREFIX};

use crate::config::ContainerConfig;
use crate::registry::{CapabilityRegistry, NamespaceRegistry};

/// Namespace kind a veth network depends on.
const NET_NAMESPACE: &str = "net";

/// One violated invariant, addressed by field path.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Malformed scalar field.
    #[error("{field}: {reason}")]
    Structural {
        /// Path of the offending field.
        field: String,
        /// What the field must look like.
        reason: String,
    },

    /// Namespace kind not in the registry.
    #[error("namespaces: unknown namespace kind: {0:?}")]
    UnknownNamespace(String),

    /// Capability name not in the registry.
    #[error("capabilities[{index}]: unknown capability: {name:?}")]
    UnknownCapability {
        /// Position in the capability list.
        index: usize,
        /// The unrecognized name.
        name: String,
    },

    /// A network descriptor failed validation.
    #[error("networks[{index}]: {source}")]
    Network {
        /// Position in the network list.
        index: usize,
        /// The underlying network error.
        source: NetworkError,
    },

    /// A top-level route failed validation.
    #[error("routes[{index}]: {source}")]
    Route {
        /// Position in the route list.
        index: usize,
        /// The underlying route error.
        source: RouteError,
    },

    /// Cross-field rule: a veth pair without a network namespace is
    /// meaningless.
    #[error("networks[{index}]: veth network requires the net namespace to be isolated")]
    VethWithoutNetNamespace {
        /// Position in the network list.
        index: usize,
    },
}

/// The complete list of invariants a rejected configuration violated.
///
/// Never empty. A caller presents the whole list before attempting any host
/// mutation, so one malformed specification never partially configures a
/// host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    errors: Vec<ValidationError>,
}

impl ValidationReport {
    fn new(errors: Vec<ValidationError>) -> Self {
        debug_assert!(!errors.is_empty(), "a report always carries at least one error");
        Self { errors }
    }

    /// The violations, in validation order.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Number of violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Always false; kept for iterator-style callers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Consumes the report, yielding the violations.
    #[must_use]
    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "configuration rejected with {} violation(s):", self.errors.len())?;
        for error in &self.errors {
            write!(f, "\n  - {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationReport {}

/// Validates container configurations against fixed registries.
///
/// Pure function of (configuration, registries): no I/O, no shared state,
/// safe to call concurrently on distinct configurations.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    namespaces: NamespaceRegistry,
    capabilities: CapabilityRegistry,
}

impl Validator {
    /// Builds a validator over custom registries.
    #[must_use]
    pub fn new(namespaces: NamespaceRegistry, capabilities: CapabilityRegistry) -> Self {
        Self { namespaces, capabilities }
    }

    /// Validates and normalizes a configuration.
    ///
    /// Passes run in order: structural field checks (fail fast, since later
    /// checks assume well-formed strings), then enumeration membership,
    /// per-network and top-level route checks, and cross-field consistency,
    /// all collected so one pass reports everything. On success the
    /// returned configuration is the effective one: empty veth prefixes
    /// default to [`DEFAULT_VETH_PREFIX`], duplicate capabilities collapse
    /// to their first occurrence, and MTU 0 stays 0 ("system default",
    /// resolved by the network collaborator, not here).
    ///
    /// Validating an already-effective configuration again yields it
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationReport`] listing every violated invariant.
    /// Either the whole configuration is accepted or none of it is.
    pub fn validate(&self, config: ContainerConfig) -> Result<ContainerConfig, ValidationReport> {
        if let Err(error) = check_structure(&config) {
            debug!(%error, "configuration rejected");
            return Err(ValidationReport::new(vec![error]));
        }

        let mut errors = Vec::new();
        self.check_enumerations(&config, &mut errors);
        check_networks(&config, &mut errors);
        check_routes(&config, &mut errors);
        check_consistency(&config, &mut errors);

        if !errors.is_empty() {
            debug!(violations = errors.len(), "configuration rejected");
            return Err(ValidationReport::new(errors));
        }

        let effective = normalize(config);
        trace!(root_fs = %effective.root_fs, "configuration accepted");
        Ok(effective)
    }

    fn check_enumerations(&self, config: &ContainerConfig, errors: &mut Vec<ValidationError>) {
        for kind in config.namespaces.keys() {
            if !self.namespaces.contains(kind) {
                errors.push(ValidationError::UnknownNamespace(kind.clone()));
            }
        }
        for (index, name) in config.capabilities.iter().enumerate() {
            if !self.capabilities.contains(name) {
                errors.push(ValidationError::UnknownCapability { index, name: name.clone() });
            }
        }
    }
}

fn structural(field: impl Into<String>, reason: impl Into<String>) -> ValidationError {
    ValidationError::Structural { field: field.into(), reason: reason.into() }
}

fn check_structure(config: &ContainerConfig) -> Result<(), ValidationError> {
    if config.root_fs.is_empty() {
        return Err(structural("root_fs", "must not be empty"));
    }
    if config.root_fs == "/" {
        return Err(structural("root_fs", "must not be the host root"));
    }
    if !config.working_dir.is_empty() && !config.working_dir.starts_with('/') {
        return Err(structural("working_dir", "must be an absolute path"));
    }
    for (index, entry) in config.env.iter().enumerate() {
        match entry.split_once('=') {
            Some((key, _)) if !key.is_empty() => {}
            _ => {
                return Err(structural(
                    format!("environment[{index}]"),
                    "must be KEY=VALUE with a non-empty key",
                ));
            }
        }
    }
    if let Some((uid, gid)) = config.user.split_once(':') {
        if uid.is_empty() || gid.is_empty() || gid.contains(':') {
            return Err(structural("user", "must be uid[:gid] or a user name"));
        }
    }
    Ok(())
}

fn check_networks(config: &ContainerConfig, errors: &mut Vec<ValidationError>) {
    // Independent interfaces are independent concerns: every network is
    // checked and every violation reported.
    for (index, network) in config.networks.iter().enumerate() {
        if let Err(violations) = network.validate() {
            errors.extend(
                violations
                    .into_iter()
                    .map(|source| ValidationError::Network { index, source }),
            );
        }
    }
}

fn check_routes(config: &ContainerConfig, errors: &mut Vec<ValidationError>) {
    for (index, route) in config.routes.iter().enumerate() {
        if let Err(source) = route.validate() {
            errors.push(ValidationError::Route { index, source });
        }
    }
}

fn check_consistency(config: &ContainerConfig, errors: &mut Vec<ValidationError>) {
    let net_isolated = config.namespaces.get(NET_NAMESPACE).copied().unwrap_or(false);
    if net_isolated {
        return;
    }
    for (index, network) in config.networks.iter().enumerate() {
        if network.kind == NetworkKind::Veth {
            errors.push(ValidationError::VethWithoutNetNamespace { index });
        }
    }
}

fn normalize(mut config: ContainerConfig) -> ContainerConfig {
    for network in &mut config.networks {
        if network.kind == NetworkKind::Veth && network.veth_prefix.is_empty() {
            network.veth_prefix = DEFAULT_VETH_PREFIX.to_string();
        }
    }

    // Namespace entries are a map and deduplicate by construction; the
    // capability list keeps its first occurrence of each name.
    let mut seen = HashSet::new();
    config.capabilities.retain(|name| seen.insert(name.clone()));

    config
}
