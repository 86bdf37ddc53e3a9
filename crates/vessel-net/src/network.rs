//! Network interface descriptors.

use std::fmt;

use ipnetwork::IpNetwork;
use serde::{Deserialize, Serialize};

use crate::error::NetworkError;
use crate::route::Route;

/// Default prefix for generated veth interface names.
pub const DEFAULT_VETH_PREFIX: &str = "veth";

/// Supported network types.
///
/// Unrecognized values are carried through serialization as
/// [`NetworkKind::Unknown`] so that configurations written by newer callers
/// still round-trip; they are rejected at validation time, not at parse
/// time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NetworkKind {
    /// Veth pair bridged to the host.
    Veth,
    /// Loopback interface inside the container's namespace.
    Loopback,
    /// Join an existing network namespace by path.
    Netns,
    /// Not in the supported enumeration.
    Unknown(String),
}

impl NetworkKind {
    /// Wire representation of the kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Veth => "veth",
            Self::Loopback => "loopback",
            Self::Netns => "netns",
            Self::Unknown(s) => s,
        }
    }

    fn is_unset(&self) -> bool {
        matches!(self, Self::Unknown(s) if s.is_empty())
    }
}

impl Default for NetworkKind {
    fn default() -> Self {
        Self::Unknown(String::new())
    }
}

impl fmt::Display for NetworkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for NetworkKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "veth" => Self::Veth,
            "loopback" => Self::Loopback,
            "netns" => Self::Netns,
            _ => Self::Unknown(s),
        }
    }
}

impl From<NetworkKind> for String {
    fn from(kind: NetworkKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Desired state for one container network interface.
///
/// Empty strings mean "not set". MTU 0 means "use the system default" and
/// is left unresolved here; resolving it against the host is the network
/// collaborator's job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    /// Network type, commonly veth or loopback.
    #[serde(rename = "type", default, skip_serializing_if = "NetworkKind::is_unset")]
    pub kind: NetworkKind,

    /// Path to an existing network namespace to join.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ns_path: String,

    /// Bridge the host side of a veth pair attaches to.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub bridge: String,

    /// Prefix for generated veth interface names. Empty is normalized to
    /// [`DEFAULT_VETH_PREFIX`].
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub veth_prefix: String,

    /// MAC address to assign, six colon-separated hex octets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,

    /// IPv4 and/or IPv6 addresses with mask to set on the interface.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<String>,

    /// Routes to install for this interface.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<Route>,

    /// MTU for the interface, mirrored on both halves of a veth pair.
    /// 0 means system default. Does not apply to loopback.
    #[serde(default, skip_serializing_if = "mtu_is_default")]
    pub mtu: u32,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn mtu_is_default(mtu: &u32) -> bool {
    *mtu == 0
}

impl Network {
    /// Creates a veth network attached to `bridge`.
    #[must_use]
    pub fn veth(bridge: impl Into<String>) -> Self {
        Self { kind: NetworkKind::Veth, bridge: bridge.into(), ..Default::default() }
    }

    /// Creates a loopback network.
    #[must_use]
    pub fn loopback() -> Self {
        Self { kind: NetworkKind::Loopback, ..Default::default() }
    }

    /// Creates a network that joins the namespace at `ns_path`.
    #[must_use]
    pub fn netns(ns_path: impl Into<String>) -> Self {
        Self { kind: NetworkKind::Netns, ns_path: ns_path.into(), ..Default::default() }
    }

    /// Validates the descriptor, returning every violation.
    ///
    /// Route errors are aggregated across the whole route list rather than
    /// stopping at the first bad entry, so one pass reports everything a
    /// caller has to fix.
    ///
    /// # Errors
    ///
    /// Returns the non-empty list of violations; see [`NetworkError`].
    pub fn validate(&self) -> Result<(), Vec<NetworkError>> {
        let mut errors = Vec::new();

        match &self.kind {
            NetworkKind::Veth => {
                if self.bridge.is_empty() {
                    errors.push(NetworkError::MissingBridge);
                }
            }
            NetworkKind::Loopback => {
                if self.mtu != 0 {
                    errors.push(NetworkError::MtuOnLoopback(self.mtu));
                }
            }
            NetworkKind::Netns => {}
            NetworkKind::Unknown(s) => {
                errors.push(NetworkError::UnknownType(s.clone()));
            }
        }

        for (index, address) in self.addresses.iter().enumerate() {
            if address.parse::<IpNetwork>().is_err() {
                errors.push(NetworkError::InvalidAddress { index, value: address.clone() });
            }
        }

        if let Some(mac) = &self.mac_address {
            if !is_valid_mac(mac) {
                errors.push(NetworkError::InvalidMacAddress(mac.clone()));
            }
        }

        for (index, route) in self.routes.iter().enumerate() {
            if let Err(source) = route.validate() {
                errors.push(NetworkError::InvalidRoute { index, source });
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn is_valid_mac(mac: &str) -> bool {
    let mut octets = 0;
    for part in mac.split(':') {
        if part.len() != 2 || !part.chars().all(|c| c.is_ascii_hexdigit()) {
            return false;
        }
        octets += 1;
    }
    octets == 6
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RouteError;

    #[test]
    fn test_veth_without_bridge_rejected() {
        let network = Network { kind: NetworkKind::Veth, ..Default::default() };
        assert_eq!(network.validate(), Err(vec![NetworkError::MissingBridge]));
    }

    #[test]
    fn test_veth_with_bridge_accepted() {
        let network = Network::veth("docker0");
        assert!(network.validate().is_ok());
    }

    #[test]
    fn test_unknown_type_rejected() {
        let network = Network {
            kind: NetworkKind::Unknown("macvlan".to_string()),
            ..Default::default()
        };
        assert_eq!(
            network.validate(),
            Err(vec![NetworkError::UnknownType("macvlan".to_string())])
        );
    }

    #[test]
    fn test_unset_type_rejected_as_unknown() {
        let network = Network::default();
        assert_eq!(network.validate(), Err(vec![NetworkError::UnknownType(String::new())]));
    }

    #[test]
    fn test_loopback_mtu_rejected() {
        let network = Network { mtu: 1500, ..Network::loopback() };
        assert_eq!(network.validate(), Err(vec![NetworkError::MtuOnLoopback(1500)]));
    }

    #[test]
    fn test_loopback_default_mtu_accepted() {
        assert!(Network::loopback().validate().is_ok());
    }

    #[test]
    fn test_bad_address_rejected_with_index() {
        let network = Network {
            addresses: vec!["10.0.3.2/24".to_string(), "bogus".to_string()],
            ..Network::veth("br0")
        };
        assert_eq!(
            network.validate(),
            Err(vec![NetworkError::InvalidAddress { index: 1, value: "bogus".to_string() }])
        );
    }

    #[test]
    fn test_mac_address_syntax() {
        let mut network = Network::veth("br0");
        network.mac_address = Some("02:42:ac:11:00:02".to_string());
        assert!(network.validate().is_ok());

        network.mac_address = Some("02:42:ac:11:00".to_string());
        assert_eq!(
            network.validate(),
            Err(vec![NetworkError::InvalidMacAddress("02:42:ac:11:00".to_string())])
        );
    }

    #[test]
    fn test_route_errors_are_aggregated() {
        let network = Network {
            routes: vec![
                Route::default(),
                Route { gateway: "10.0.3.1".to_string(), ..Default::default() },
                Route { destination: "junk".to_string(), ..Default::default() },
            ],
            ..Network::veth("br0")
        };
        assert_eq!(
            network.validate(),
            Err(vec![
                NetworkError::InvalidRoute { index: 0, source: RouteError::MissingEndpoint },
                NetworkError::InvalidRoute {
                    index: 2,
                    source: RouteError::UnparseableAddress {
                        field: "destination",
                        value: "junk".to_string()
                    }
                },
            ])
        );
    }

    #[test]
    fn test_unknown_kind_round_trips() {
        let network = Network {
            kind: NetworkKind::Unknown("wireguard".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&network).unwrap();
        assert!(json.contains("\"type\":\"wireguard\""));

        let back: Network = serde_json::from_str(&json).unwrap();
        assert_eq!(back.kind, NetworkKind::Unknown("wireguard".to_string()));
    }

    #[test]
    fn test_wire_names() {
        let json = r#"{
            "type": "veth",
            "bridge": "vessel0",
            "veth_prefix": "vs",
            "ns_path": "",
            "addresses": ["172.17.0.2/16"],
            "mtu": 1500
        }"#;
        let network: Network = serde_json::from_str(json).unwrap();
        assert_eq!(network.kind, NetworkKind::Veth);
        assert_eq!(network.bridge, "vessel0");
        assert_eq!(network.veth_prefix, "vs");
        assert_eq!(network.mtu, 1500);
        assert!(network.validate().is_ok());
    }

    #[test]
    fn test_default_mtu_omitted_from_wire() {
        let json = serde_json::to_string(&Network::veth("br0")).unwrap();
        assert!(!json.contains("mtu"));
    }
}
