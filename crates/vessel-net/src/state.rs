//! Runtime-derived network state.

use serde::{Deserialize, Serialize};

/// Interface names and namespace path the runtime actually created for one
/// [`Network`](crate::Network) descriptor.
///
/// This record is owned and produced by the runtime; it is never part of a
/// declared configuration and must not be accepted as input to validation.
/// It exists so the runtime can persist what it built and tear it down
/// later.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkState {
    /// Name of the veth interface on the host side.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub veth_host: String,

    /// Name of the veth interface created inside the container.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub veth_child: String,

    /// Resolved network namespace path.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ns_path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let state = NetworkState {
            veth_host: "veth1a2b3c".to_string(),
            veth_child: "eth0".to_string(),
            ns_path: "/var/run/netns/c1".to_string(),
        };
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"veth_host\":\"veth1a2b3c\""));
        let back: NetworkState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn test_empty_fields_omitted() {
        let json = serde_json::to_string(&NetworkState::default()).unwrap();
        assert_eq!(json, "{}");
    }
}
