//! Error types for network configuration validation.

use thiserror::Error;

/// Errors produced by [`Route::validate`](crate::Route::validate).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RouteError {
    /// All of destination, source, and gateway are empty.
    #[error("route must set at least one of destination, source, or gateway")]
    MissingEndpoint,

    /// Two or more endpoints resolve to different address families.
    #[error("route {field} mixes address families with an earlier endpoint: {value}")]
    MixedFamily {
        /// Endpoint field that disagrees with the first parsed endpoint.
        field: &'static str,
        /// Offending value.
        value: String,
    },

    /// An endpoint failed CIDR/address parsing.
    #[error("unparseable route {field}: {value}")]
    UnparseableAddress {
        /// Endpoint field that failed to parse.
        field: &'static str,
        /// Offending value.
        value: String,
    },
}

/// Errors produced by [`Network::validate`](crate::Network::validate).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NetworkError {
    /// Network type is not in the supported enumeration.
    #[error("unknown network type: {0:?}")]
    UnknownType(String),

    /// Veth networks must name the bridge to attach the host side to.
    #[error("veth network requires a bridge")]
    MissingBridge,

    /// An interface address failed CIDR parsing.
    #[error("unparseable interface address addresses[{index}]: {value}")]
    InvalidAddress {
        /// Position in the address list.
        index: usize,
        /// Offending value.
        value: String,
    },

    /// MAC address is not six colon-separated hex octets.
    #[error("invalid mac address: {0}")]
    InvalidMacAddress(String),

    /// MTU does not apply to loopback interfaces.
    #[error("mtu is not supported on loopback networks (got {0})")]
    MtuOnLoopback(u32),

    /// A route entry failed validation.
    #[error("routes[{index}]: {source}")]
    InvalidRoute {
        /// Position in the route list.
        index: usize,
        /// The underlying route error.
        source: RouteError,
    },
}
