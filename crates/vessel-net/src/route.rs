//! Route table entry descriptors.

use std::net::IpAddr;

use ipnetwork::IpNetwork;
use serde::{Deserialize, Serialize};

use crate::error::RouteError;

/// One desired entry in the container's routing table.
///
/// Endpoints use an empty string for "not set". Destination and source are
/// CIDR networks; the gateway is a bare address. A route is meaningful as
/// soon as one endpoint is present, so validation only requires
/// at-least-one, plus a single address family across whatever is set.
///
/// Routes attach either to a [`Network`](crate::Network) or directly to the
/// container configuration (applying independent of any one interface).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Destination network in CIDR form. Empty means not set.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub destination: String,

    /// Source network in CIDR form. Empty means not set.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub source: String,

    /// Gateway address. Empty means not set.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub gateway: String,

    /// Interface the route binds to. Empty means "whichever interface the
    /// runtime picks".
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub interface: String,
}

/// Address family of a parsed endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    V4,
    V6,
}

impl From<&IpNetwork> for Family {
    fn from(net: &IpNetwork) -> Self {
        match net {
            IpNetwork::V4(_) => Self::V4,
            IpNetwork::V6(_) => Self::V6,
        }
    }
}

impl From<&IpAddr> for Family {
    fn from(addr: &IpAddr) -> Self {
        match addr {
            IpAddr::V4(_) => Self::V4,
            IpAddr::V6(_) => Self::V6,
        }
    }
}

impl Route {
    /// Validates the route.
    ///
    /// Pure function of the value; no side effects.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::MissingEndpoint`] when destination, source, and
    /// gateway are all empty, [`RouteError::UnparseableAddress`] when a set
    /// endpoint fails parsing, and [`RouteError::MixedFamily`] when set
    /// endpoints span both IPv4 and IPv6.
    pub fn validate(&self) -> Result<(), RouteError> {
        if self.destination.is_empty() && self.source.is_empty() && self.gateway.is_empty() {
            return Err(RouteError::MissingEndpoint);
        }

        let mut family: Option<Family> = None;
        for (field, value) in [("destination", &self.destination), ("source", &self.source)] {
            if value.is_empty() {
                continue;
            }
            let net: IpNetwork = value
                .parse()
                .map_err(|_| RouteError::UnparseableAddress { field, value: value.clone() })?;
            check_family(&mut family, Family::from(&net), field, value)?;
        }

        if !self.gateway.is_empty() {
            let addr: IpAddr = self.gateway.parse().map_err(|_| RouteError::UnparseableAddress {
                field: "gateway",
                value: self.gateway.clone(),
            })?;
            check_family(&mut family, Family::from(&addr), "gateway", &self.gateway)?;
        }

        Ok(())
    }
}

fn check_family(
    seen: &mut Option<Family>,
    family: Family,
    field: &'static str,
    value: &str,
) -> Result<(), RouteError> {
    match seen {
        None => {
            *seen = Some(family);
            Ok(())
        }
        Some(first) if *first == family => Ok(()),
        Some(_) => Err(RouteError::MixedFamily { field, value: value.to_string() }),
    }
}
