//! # vessel-net
//!
//! Network configuration primitives for vessel containers.
//!
//! This crate defines the *declared* shape of a container's networking:
//!
//! - **[`Route`]**: one routing table entry (destination/source/gateway)
//! - **[`Network`]**: desired state for one interface (veth, loopback, netns)
//! - **[`NetworkState`]**: what the runtime actually created (output-only)
//!
//! Validation here is pure: no host is touched, no interface is created.
//! The functions answer one question — is this descriptor internally
//! consistent? — so the collaborator that applies it to the kernel only has
//! to check environment preconditions (the bridge exists, the namespace
//! path is mounted), never field combinations.

#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod network;
pub mod route;
pub mod state;

pub use error::{NetworkError, RouteError};
pub use network::{Network, NetworkKind, DEFAULT_VETH_PREFIX};
pub use route::Route;
pub use state::NetworkState;
