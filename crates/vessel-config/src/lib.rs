//! # vessel-config
//!
//! Declarative launch configuration for vessel containers.
//!
//! This crate is the layer between "what the caller asked for" and "what
//! the kernel is told to do": it defines the [`ContainerConfig`] aggregate
//! (filesystem root, namespaces, capabilities, networks, routes, process
//! parameters) and the [`Validator`] that decides whether a requested
//! configuration is internally consistent before any irreversible host
//! mutation happens.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │                  vessel-config                   │
//! │  ┌──────────────────────────────────────────┐    │
//! │  │            ContainerConfig               │    │
//! │  │  root_fs, namespaces, capabilities,      │    │
//! │  │  networks/routes (vessel-net), opaque    │    │
//! │  │  mount + cgroup sections                 │    │
//! │  └──────────────────┬───────────────────────┘    │
//! │                     ▼                            │
//! │  ┌──────────────────────────────────────────┐    │
//! │  │     Validator (+ fixed registries)       │    │
//! │  │  effective config  │  ValidationReport   │    │
//! │  └──────────────────────────────────────────┘    │
//! └──────────────────────────────────────────────────┘
//!            │ effective configuration
//!            ▼
//!   runtime collaborators (namespaces, cgroups, veth, mounts)
//! ```
//!
//! The crate performs no host mutation and holds no state: validation is a
//! pure, synchronous function, safe to run concurrently on distinct
//! configurations.

#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod registry;
pub mod validate;

pub use config::{CgroupConfig, ContainerConfig, MountConfig};
pub use error::{ConfigError, Result};
pub use registry::{CapabilityRegistry, NamespaceRegistry};
pub use validate::{ValidationError, ValidationReport, Validator};

// Re-exported so callers can build a full configuration from one crate.
pub use vessel_net::{Network, NetworkError, NetworkKind, NetworkState, Route, RouteError};
