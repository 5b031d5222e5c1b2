//! Groundplan Topology Builder
//!
//! Synthesizes a validated, deterministic network topology from compact
//! configuration: a VPC with availability-zone-sharded public/private/
//! isolated subnets, derived IPv6 ranges, per-subnet route tables, the
//! baseline network ACL, and a uniform NAT strategy. All validation runs
//! before any entity exists; a failed build emits nothing.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod acl;
pub mod builder;
pub mod config;
pub mod nat;
pub mod route;
pub mod subnet;
pub mod topology;

pub use acl::{AclAction, AclDirection, AclEntry, AclPeer, NetworkAcl, PortRange};
pub use builder::{TopologyBuilder, TopologyError};
pub use config::{CidrConfig, NatConfig, NatInstanceIngress, SubnetDivision, TopologyConfig};
pub use nat::{NatBoundaryIngress, NatGateway, NatInstance, NatResources, NatSecurityBoundary, NatStrategy};
pub use route::{Destination, Route, RouteTable, RouteTarget};
pub use subnet::Subnet;
pub use topology::{Topology, Vpc};
