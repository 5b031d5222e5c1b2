//! Groundplan Security Policy Graph
//!
//! A directed graph of named security boundaries and the ingress edges
//! (peer, protocol, port) permitted between them. The graph is built once
//! against a VPC, seeded from the standard deployment template, and then
//! extended by any number of independent resource constructors. Edge
//! insertion is set union: idempotent, and commutative across callers.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod graph;
pub mod ingress;
pub mod template;

pub use graph::{PolicyError, SecurityGroup, SecurityPolicyGraph};
pub use ingress::{IngressEdge, Peer, PortSpec};
pub use template::StandardGroup;
