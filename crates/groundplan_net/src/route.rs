//! Route tables and routes.
//!
//! Each subnet exclusively owns one route table; the table owns its routes.

use groundplan_core::{GatewayId, InstanceId, NatGatewayId, RouteTableId, Tags};
use ipnet::{Ipv4Net, Ipv6Net};
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, Ipv6Addr};

/// Destination of a route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Destination {
    /// IPv4 destination block
    Ipv4(Ipv4Net),
    /// IPv6 destination block
    Ipv6(Ipv6Net),
}

impl Destination {
    /// The IPv4 default route destination, `0.0.0.0/0`
    #[must_use]
    pub fn any_ipv4() -> Self {
        Self::Ipv4(Ipv4Net::new(Ipv4Addr::UNSPECIFIED, 0).expect("0 is a valid prefix length"))
    }

    /// The IPv6 default route destination, `::/0`
    #[must_use]
    pub fn any_ipv6() -> Self {
        Self::Ipv6(Ipv6Net::new(Ipv6Addr::UNSPECIFIED, 0).expect("0 is a valid prefix length"))
    }

    /// Whether this is a default (zero-prefix) destination
    #[must_use]
    pub fn is_default(&self) -> bool {
        match self {
            Self::Ipv4(net) => net.prefix_len() == 0,
            Self::Ipv6(net) => net.prefix_len() == 0,
        }
    }
}

/// Where a route sends its traffic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteTarget {
    /// The internet gateway
    InternetGateway(GatewayId),
    /// The egress-only internet gateway (IPv6 outbound only)
    EgressOnlyGateway(GatewayId),
    /// A NAT gateway
    NatGateway(NatGatewayId),
    /// A NAT instance
    Instance(InstanceId),
}

/// A single route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Traffic matching this destination...
    pub destination: Destination,
    /// ...is sent to this target
    pub target: RouteTarget,
}

/// A route table, exclusively owned by one subnet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTable {
    /// Table identifier
    pub id: RouteTableId,
    /// Tags
    pub tags: Tags,
    /// Routes, in insertion order
    pub routes: Vec<Route>,
}

impl RouteTable {
    /// Create an empty route table
    #[must_use]
    pub fn new(id: RouteTableId, tags: Tags) -> Self {
        Self {
            id,
            tags,
            routes: Vec::new(),
        }
    }

    /// Append a route
    pub fn add_route(&mut self, destination: Destination, target: RouteTarget) {
        self.routes.push(Route {
            destination,
            target,
        });
    }

    /// Whether the table carries an IPv4 default route
    #[must_use]
    pub fn has_default_ipv4(&self) -> bool {
        self.routes
            .iter()
            .any(|r| matches!(r.destination, Destination::Ipv4(_)) && r.destination.is_default())
    }

    /// Whether the table carries an IPv6 default route
    #[must_use]
    pub fn has_default_ipv6(&self) -> bool {
        self.routes
            .iter()
            .any(|r| matches!(r.destination, Destination::Ipv6(_)) && r.destination.is_default())
    }
}
