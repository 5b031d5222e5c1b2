//! Ingress edges: who may reach a security boundary, and on which ports.

use groundplan_core::GroupId;
use ipnet::{Ipv4Net, Ipv6Net};
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// Source of permitted traffic
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Peer {
    /// Another security group in the graph
    Group(GroupId),
    /// An IPv4 block
    Ipv4(Ipv4Net),
    /// An IPv6 block
    Ipv6(Ipv6Net),
    /// A provider-managed prefix list, referenced by its external identifier
    PrefixList(String),
}

impl Peer {
    /// Any IPv4 source, `0.0.0.0/0`
    #[must_use]
    pub fn any_ipv4() -> Self {
        Self::Ipv4(Ipv4Net::new(Ipv4Addr::UNSPECIFIED, 0).expect("0 is a valid prefix length"))
    }
}

/// Protocol and port(s) of permitted traffic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PortSpec {
    /// A single TCP port
    Tcp(u16),
    /// An inclusive TCP port range
    TcpRange(u16, u16),
    /// A single UDP port
    Udp(u16),
    /// All TCP ports
    AllTcp,
}

/// One permitted ingress edge.
///
/// Edges are keyed values: two edges with the same (peer, port) are the
/// same edge, regardless of when or by whom they were registered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IngressEdge {
    /// Permitted source
    pub peer: Peer,
    /// Permitted protocol and ports
    pub port: PortSpec,
}

impl IngressEdge {
    /// Create an edge
    #[must_use]
    pub const fn new(peer: Peer, port: PortSpec) -> Self {
        Self { peer, port }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_ipv4() {
        let Peer::Ipv4(net) = Peer::any_ipv4() else {
            panic!("expected an IPv4 peer");
        };
        assert_eq!(net.prefix_len(), 0);
    }

    #[test]
    fn test_edge_keyed_equality() {
        let group = GroupId::from_name("test", "bastion");
        let a = IngressEdge::new(Peer::Group(group), PortSpec::Tcp(22));
        let b = IngressEdge::new(Peer::Group(group), PortSpec::Tcp(22));
        assert_eq!(a, b);

        let c = IngressEdge::new(Peer::Group(group), PortSpec::Tcp(2049));
        assert_ne!(a, c);
    }

    #[test]
    fn test_edge_ord() {
        // Edges must order deterministically for set-based storage
        let a = IngressEdge::new(Peer::any_ipv4(), PortSpec::Tcp(22));
        let b = IngressEdge::new(Peer::any_ipv4(), PortSpec::TcpRange(32768, 65535));
        assert_ne!(a.cmp(&b), std::cmp::Ordering::Equal);
    }
}
