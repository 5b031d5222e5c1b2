//! Network ACL and its baseline entries.

use groundplan_core::NetworkAclId;
use ipnet::{Ipv4Net, Ipv6Net};
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, Ipv6Addr};

/// Direction of an ACL entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AclDirection {
    /// Inbound traffic
    Ingress,
    /// Outbound traffic
    Egress,
}

/// Verdict of an ACL entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AclAction {
    /// Allow matching traffic
    Allow,
    /// Deny matching traffic
    Deny,
}

/// Address block an ACL entry matches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AclPeer {
    /// IPv4 block
    Ipv4(Ipv4Net),
    /// IPv6 block
    Ipv6(Ipv6Net),
}

impl AclPeer {
    /// All IPv4 addresses, `0.0.0.0/0`
    #[must_use]
    pub fn any_ipv4() -> Self {
        Self::Ipv4(Ipv4Net::new(Ipv4Addr::UNSPECIFIED, 0).expect("0 is a valid prefix length"))
    }

    /// All IPv6 addresses, `::/0`
    #[must_use]
    pub fn any_ipv6() -> Self {
        Self::Ipv6(Ipv6Net::new(Ipv6Addr::UNSPECIFIED, 0).expect("0 is a valid prefix length"))
    }
}

/// Inclusive TCP port range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortRange {
    /// First port
    pub from: u16,
    /// Last port
    pub to: u16,
}

impl PortRange {
    /// A single port
    #[must_use]
    pub const fn single(port: u16) -> Self {
        Self {
            from: port,
            to: port,
        }
    }
}

/// One numbered ACL entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclEntry {
    /// Evaluation order - lower numbers win
    pub rule_number: u32,
    /// Direction
    pub direction: AclDirection,
    /// Verdict
    pub action: AclAction,
    /// Matched address block
    pub peer: AclPeer,
    /// Matched TCP port range
    pub ports: PortRange,
}

/// A network ACL attached to the VPC
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkAcl {
    /// ACL identifier
    pub id: NetworkAclId,
    /// Entries in rule-number order
    pub entries: Vec<AclEntry>,
}

impl NetworkAcl {
    /// The baseline ACL: HTTP in over both families, HTTPS in over IPv4,
    /// and ephemeral-range TCP out over both families.
    #[must_use]
    pub fn baseline(id: NetworkAclId) -> Self {
        let entries = vec![
            AclEntry {
                rule_number: 100,
                direction: AclDirection::Ingress,
                action: AclAction::Allow,
                peer: AclPeer::any_ipv4(),
                ports: PortRange::single(80),
            },
            AclEntry {
                rule_number: 110,
                direction: AclDirection::Ingress,
                action: AclAction::Allow,
                peer: AclPeer::any_ipv6(),
                ports: PortRange::single(80),
            },
            AclEntry {
                rule_number: 120,
                direction: AclDirection::Ingress,
                action: AclAction::Allow,
                peer: AclPeer::any_ipv4(),
                ports: PortRange::single(443),
            },
            AclEntry {
                rule_number: 140,
                direction: AclDirection::Egress,
                action: AclAction::Allow,
                peer: AclPeer::any_ipv4(),
                ports: PortRange { from: 1024, to: 65535 },
            },
            AclEntry {
                rule_number: 150,
                direction: AclDirection::Egress,
                action: AclAction::Allow,
                peer: AclPeer::any_ipv6(),
                ports: PortRange { from: 1024, to: 65535 },
            },
        ];
        Self { id, entries }
    }
}
