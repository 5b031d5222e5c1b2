//! Named IP sets referenced by firewall rules.

use crate::config::WafScope;
use groundplan_core::IpSetId;
use ipnet::{Ipv4Net, Ipv6Net};
use serde::{Deserialize, Serialize};

/// Address family of an IP set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IpVersion {
    /// IPv4
    V4,
    /// IPv6
    V6,
}

/// The addresses held by an IP set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IpSetAddresses {
    /// IPv4 blocks
    V4(Vec<Ipv4Net>),
    /// IPv6 blocks
    V6(Vec<Ipv6Net>),
}

impl IpSetAddresses {
    /// Address family of these addresses
    #[must_use]
    pub fn version(&self) -> IpVersion {
        match self {
            Self::V4(_) => IpVersion::V4,
            Self::V6(_) => IpVersion::V6,
        }
    }

    /// Number of addresses
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::V4(addrs) => addrs.len(),
            Self::V6(addrs) => addrs.len(),
        }
    }

    /// Check if empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A named address list referenced by a rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpSet {
    /// Set identifier
    pub id: IpSetId,
    /// Set name
    pub name: String,
    /// Attachment scope, matching the owning rule set
    pub scope: WafScope,
    /// Addresses
    pub addresses: IpSetAddresses,
}

impl IpSet {
    /// Address family of this set
    #[must_use]
    pub fn version(&self) -> IpVersion {
        self.addresses.version()
    }
}
