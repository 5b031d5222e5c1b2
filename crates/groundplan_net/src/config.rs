//! Topology configuration.

use groundplan_core::SubnetRole;
use ipnet::{Ipv4Net, Ipv6Net};
use serde::{Deserialize, Serialize};

/// Compact configuration driving a topology build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyConfig {
    /// Availability zones - must be exactly 3
    pub availability_zones: Vec<String>,
    /// IPv4 addressing for the VPC and its subnet divisions
    pub cidrs: CidrConfig,
    /// NAT strategy, applied uniformly across all private subnets
    pub nat: NatConfig,
    /// Concrete IPv6 /56 for the VPC; when absent a deterministic
    /// provider-assigned stand-in is derived from the VPC identifier
    #[serde(default)]
    pub ipv6_block: Option<Ipv6Net>,
}

/// IPv4 CIDR assignments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CidrConfig {
    /// The VPC's IPv4 CIDR
    pub vpc: Ipv4Net,
    /// Per-division subnet CIDRs - each list must have exactly 3 entries,
    /// one per availability zone
    pub subnets: SubnetDivision<Vec<Ipv4Net>>,
}

/// A value held once per subnet division role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubnetDivision<T> {
    /// Public division
    pub public: T,
    /// Private division
    pub private: T,
    /// Isolated division
    pub isolated: T,
}

impl<T> SubnetDivision<T> {
    /// Get the value for a role
    pub fn get(&self, role: SubnetRole) -> &T {
        match role {
            SubnetRole::Public => &self.public,
            SubnetRole::Private => &self.private,
            SubnetRole::Isolated => &self.isolated,
        }
    }

    /// Iterate (role, value) pairs in the fixed synthesis order
    pub fn iter(&self) -> impl Iterator<Item = (SubnetRole, &T)> {
        SubnetRole::ALL.iter().map(|&role| (role, self.get(role)))
    }
}

/// NAT strategy selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NatConfig {
    /// Managed NAT gateways, one per availability zone
    Gateway,
    /// Self-managed NAT instances, one per availability zone
    Instance {
        /// Machine size; `t2.nano` when unset
        #[serde(default)]
        instance_type: Option<String>,
        /// Ingress posture of the shared NAT security boundary
        #[serde(default)]
        ingress: NatInstanceIngress,
    },
}

/// Ingress posture of the shared NAT-instance security boundary.
///
/// The boundary exists under either posture; `Unreachable` grants it no
/// ingress at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NatInstanceIngress {
    /// No ingress edge - the instances accept no inbound connections
    #[default]
    Unreachable,
    /// Allow all TCP from the VPC's IPv4 CIDR
    FromVpc,
}
