//! The synthesized topology.

use crate::acl::NetworkAcl;
use crate::config::SubnetDivision;
use crate::nat::{NatResources, NatStrategy};
use crate::subnet::Subnet;
use groundplan_core::{GatewayId, SubnetId, SubnetRole, VpcId};
use ipnet::{Ipv4Net, Ipv6Net};
use serde::{Deserialize, Serialize};

/// The VPC at the root of the topology
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vpc {
    /// VPC identifier
    pub id: VpcId,
    /// IPv4 CIDR
    pub ipv4_cidr: Ipv4Net,
    /// IPv6 /56 block
    pub ipv6_block: Ipv6Net,
    /// DNS resolution enabled
    pub enable_dns_support: bool,
    /// DNS hostnames assigned to launched instances
    pub enable_dns_hostnames: bool,
}

/// A complete synthesized topology - immutable once built
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    /// The VPC
    pub vpc: Vpc,
    /// Availability zones, in configuration order
    pub availability_zones: Vec<String>,
    /// The internet gateway, attached to the VPC
    pub internet_gateway: GatewayId,
    /// The egress-only internet gateway
    pub egress_only_gateway: GatewayId,
    /// The baseline network ACL
    pub network_acl: NetworkAcl,
    /// Subnets per division, each list in AZ order
    pub subnets: SubnetDivision<Vec<Subnet>>,
    /// NAT resources
    pub nat: NatResources,
}

impl Topology {
    /// Subnet identifiers for a division, in AZ order
    #[must_use]
    pub fn subnet_ids(&self, role: SubnetRole) -> Vec<SubnetId> {
        self.subnets.get(role).iter().map(|s| s.id).collect()
    }

    /// The NAT strategy this topology was built with
    #[must_use]
    pub fn nat_strategy(&self) -> NatStrategy {
        self.nat.strategy()
    }

    /// Total number of subnets across all divisions
    #[must_use]
    pub fn subnet_count(&self) -> usize {
        SubnetRole::ALL.iter().map(|&r| self.subnets.get(r).len()).sum()
    }
}
