//! Subnet entities.

use crate::route::RouteTable;
use groundplan_core::{SubnetId, SubnetRole, Tags};
use ipnet::{Ipv4Net, Ipv6Net};
use serde::{Deserialize, Serialize};

/// A synthesized subnet with its exclusively-owned route table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subnet {
    /// Subnet identifier
    pub id: SubnetId,
    /// Availability zone this subnet lives in
    pub availability_zone: String,
    /// Division role
    pub role: SubnetRole,
    /// IPv4 CIDR, taken from configuration
    pub ipv4_cidr: Ipv4Net,
    /// IPv6 /64, derived from the VPC block
    pub ipv6_cidr: Ipv6Net,
    /// Auto-assign IPv6 addresses on launch
    pub assign_ipv6_on_creation: bool,
    /// Map a public IPv4 address on launch
    pub map_public_ip_on_launch: bool,
    /// Tags
    pub tags: Tags,
    /// The route table owned by this subnet
    pub route_table: RouteTable,
}

impl Subnet {
    /// Whether this subnet is publicly routable
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.role == SubnetRole::Public
    }
}
