//! NAT resources - managed gateways or self-managed instances.

use groundplan_core::{EipId, GroupId, InstanceId, NatGatewayId, SubnetId, Tags};
use ipnet::Ipv4Net;
use serde::{Deserialize, Serialize};

/// Default machine size for NAT instances
pub const DEFAULT_NAT_INSTANCE_TYPE: &str = "t2.nano";

/// Which NAT mechanism a topology uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NatStrategy {
    /// Managed NAT gateways
    Gateway,
    /// Self-managed NAT instances
    Instance,
}

/// A managed NAT gateway with its elastic address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NatGateway {
    /// Gateway identifier
    pub id: NatGatewayId,
    /// Elastic address allocation backing the gateway
    pub allocation: EipId,
    /// Public subnet the gateway is placed in
    pub subnet: SubnetId,
}

/// A self-managed NAT instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NatInstance {
    /// Instance identifier
    pub id: InstanceId,
    /// NAT-purpose machine image
    pub image: String,
    /// Machine size
    pub instance_type: String,
    /// Public subnet the instance is placed in
    pub subnet: SubnetId,
    /// Detailed monitoring enabled
    pub monitoring: bool,
    /// SSH key pair name
    pub key_name: Option<String>,
    /// Attached instance profile name
    pub instance_profile: Option<String>,
    /// Tags
    pub tags: Tags,
}

/// Resolved ingress posture of the shared NAT boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NatBoundaryIngress {
    /// No inbound traffic permitted
    Unreachable,
    /// All TCP permitted from the VPC's IPv4 CIDR
    FromVpc(Ipv4Net),
}

/// The security boundary shared by all NAT instances
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NatSecurityBoundary {
    /// Group identifier
    pub id: GroupId,
    /// Group name
    pub name: String,
    /// Ingress posture
    pub ingress: NatBoundaryIngress,
}

/// NAT resources created for a topology - uniform per build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NatResources {
    /// One elastic address and one NAT gateway per availability zone
    Gateway {
        /// Gateways in AZ order
        gateways: Vec<NatGateway>,
    },
    /// One shared security boundary and one NAT instance per availability zone
    Instance {
        /// The shared boundary
        security_boundary: NatSecurityBoundary,
        /// Instances in AZ order
        instances: Vec<NatInstance>,
    },
}

impl NatResources {
    /// The strategy these resources implement
    #[must_use]
    pub fn strategy(&self) -> NatStrategy {
        match self {
            Self::Gateway { .. } => NatStrategy::Gateway,
            Self::Instance { .. } => NatStrategy::Instance,
        }
    }
}

/// NAT-purpose machine image for a region.
///
/// Deterministic stand-in for the provider's per-region NAT image lookup.
#[must_use]
pub fn nat_machine_image(region: &str) -> String {
    format!("amzn-ami-vpc-nat/{region}")
}
