//! Unique identifiers for synthesized resources.
//!
//! All IDs are UUIDs serialized in canonical format. Builders derive IDs
//! with `from_name` (name-based UUID v5) so that re-synthesizing the same
//! configuration under the same scope yields the same resource graph.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn scoped_v5(scope: &str, name: &str) -> Uuid {
    let scoped = format!("{scope}/{name}");
    Uuid::new_v5(&Uuid::NAMESPACE_DNS, scoped.as_bytes())
}

/// VPC identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VpcId(Uuid);

impl VpcId {
    /// Create a new random VpcId
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Derive deterministically from a scope and logical name
    #[must_use]
    pub fn from_name(scope: &str, name: &str) -> Self {
        Self(scoped_v5(scope, name))
    }

    /// Get as UUID
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for VpcId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for VpcId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "vpc_{}", self.0)
    }
}

/// Subnet identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubnetId(Uuid);

impl SubnetId {
    /// Create a new random SubnetId
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Derive deterministically from a scope and logical name
    #[must_use]
    pub fn from_name(scope: &str, name: &str) -> Self {
        Self(scoped_v5(scope, name))
    }

    /// Get as UUID
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SubnetId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SubnetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "subnet_{}", self.0)
    }
}

/// Route table identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RouteTableId(Uuid);

impl RouteTableId {
    /// Create a new random RouteTableId
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Derive deterministically from a scope and logical name
    #[must_use]
    pub fn from_name(scope: &str, name: &str) -> Self {
        Self(scoped_v5(scope, name))
    }

    /// Get as UUID
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for RouteTableId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RouteTableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rtb_{}", self.0)
    }
}

/// Gateway identifier - internet gateways and egress-only internet gateways
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GatewayId(Uuid);

impl GatewayId {
    /// Create a new random GatewayId
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Derive deterministically from a scope and logical name
    #[must_use]
    pub fn from_name(scope: &str, name: &str) -> Self {
        Self(scoped_v5(scope, name))
    }

    /// Get as UUID
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for GatewayId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for GatewayId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "igw_{}", self.0)
    }
}

/// Elastic address allocation identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EipId(Uuid);

impl EipId {
    /// Create a new random EipId
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Derive deterministically from a scope and logical name
    #[must_use]
    pub fn from_name(scope: &str, name: &str) -> Self {
        Self(scoped_v5(scope, name))
    }

    /// Get as UUID
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for EipId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EipId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "eipalloc_{}", self.0)
    }
}

/// NAT gateway identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NatGatewayId(Uuid);

impl NatGatewayId {
    /// Create a new random NatGatewayId
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Derive deterministically from a scope and logical name
    #[must_use]
    pub fn from_name(scope: &str, name: &str) -> Self {
        Self(scoped_v5(scope, name))
    }

    /// Get as UUID
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for NatGatewayId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for NatGatewayId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "nat_{}", self.0)
    }
}

/// Instance identifier - NAT instances and other machine placements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(Uuid);

impl InstanceId {
    /// Create a new random InstanceId
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Derive deterministically from a scope and logical name
    #[must_use]
    pub fn from_name(scope: &str, name: &str) -> Self {
        Self(scoped_v5(scope, name))
    }

    /// Get as UUID
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for InstanceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "i_{}", self.0)
    }
}

/// Network ACL identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NetworkAclId(Uuid);

impl NetworkAclId {
    /// Create a new random NetworkAclId
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Derive deterministically from a scope and logical name
    #[must_use]
    pub fn from_name(scope: &str, name: &str) -> Self {
        Self(scoped_v5(scope, name))
    }

    /// Get as UUID
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for NetworkAclId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for NetworkAclId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "acl_{}", self.0)
    }
}

/// Security group identifier - a node in the policy graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupId(Uuid);

impl GroupId {
    /// Create a new random GroupId
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Derive deterministically from a scope and logical name
    #[must_use]
    pub fn from_name(scope: &str, name: &str) -> Self {
        Self(scoped_v5(scope, name))
    }

    /// Get as UUID
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for GroupId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sg_{}", self.0)
    }
}

/// IP set identifier - a named address list referenced by firewall rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IpSetId(Uuid);

impl IpSetId {
    /// Create a new random IpSetId
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Derive deterministically from a scope and logical name
    #[must_use]
    pub fn from_name(scope: &str, name: &str) -> Self {
        Self(scoped_v5(scope, name))
    }

    /// Get as UUID
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for IpSetId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for IpSetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ipset_{}", self.0)
    }
}

/// Web ACL identifier - a compiled firewall rule set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WebAclId(Uuid);

impl WebAclId {
    /// Create a new random WebAclId
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Derive deterministically from a scope and logical name
    #[must_use]
    pub fn from_name(scope: &str, name: &str) -> Self {
        Self(scoped_v5(scope, name))
    }

    /// Get as UUID
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for WebAclId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for WebAclId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "waf_{}", self.0)
    }
}

/// Target group identifier - a routing destination behind the edge listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TargetId(Uuid);

impl TargetId {
    /// Create a new random TargetId
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Derive deterministically from a scope and logical name
    #[must_use]
    pub fn from_name(scope: &str, name: &str) -> Self {
        Self(scoped_v5(scope, name))
    }

    /// Get as UUID
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for TargetId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TargetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tg_{}", self.0)
    }
}
