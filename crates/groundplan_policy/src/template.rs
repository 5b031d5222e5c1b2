//! The standard deployment template: ten named groups and their wiring.

use crate::graph::{PolicyError, SecurityPolicyGraph};
use crate::ingress::{Peer, PortSpec};
use groundplan_core::VpcId;
use serde::{Deserialize, Serialize};

/// The fixed group roles of a standard deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StandardGroup {
    /// Load balancer at the public edge
    Edge,
    /// MySQL-compatible database
    DatabaseMysql,
    /// PostgreSQL-compatible database
    DatabasePostgres,
    /// Redis cache
    CacheRedis,
    /// Memcached cache
    CacheMemcached,
    /// Shared network filesystem
    SharedFilesystem,
    /// Clustered compute workloads
    ClusterCompute,
    /// Standalone compute instances
    InstanceCompute,
    /// Operator bastion
    Bastion,
    /// Document database
    DocumentDatabase,
}

impl StandardGroup {
    /// All roles, in template creation order
    pub const ALL: [StandardGroup; 10] = [
        StandardGroup::Edge,
        StandardGroup::DatabaseMysql,
        StandardGroup::DatabasePostgres,
        StandardGroup::CacheRedis,
        StandardGroup::CacheMemcached,
        StandardGroup::SharedFilesystem,
        StandardGroup::ClusterCompute,
        StandardGroup::InstanceCompute,
        StandardGroup::Bastion,
        StandardGroup::DocumentDatabase,
    ];

    /// Canonical group name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Edge => "edge",
            Self::DatabaseMysql => "database-mysql",
            Self::DatabasePostgres => "database-postgres",
            Self::CacheRedis => "cache-redis",
            Self::CacheMemcached => "cache-memcached",
            Self::SharedFilesystem => "shared-filesystem",
            Self::ClusterCompute => "cluster-compute",
            Self::InstanceCompute => "instance-compute",
            Self::Bastion => "bastion",
            Self::DocumentDatabase => "document-database",
        }
    }
}

impl std::fmt::Display for StandardGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Service groups reachable from every client group, with their ports
const SERVICE_PORTS: [(StandardGroup, u16); 6] = [
    (StandardGroup::SharedFilesystem, 2049),
    (StandardGroup::DatabasePostgres, 5432),
    (StandardGroup::DatabaseMysql, 3306),
    (StandardGroup::CacheRedis, 6379),
    (StandardGroup::CacheMemcached, 11211),
    (StandardGroup::DocumentDatabase, 27017),
];

/// Client groups allowed into every service group
const CLIENT_GROUPS: [StandardGroup; 3] = [
    StandardGroup::Bastion,
    StandardGroup::ClusterCompute,
    StandardGroup::InstanceCompute,
];

impl SecurityPolicyGraph {
    /// Build the standard deployment graph: the ten fixed groups, wired
    /// with the declarative template.
    ///
    /// The graph stays open for extension - constructors created later
    /// register their own groups and edges against it.
    #[must_use]
    pub fn standard(vpc: VpcId) -> Self {
        let mut graph = Self::new(vpc);
        graph
            .apply_standard_template()
            .expect("the standard template wires only groups it creates");
        graph
    }

    fn apply_standard_template(&mut self) -> Result<(), PolicyError> {
        for role in StandardGroup::ALL {
            self.create_group(role.name())?;
        }

        let resolve = |graph: &Self, role: StandardGroup| {
            graph
                .group(role.name())
                .expect("standard groups were just created")
        };

        for (service, port) in SERVICE_PORTS {
            let to = resolve(self, service);
            for client in CLIENT_GROUPS {
                let from = resolve(self, client);
                self.allow(Peer::Group(from), to, PortSpec::Tcp(port))?;
            }
        }

        let edge = resolve(self, StandardGroup::Edge);
        let bastion = resolve(self, StandardGroup::Bastion);
        let cluster = resolve(self, StandardGroup::ClusterCompute);
        let instance = resolve(self, StandardGroup::InstanceCompute);

        self.allow(Peer::any_ipv4(), bastion, PortSpec::Tcp(22))?;
        self.allow(Peer::Group(edge), cluster, PortSpec::TcpRange(32768, 65535))?;
        self.allow(Peer::Group(edge), instance, PortSpec::Tcp(80))?;
        self.allow(Peer::any_ipv4(), edge, PortSpec::Tcp(80))?;

        Ok(())
    }
}
