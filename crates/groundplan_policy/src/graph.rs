//! The security policy graph.

use crate::ingress::{IngressEdge, Peer, PortSpec};
use groundplan_core::{CoreError, GroupId, VpcId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// Policy graph errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    /// A group with this name already exists
    #[error("security group already exists: {name}")]
    AlreadyExists {
        /// Name that collided
        name: String,
    },

    /// No group with this identifier exists
    #[error("security group not found: {id}")]
    NotFound {
        /// Identifier that was looked up
        id: GroupId,
    },
}

impl From<PolicyError> for CoreError {
    fn from(err: PolicyError) -> Self {
        match err {
            PolicyError::AlreadyExists { name } => CoreError::AlreadyExists {
                kind: "security group".to_string(),
                name,
            },
            PolicyError::NotFound { id } => CoreError::NotFound {
                kind: "security group".to_string(),
                name: id.to_string(),
            },
        }
    }
}

/// A named node in the policy graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityGroup {
    /// Group identifier
    pub id: GroupId,
    /// Group name
    pub name: String,
    /// Permitted ingress edges. A set, not a sequence: insertion is union,
    /// so final contents never depend on registration order.
    edges: BTreeSet<IngressEdge>,
}

impl SecurityGroup {
    fn new(id: GroupId, name: String) -> Self {
        Self {
            id,
            name,
            edges: BTreeSet::new(),
        }
    }

    /// The permitted ingress edges, in their canonical order
    #[must_use]
    pub fn edges(&self) -> &BTreeSet<IngressEdge> {
        &self.edges
    }
}

/// Directed graph of security boundaries and permitted ingress between them.
///
/// Built once against a VPC; stays open for extension afterwards - any
/// number of independent constructors may add groups and edges, and the
/// final graph contents are independent of the order in which they do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityPolicyGraph {
    vpc: VpcId,
    groups: IndexMap<GroupId, SecurityGroup>,
    names: IndexMap<String, GroupId>,
}

impl SecurityPolicyGraph {
    /// Create an empty graph for a VPC
    #[must_use]
    pub fn new(vpc: VpcId) -> Self {
        Self {
            vpc,
            groups: IndexMap::new(),
            names: IndexMap::new(),
        }
    }

    /// The VPC this graph belongs to
    #[must_use]
    pub fn vpc(&self) -> VpcId {
        self.vpc
    }

    /// Create a named group.
    ///
    /// Group identifiers derive from the VPC and name, so re-creating the
    /// same graph yields the same identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::AlreadyExists`] if the name is taken.
    pub fn create_group(&mut self, name: &str) -> Result<GroupId, PolicyError> {
        if self.names.contains_key(name) {
            return Err(PolicyError::AlreadyExists {
                name: name.to_string(),
            });
        }
        let id = GroupId::from_name(&self.vpc.to_string(), name);
        self.groups.insert(id, SecurityGroup::new(id, name.to_string()));
        self.names.insert(name.to_string(), id);
        debug!(group = name, %id, "created security group");
        Ok(id)
    }

    /// Look up a group by name
    #[must_use]
    pub fn group(&self, name: &str) -> Option<GroupId> {
        self.names.get(name).copied()
    }

    /// Permit traffic from `from` to the group `to` on `port`.
    ///
    /// Idempotent per (from, to, port): inserting an edge that already
    /// exists is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::NotFound`] if `to` is not in the graph.
    pub fn allow(&mut self, from: Peer, to: GroupId, port: PortSpec) -> Result<(), PolicyError> {
        let group = self
            .groups
            .get_mut(&to)
            .ok_or(PolicyError::NotFound { id: to })?;
        group.edges.insert(IngressEdge::new(from, port));
        Ok(())
    }

    /// The ingress edges of a group
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::NotFound`] if the group is not in the graph.
    pub fn edges(&self, to: GroupId) -> Result<&BTreeSet<IngressEdge>, PolicyError> {
        self.groups
            .get(&to)
            .map(SecurityGroup::edges)
            .ok_or(PolicyError::NotFound { id: to })
    }

    /// Iterate all groups in creation order
    pub fn groups(&self) -> impl Iterator<Item = &SecurityGroup> {
        self.groups.values()
    }

    /// Number of groups
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Total number of edges across all groups
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.groups.values().map(|g| g.edges.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn graph() -> SecurityPolicyGraph {
        SecurityPolicyGraph::new(VpcId::from_name("test", "vpc"))
    }

    #[test]
    fn test_create_group() {
        let mut g = graph();
        let id = g.create_group("bastion").unwrap();
        assert_eq!(g.group("bastion"), Some(id));
        assert_eq!(g.group_count(), 1);
    }

    #[test]
    fn test_create_group_rejects_duplicate() {
        let mut g = graph();
        g.create_group("bastion").unwrap();
        let err = g.create_group("bastion").unwrap_err();
        assert_eq!(
            err,
            PolicyError::AlreadyExists {
                name: "bastion".to_string(),
            }
        );
        assert_eq!(g.group_count(), 1);
    }

    #[test]
    fn test_group_ids_deterministic_per_vpc() {
        let mut a = graph();
        let mut b = graph();
        assert_eq!(a.create_group("edge").unwrap(), b.create_group("edge").unwrap());

        let mut other = SecurityPolicyGraph::new(VpcId::from_name("other", "vpc"));
        assert_ne!(
            other.create_group("edge").unwrap(),
            a.group("edge").unwrap()
        );
    }

    #[test]
    fn test_allow_is_idempotent() {
        let mut g = graph();
        let bastion = g.create_group("bastion").unwrap();
        let filesystem = g.create_group("shared-filesystem").unwrap();

        g.allow(Peer::Group(bastion), filesystem, PortSpec::Tcp(2049)).unwrap();
        g.allow(Peer::Group(bastion), filesystem, PortSpec::Tcp(2049)).unwrap();

        assert_eq!(g.edges(filesystem).unwrap().len(), 1);
    }

    #[test]
    fn test_allow_unknown_target() {
        let mut g = graph();
        let stranger = GroupId::from_name("elsewhere", "stranger");
        let err = g.allow(Peer::any_ipv4(), stranger, PortSpec::Tcp(22)).unwrap_err();
        assert_eq!(err, PolicyError::NotFound { id: stranger });
    }

    #[test]
    fn test_distinct_ports_are_distinct_edges() {
        let mut g = graph();
        let bastion = g.create_group("bastion").unwrap();
        let db = g.create_group("database-mysql").unwrap();

        g.allow(Peer::Group(bastion), db, PortSpec::Tcp(3306)).unwrap();
        g.allow(Peer::Group(bastion), db, PortSpec::Tcp(33060)).unwrap();

        assert_eq!(g.edges(db).unwrap().len(), 2);
    }

    proptest! {
        #[test]
        fn prop_insertion_order_irrelevant(order in Just(vec![0usize, 1, 2, 3, 4, 5]).prop_shuffle()) {
            // The same edge set registered in any order yields the same graph.
            let wiring: Vec<(PortSpec, u16)> = vec![
                (PortSpec::Tcp(2049), 0),
                (PortSpec::Tcp(5432), 0),
                (PortSpec::Tcp(3306), 1),
                (PortSpec::Tcp(6379), 1),
                (PortSpec::Tcp(11211), 2),
                (PortSpec::Tcp(27017), 2),
            ];

            let build = |indices: &[usize]| {
                let mut g = graph();
                let clients = [
                    g.create_group("bastion").unwrap(),
                    g.create_group("cluster-compute").unwrap(),
                    g.create_group("instance-compute").unwrap(),
                ];
                let target = g.create_group("target").unwrap();
                for &i in indices {
                    let (port, client) = wiring[i];
                    g.allow(Peer::Group(clients[client as usize]), target, port).unwrap();
                }
                g
            };

            let shuffled = build(&order);
            let sequential = build(&[0, 1, 2, 3, 4, 5]);
            prop_assert_eq!(shuffled, sequential);
        }
    }
}
