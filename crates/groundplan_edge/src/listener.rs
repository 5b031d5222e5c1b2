//! The edge listener and its target-rule registry.

use crate::condition::MatchCondition;
use groundplan_core::{CoreError, SynthContext, TargetId, WebAclId};
use groundplan_policy::{Peer, PolicyError, PortSpec, SecurityPolicyGraph, StandardGroup};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Edge listener errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EdgeError {
    /// A non-default target was registered with no match conditions
    #[error("rule {rule} has no match conditions")]
    MissingMatchCondition {
        /// Name of the offending rule
        rule: String,
    },

    /// Two listener rules share a priority
    #[error("priority {priority} is assigned to both {first} and {second}")]
    ConflictingPriority {
        /// Duplicated priority
        priority: u32,
        /// First rule holding the priority
        first: String,
        /// Second rule holding the priority
        second: String,
    },

    /// The policy graph rejected the ingress wiring
    #[error(transparent)]
    Policy(#[from] PolicyError),

    /// A named group was missing from the policy graph
    #[error("security group not found: {name}")]
    UnknownGroup {
        /// Name that was looked up
        name: String,
    },
}

impl From<EdgeError> for CoreError {
    fn from(err: EdgeError) -> Self {
        match err {
            EdgeError::MissingMatchCondition { rule } => CoreError::MissingMatchCondition { rule },
            EdgeError::ConflictingPriority {
                priority,
                first,
                second,
            } => CoreError::ConflictingPriority {
                priority,
                first,
                second,
            },
            EdgeError::Policy(err) => err.into(),
            EdgeError::UnknownGroup { name } => CoreError::NotFound {
                kind: "security group".to_string(),
                name,
            },
        }
    }
}

/// A routing destination behind the listener
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetGroup {
    /// Target identifier
    pub id: TargetId,
    /// Target name
    pub name: String,
    /// Destination port
    pub port: u16,
    /// Health-check path probed on the target
    pub health_check_path: String,
}

impl TargetGroup {
    /// Create an HTTP target group with the standard health check
    #[must_use]
    pub fn new(ctx: &SynthContext, name: &str) -> Self {
        Self {
            id: TargetId::from_name(&ctx.scope, name),
            name: name.to_string(),
            port: 80,
            health_check_path: "/healthcheck".to_string(),
        }
    }
}

/// A registered listener rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListenerRule {
    /// Rule name
    pub name: String,
    /// Evaluation priority - unique within a listener, lower first
    pub priority: u32,
    /// Destination target
    pub target: TargetId,
    /// Match conditions - never empty
    pub conditions: Vec<MatchCondition>,
}

/// How the edge group is opened to the outside
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum EdgeIngress {
    /// HTTP from any IPv4 source
    FromAnywhere,
    /// HTTP only from a provider-managed prefix list (e.g. the upstream
    /// distribution's published address ranges)
    FromPrefixList {
        /// External prefix-list identifier
        prefix_list_id: String,
    },
}

impl EdgeIngress {
    /// Register this ingress choice on the policy graph's edge group.
    ///
    /// Idempotent, like all policy-graph mutation.
    ///
    /// # Errors
    ///
    /// Returns [`EdgeError::UnknownGroup`] if the graph carries no edge
    /// group.
    pub fn wire(&self, graph: &mut SecurityPolicyGraph) -> Result<(), EdgeError> {
        let edge = graph
            .group(StandardGroup::Edge.name())
            .ok_or_else(|| EdgeError::UnknownGroup {
                name: StandardGroup::Edge.name().to_string(),
            })?;
        let peer = match self {
            Self::FromAnywhere => Peer::any_ipv4(),
            Self::FromPrefixList { prefix_list_id } => Peer::PrefixList(prefix_list_id.clone()),
        };
        graph.allow(peer, edge, PortSpec::Tcp(80))?;
        Ok(())
    }
}

/// The HTTP listener at the public edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeListener {
    /// Listener port
    pub port: u16,
    default_target: TargetGroup,
    rules: Vec<ListenerRule>,
    web_acl: Option<WebAclId>,
}

impl EdgeListener {
    /// Create a listener on port 80 forwarding to the default target
    #[must_use]
    pub fn new(default_target: TargetGroup) -> Self {
        Self {
            port: 80,
            default_target,
            rules: Vec::new(),
            web_acl: None,
        }
    }

    /// The default target, hit when no rule matches
    #[must_use]
    pub fn default_target(&self) -> &TargetGroup {
        &self.default_target
    }

    /// Registered rules, in priority order
    #[must_use]
    pub fn rules(&self) -> &[ListenerRule] {
        &self.rules
    }

    /// The attached firewall rule set, if any
    #[must_use]
    pub fn web_acl(&self) -> Option<WebAclId> {
        self.web_acl
    }

    /// Register a routing rule for a target.
    ///
    /// Registering the default target again is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`EdgeError::MissingMatchCondition`] when `conditions` is
    /// empty and [`EdgeError::ConflictingPriority`] when the priority is
    /// already taken.
    pub fn register(
        &mut self,
        name: &str,
        priority: u32,
        target: &TargetGroup,
        conditions: Vec<MatchCondition>,
    ) -> Result<(), EdgeError> {
        if target.id == self.default_target.id {
            return Ok(());
        }
        if conditions.is_empty() {
            return Err(EdgeError::MissingMatchCondition {
                rule: name.to_string(),
            });
        }
        if let Some(existing) = self.rules.iter().find(|r| r.priority == priority) {
            return Err(EdgeError::ConflictingPriority {
                priority,
                first: existing.name.clone(),
                second: name.to_string(),
            });
        }

        self.rules.push(ListenerRule {
            name: name.to_string(),
            priority,
            target: target.id,
            conditions,
        });
        self.rules.sort_by_key(|r| r.priority);
        debug!(rule = name, priority, "registered listener rule");
        Ok(())
    }

    /// Attach a compiled firewall rule set to this listener
    pub fn attach_web_acl(&mut self, id: WebAclId) {
        self.web_acl = Some(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use groundplan_core::VpcId;

    fn ctx() -> SynthContext {
        SynthContext::new("test", "us-west-2", "123456789012")
    }

    fn listener() -> EdgeListener {
        EdgeListener::new(TargetGroup::new(&ctx(), "default"))
    }

    #[test]
    fn test_target_group_defaults() {
        let target = TargetGroup::new(&ctx(), "web");
        assert_eq!(target.port, 80);
        assert_eq!(target.health_check_path, "/healthcheck");
    }

    #[test]
    fn test_register_requires_conditions() {
        let mut listener = listener();
        let api = TargetGroup::new(&ctx(), "api");
        let err = listener.register("api", 10, &api, Vec::new()).unwrap_err();
        assert_eq!(
            err,
            EdgeError::MissingMatchCondition {
                rule: "api".to_string(),
            }
        );
        assert!(listener.rules().is_empty());
    }

    #[test]
    fn test_register_default_target_is_noop() {
        let mut listener = listener();
        let default = listener.default_target().clone();
        listener.register("default-again", 10, &default, Vec::new()).unwrap();
        assert!(listener.rules().is_empty());
    }

    #[test]
    fn test_register_rejects_duplicate_priority() {
        let mut listener = listener();
        let api = TargetGroup::new(&ctx(), "api");
        let admin = TargetGroup::new(&ctx(), "admin");

        listener
            .register("api", 10, &api, vec![MatchCondition::PathPattern("/api/*".to_string())])
            .unwrap();
        let err = listener
            .register("admin", 10, &admin, vec![MatchCondition::PathPattern("/admin/*".to_string())])
            .unwrap_err();

        assert_eq!(
            err,
            EdgeError::ConflictingPriority {
                priority: 10,
                first: "api".to_string(),
                second: "admin".to_string(),
            }
        );
        assert_eq!(listener.rules().len(), 1);
    }

    #[test]
    fn test_rules_kept_in_priority_order() {
        let mut listener = listener();
        let api = TargetGroup::new(&ctx(), "api");
        let admin = TargetGroup::new(&ctx(), "admin");

        listener
            .register("admin", 20, &admin, vec![MatchCondition::PathPattern("/admin/*".to_string())])
            .unwrap();
        listener
            .register("api", 10, &api, vec![MatchCondition::PathPattern("/api/*".to_string())])
            .unwrap();

        let names: Vec<&str> = listener.rules().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["api", "admin"]);
    }

    #[test]
    fn test_attach_web_acl() {
        let mut listener = listener();
        assert_eq!(listener.web_acl(), None);
        let acl = WebAclId::from_name("test", "web-acl");
        listener.attach_web_acl(acl);
        assert_eq!(listener.web_acl(), Some(acl));
    }

    #[test]
    fn test_wire_ingress_from_anywhere() {
        let mut graph = SecurityPolicyGraph::standard(VpcId::from_name("test", "vpc"));
        let before = graph.edge_count();

        // The template already opened the edge to anywhere; wiring the
        // same choice again must not add an edge.
        EdgeIngress::FromAnywhere.wire(&mut graph).unwrap();
        assert_eq!(graph.edge_count(), before);
    }

    #[test]
    fn test_wire_ingress_from_prefix_list() {
        let mut graph = SecurityPolicyGraph::standard(VpcId::from_name("test", "vpc"));
        let before = graph.edge_count();

        EdgeIngress::FromPrefixList {
            prefix_list_id: "pl-0123456789abcdef0".to_string(),
        }
        .wire(&mut graph)
        .unwrap();

        assert_eq!(graph.edge_count(), before + 1);
        let edge = graph.group("edge").unwrap();
        assert!(graph.edges(edge).unwrap().iter().any(|e| matches!(
            &e.peer,
            Peer::PrefixList(id) if id == "pl-0123456789abcdef0"
        )));
    }

    #[test]
    fn test_wire_ingress_requires_edge_group() {
        let mut graph = SecurityPolicyGraph::new(VpcId::from_name("test", "vpc"));
        let err = EdgeIngress::FromAnywhere.wire(&mut graph).unwrap_err();
        assert_eq!(
            err,
            EdgeError::UnknownGroup {
                name: "edge".to_string(),
            }
        );
    }
}
