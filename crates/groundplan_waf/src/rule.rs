//! Firewall rules and their statements.

use groundplan_core::IpSetId;
use serde::{Deserialize, Serialize};

/// What a matching rule does with the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleAction {
    /// Let the request through
    Allow,
    /// Reject the request
    Block,
    /// Defer to the managed group's own per-rule actions (no override)
    GroupDefault,
}

/// Request-sampling and metrics settings for a rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visibility {
    /// Sample matching requests
    pub sampled_requests: bool,
    /// Publish metrics
    pub cloudwatch_metrics: bool,
    /// Metric name
    pub metric_name: String,
}

impl Visibility {
    /// Sampling and metrics on, under the given metric name
    #[must_use]
    pub fn metrics(metric_name: impl Into<String>) -> Self {
        Self {
            sampled_requests: true,
            cloudwatch_metrics: true,
            metric_name: metric_name.into(),
        }
    }
}

/// How rate-based rules aggregate requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RateKey {
    /// Key by source address
    SourceIp,
}

/// Narrows a rate-based rule to a subset of requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScopeDown {
    /// Requests whose URI path starts with the given prefix
    UriPathStartsWith(String),
}

/// What a rule matches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Statement {
    /// Delegate to a vendor-managed rule group
    ManagedRuleGroup {
        /// Vendor name
        vendor: String,
        /// Vendor's rule-set name
        name: String,
    },
    /// Match addresses in a referenced IP set
    IpSetReference {
        /// The referenced set
        ip_set: IpSetId,
    },
    /// Match sources exceeding a request-rate threshold
    RateBased {
        /// Request threshold per window
        limit: u32,
        /// Aggregation key
        key: RateKey,
        /// Optional request subset
        scope_down: Option<ScopeDown>,
    },
}

/// One compiled firewall rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WafRule {
    /// Rule name
    pub name: String,
    /// Evaluation priority - unique within a rule set, lower first
    pub priority: u32,
    /// Action on match
    pub action: RuleAction,
    /// Match statement
    pub statement: Statement,
    /// Sampling and metrics
    pub visibility: Visibility,
}
