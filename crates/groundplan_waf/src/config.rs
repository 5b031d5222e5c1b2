//! Firewall compiler configuration.

use crate::rule_group::RuleGroup;
use ipnet::{Ipv4Net, Ipv6Net};
use serde::{Deserialize, Serialize};

/// Per-path rate limit applied when a path spec carries no explicit limit
pub const DEFAULT_URI_RATE_LIMIT: u32 = 1000;

/// Where the compiled rule set attaches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WafScope {
    /// The global edge distribution
    Edge,
    /// A regional ingress endpoint
    Regional,
}

/// Rate-limit specification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Request threshold for the default source-IP rule
    pub default_limit: u32,
    /// Optional per-URI-prefix limits
    #[serde(default)]
    pub uri: Option<UriRateLimit>,
}

/// Per-URI-prefix rate limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UriRateLimit {
    /// Path prefixes, each yielding one rule
    pub paths: Vec<String>,
    /// Shared threshold for the per-path rules;
    /// [`DEFAULT_URI_RATE_LIMIT`] when unset
    #[serde(default)]
    pub limit: Option<u32>,
}

/// Complete firewall compiler configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WafConfig {
    /// When false, compilation is a pure no-op
    pub enabled: bool,
    /// Attachment scope
    pub scope: WafScope,
    /// Managed rule-group selections - order is part of the contract
    #[serde(default)]
    pub rule_groups: Vec<RuleGroup>,
    /// IPv4 allow list
    #[serde(default)]
    pub allow_ipv4: Option<Vec<Ipv4Net>>,
    /// IPv6 allow list
    #[serde(default)]
    pub allow_ipv6: Option<Vec<Ipv6Net>>,
    /// IPv4 deny list
    #[serde(default)]
    pub deny_ipv4: Option<Vec<Ipv4Net>>,
    /// IPv6 deny list
    #[serde(default)]
    pub deny_ipv6: Option<Vec<Ipv6Net>>,
    /// Rate limits
    #[serde(default)]
    pub rate_limit: Option<RateLimitConfig>,
}

impl WafConfig {
    /// Number of configured per-path rate-limit rules
    #[must_use]
    pub fn rate_limit_path_count(&self) -> usize {
        self.rate_limit
            .as_ref()
            .and_then(|r| r.uri.as_ref())
            .map_or(0, |u| u.paths.len())
    }
}
