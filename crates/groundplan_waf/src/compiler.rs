//! The firewall rule compiler.

use crate::config::{DEFAULT_URI_RATE_LIMIT, WafConfig, WafScope};
use crate::ip_set::{IpSet, IpSetAddresses};
use crate::rule::{RateKey, RuleAction, ScopeDown, Statement, Visibility, WafRule};
use groundplan_core::{CoreError, IpSetId, SynthContext, WebAclId};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Capacity budget for one rule set, in WCU
pub const WCU_BUDGET: u32 = 1500;

/// Fixed overhead charged to every rule set
const BASE_WCU: u32 = 2;

/// Cost of each per-path rate-limit rule
const RATE_PATH_WCU: u32 = 2;

/// Firewall compilation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WafError {
    /// The selection exceeds the capacity budget
    #[error("total capacity {total} WCU exceeds the {limit} WCU budget")]
    CapacityExceeded {
        /// Computed total
        total: u32,
        /// The budget
        limit: u32,
    },

    /// Two compiled rules share a priority
    #[error("priority {priority} is assigned to both {first} and {second}")]
    ConflictingPriority {
        /// Duplicated priority
        priority: u32,
        /// First rule holding the priority
        first: String,
        /// Second rule holding the priority
        second: String,
    },
}

impl From<WafError> for CoreError {
    fn from(err: WafError) -> Self {
        match err {
            WafError::CapacityExceeded { total, limit } => {
                CoreError::CapacityExceeded { total, limit }
            }
            WafError::ConflictingPriority {
                priority,
                first,
                second,
            } => CoreError::ConflictingPriority {
                priority,
                first,
                second,
            },
        }
    }
}

/// A compiled, validated rule set - immutable once produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledWaf {
    /// Rule set identifier
    pub id: WebAclId,
    /// Attachment scope
    pub scope: WafScope,
    /// Action for requests no rule matches
    pub default_action: RuleAction,
    /// Rule-set level sampling and metrics
    pub visibility: Visibility,
    /// Rules in priority order
    pub rules: Vec<WafRule>,
    /// IP sets referenced by the rules
    pub ip_sets: Vec<IpSet>,
    /// Capacity consumed, in WCU
    pub total_wcu: u32,
}

/// Capacity consumed by a configuration: the selected group weights, two
/// units per per-path rate-limit rule, and the fixed base overhead.
#[must_use]
pub fn total_wcu(config: &WafConfig) -> u32 {
    let groups: u32 = config.rule_groups.iter().map(|g| g.weight()).sum();
    groups + RATE_PATH_WCU * config.rate_limit_path_count() as u32 + BASE_WCU
}

/// Compiles a [`WafConfig`] into a [`CompiledWaf`].
///
/// Admission is checked before any rule object exists; a disabled
/// configuration that passes admission compiles to `None`.
pub struct WafRuleCompiler<'a> {
    ctx: &'a SynthContext,
}

impl<'a> WafRuleCompiler<'a> {
    /// Create a compiler for the given synthesis context
    #[must_use]
    pub fn new(ctx: &'a SynthContext) -> Self {
        Self { ctx }
    }

    /// Compile the rule set.
    ///
    /// # Errors
    ///
    /// Returns [`WafError::CapacityExceeded`] when the selection exceeds
    /// the budget (reported with the computed total), and
    /// [`WafError::ConflictingPriority`] if assembly ever yields two rules
    /// with one priority.
    pub fn compile(&self, config: &WafConfig) -> Result<Option<CompiledWaf>, WafError> {
        let total = total_wcu(config);
        if total > WCU_BUDGET {
            return Err(WafError::CapacityExceeded {
                total,
                limit: WCU_BUDGET,
            });
        }
        if !config.enabled {
            return Ok(None);
        }

        let mut rules = Vec::new();
        let mut ip_sets = Vec::new();

        self.push_ip_set_rules(config, &mut rules, &mut ip_sets);
        self.push_group_rules(config, &mut rules);
        self.push_rate_limit_rules(config, &mut rules);

        rules.sort_by_key(|r| r.priority);
        verify_unique_priorities(&rules)?;

        let compiled = CompiledWaf {
            id: WebAclId::from_name(&self.ctx.scope, "web-acl"),
            scope: config.scope,
            default_action: RuleAction::Allow,
            visibility: Visibility::metrics("WebAclMetric"),
            rules,
            ip_sets,
            total_wcu: total,
        };

        debug!(
            id = %compiled.id,
            rules = compiled.rules.len(),
            wcu = compiled.total_wcu,
            "compiled firewall rule set"
        );

        Ok(Some(compiled))
    }

    /// Allow lists at priorities 1 and 2, deny lists at 3 and 4.
    fn push_ip_set_rules(
        &self,
        config: &WafConfig,
        rules: &mut Vec<WafRule>,
        ip_sets: &mut Vec<IpSet>,
    ) {
        if let Some(addresses) = &config.allow_ipv4 {
            self.push_ip_set_rule(
                config.scope,
                1,
                RuleAction::Allow,
                "AllowListIpSet",
                IpSetAddresses::V4(addresses.clone()),
                rules,
                ip_sets,
            );
        }
        if let Some(addresses) = &config.allow_ipv6 {
            self.push_ip_set_rule(
                config.scope,
                2,
                RuleAction::Allow,
                "AllowListIpv6IpSet",
                IpSetAddresses::V6(addresses.clone()),
                rules,
                ip_sets,
            );
        }
        if let Some(addresses) = &config.deny_ipv4 {
            self.push_ip_set_rule(
                config.scope,
                3,
                RuleAction::Block,
                "DenyListIpSet",
                IpSetAddresses::V4(addresses.clone()),
                rules,
                ip_sets,
            );
        }
        if let Some(addresses) = &config.deny_ipv6 {
            self.push_ip_set_rule(
                config.scope,
                4,
                RuleAction::Block,
                "DenyListIpv6IpSet",
                IpSetAddresses::V6(addresses.clone()),
                rules,
                ip_sets,
            );
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn push_ip_set_rule(
        &self,
        scope: WafScope,
        priority: u32,
        action: RuleAction,
        set_name: &str,
        addresses: IpSetAddresses,
        rules: &mut Vec<WafRule>,
        ip_sets: &mut Vec<IpSet>,
    ) {
        let id = IpSetId::from_name(&self.ctx.scope, set_name);
        ip_sets.push(IpSet {
            id,
            name: set_name.to_string(),
            scope,
            addresses,
        });
        rules.push(WafRule {
            name: format!("RuleWith{set_name}"),
            priority,
            action,
            statement: Statement::IpSetReference { ip_set: id },
            visibility: Visibility::metrics(format!("{set_name}Metric")),
        });
    }

    /// Managed groups at priority 10 + selection index, in selection order.
    fn push_group_rules(&self, config: &WafConfig, rules: &mut Vec<WafRule>) {
        for (i, group) in config.rule_groups.iter().enumerate() {
            rules.push(WafRule {
                name: format!("RuleWith{}", group.vendor_name()),
                priority: 10 + i as u32,
                action: RuleAction::GroupDefault,
                statement: Statement::ManagedRuleGroup {
                    vendor: group.vendor().to_string(),
                    name: group.vendor_name().to_string(),
                },
                visibility: Visibility::metrics(group.metric_name()),
            });
        }
    }

    /// Per-path rules at 100 + path index, then the default source-IP rule
    /// at 100 + path count. Strictly increasing, so the block is
    /// collision-free by construction.
    fn push_rate_limit_rules(&self, config: &WafConfig, rules: &mut Vec<WafRule>) {
        let Some(rate_limit) = &config.rate_limit else {
            return;
        };

        let paths: &[String] = rate_limit
            .uri
            .as_ref()
            .map_or(&[], |uri| uri.paths.as_slice());
        let path_limit = rate_limit
            .uri
            .as_ref()
            .and_then(|uri| uri.limit)
            .unwrap_or(DEFAULT_URI_RATE_LIMIT);

        for (i, path) in paths.iter().enumerate() {
            let label = pascal_case(path);
            rules.push(WafRule {
                name: format!("RuleWith{label}PageRateLimit"),
                priority: 100 + i as u32,
                action: RuleAction::Block,
                statement: Statement::RateBased {
                    limit: path_limit,
                    key: RateKey::SourceIp,
                    scope_down: Some(ScopeDown::UriPathStartsWith(path.clone())),
                },
                visibility: Visibility::metrics(format!("{label}PageRateLimitCustomRuleMetric")),
            });
        }

        rules.push(WafRule {
            name: "RuleWithRateLimit".to_string(),
            priority: 100 + paths.len() as u32,
            action: RuleAction::Block,
            statement: Statement::RateBased {
                limit: rate_limit.default_limit,
                key: RateKey::SourceIp,
                scope_down: None,
            },
            visibility: Visibility::metrics("DefaultRateLimitCustomRuleMetric"),
        });
    }
}

fn verify_unique_priorities(rules: &[WafRule]) -> Result<(), WafError> {
    for pair in rules.windows(2) {
        if pair[0].priority == pair[1].priority {
            return Err(WafError::ConflictingPriority {
                priority: pair[0].priority,
                first: pair[0].name.clone(),
                second: pair[1].name.clone(),
            });
        }
    }
    Ok(())
}

/// Capitalize each alphanumeric word of a path and join them
fn pascal_case(path: &str) -> String {
    path.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}
