//! Groundplan Firewall Rule Compiler
//!
//! Compiles a set of managed rule-group selections, allow/deny IP lists,
//! and rate-limit specs into an ordered, priority-assigned rule set bounded
//! by the 1500-unit capacity budget. The compiler is a pure, one-shot
//! transformation: its output order is part of the contract, admission is
//! checked before any rule object exists, and a disabled configuration
//! compiles to nothing at all.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod compiler;
pub mod config;
pub mod ip_set;
pub mod rule;
pub mod rule_group;

pub use compiler::{CompiledWaf, WCU_BUDGET, WafError, WafRuleCompiler, total_wcu};
pub use config::{DEFAULT_URI_RATE_LIMIT, RateLimitConfig, UriRateLimit, WafConfig, WafScope};
pub use ip_set::{IpSet, IpSetAddresses, IpVersion};
pub use rule::{RateKey, RuleAction, ScopeDown, Statement, Visibility, WafRule};
pub use rule_group::RuleGroup;
