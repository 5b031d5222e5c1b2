//! Managed rule groups and their fixed capacity weights.

use serde::{Deserialize, Serialize};

/// A vendor-curated managed rule group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleGroup {
    /// Baseline protections
    Core,
    /// Admin page protection
    AdminProtection,
    /// Known malicious request patterns
    KnownBadInputs,
    /// SQL injection
    SqlInjection,
    /// Linux-specific exploits
    Linux,
    /// POSIX/Unix-specific exploits
    Unix,
    /// Windows-specific exploits
    Windows,
    /// PHP application exploits
    Php,
    /// WordPress application exploits
    Wordpress,
    /// Sources with poor reputation
    IpReputation,
    /// Anonymizing services
    AnonymousIp,
    /// Automated bot traffic
    BotControl,
}

impl RuleGroup {
    /// All groups
    pub const ALL: [RuleGroup; 12] = [
        RuleGroup::Core,
        RuleGroup::AdminProtection,
        RuleGroup::KnownBadInputs,
        RuleGroup::SqlInjection,
        RuleGroup::Linux,
        RuleGroup::Unix,
        RuleGroup::Windows,
        RuleGroup::Php,
        RuleGroup::Wordpress,
        RuleGroup::IpReputation,
        RuleGroup::AnonymousIp,
        RuleGroup::BotControl,
    ];

    /// Fixed capacity weight in WCU
    #[must_use]
    pub const fn weight(self) -> u32 {
        match self {
            Self::Core => 700,
            Self::AdminProtection => 100,
            Self::KnownBadInputs => 200,
            Self::SqlInjection => 200,
            Self::Linux => 200,
            Self::Unix => 100,
            Self::Windows => 200,
            Self::Php => 100,
            Self::Wordpress => 100,
            Self::IpReputation => 25,
            Self::AnonymousIp => 50,
            Self::BotControl => 50,
        }
    }

    /// Vendor that curates the group
    #[must_use]
    pub const fn vendor(self) -> &'static str {
        "AWS"
    }

    /// Vendor's name for the rule set
    #[must_use]
    pub const fn vendor_name(self) -> &'static str {
        match self {
            Self::Core => "AWSManagedRulesCommonRuleSet",
            Self::AdminProtection => "AWSManagedRulesAdminProtectionRuleSet",
            Self::KnownBadInputs => "AWSManagedRulesKnownBadInputsRuleSet",
            Self::SqlInjection => "AWSManagedRulesSQLiRuleSet",
            Self::Linux => "AWSManagedRulesLinuxRuleSet",
            Self::Unix => "AWSManagedRulesUnixRuleSet",
            Self::Windows => "AWSManagedRulesWindowsRuleSet",
            Self::Php => "AWSManagedRulesPHPRuleSet",
            Self::Wordpress => "AWSManagedRulesWordPressRuleSet",
            Self::IpReputation => "AWSManagedRulesAmazonIpReputationList",
            Self::AnonymousIp => "AWSManagedRulesAnonymousIpList",
            Self::BotControl => "AWSManagedRulesBotControlRuleSet",
        }
    }

    /// Metric name: the vendor name without its vendor prefix
    #[must_use]
    pub fn metric_name(self) -> String {
        let stripped = self
            .vendor_name()
            .strip_prefix("AWSManagedRules")
            .unwrap_or(self.vendor_name());
        format!("{stripped}Metric")
    }
}
