//! Synthesis context threaded through every builder.
//!
//! The context replaces the ambient scope/region/account values the legacy
//! design passed implicitly: every builder call receives it explicitly.

use serde::{Deserialize, Serialize};

/// Reference to a pre-issued instance profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceProfile {
    /// Full resource name of the profile
    pub arn: String,
    /// Short name used when attaching to an instance
    pub name: String,
}

/// Explicit context for a synthesis run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthContext {
    /// Logical scope name - the root of every derived identifier
    pub scope: String,
    /// Target region
    pub region: String,
    /// Target account
    pub account: String,
    /// SSH key pair name for synthesized instances
    pub key_name: Option<String>,
    /// Instance profile attached to synthesized instances
    pub instance_profile: Option<InstanceProfile>,
}

impl SynthContext {
    /// Create a new context
    #[must_use]
    pub fn new(scope: impl Into<String>, region: impl Into<String>, account: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            region: region.into(),
            account: account.into(),
            key_name: None,
            instance_profile: None,
        }
    }

    /// Set the SSH key pair name
    #[must_use]
    pub fn with_key_name(mut self, key_name: impl Into<String>) -> Self {
        self.key_name = Some(key_name.into());
        self
    }

    /// Set the instance profile
    #[must_use]
    pub fn with_instance_profile(mut self, profile: InstanceProfile) -> Self {
        self.instance_profile = Some(profile);
        self
    }

    /// Qualify a logical name with this context's scope
    #[must_use]
    pub fn qualify(&self, name: &str) -> String {
        format!("{}/{}", self.scope, name)
    }
}
