//! Match conditions for listener rules.

use serde::{Deserialize, Serialize};

/// One condition a request must satisfy to hit a listener rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchCondition {
    /// Request path matches the given pattern
    PathPattern(String),
    /// Host header equals the given value
    HostHeader(String),
}
