//! Shared error taxonomy for synthesis failures.
//!
//! Every failure is raised synchronously at build time and aborts the
//! affected component's build; nothing is retried and nothing is partially
//! emitted.

use crate::cidr::CidrError;

/// Core result type
pub type CoreResult<T> = Result<T, CoreError>;

/// Shared build-time error taxonomy
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A configuration list has the wrong number of entries
    #[error("{what} must have exactly {expected} entries, got {actual}")]
    Cardinality {
        /// What was miscounted (e.g. `availability zones`)
        what: String,
        /// Required count
        expected: usize,
        /// Provided count
        actual: usize,
    },

    /// A capacity budget was exceeded
    #[error("total capacity {total} exceeds the budget of {limit} units")]
    CapacityExceeded {
        /// Computed total
        total: u32,
        /// Budget that was exceeded
        limit: u32,
    },

    /// A routing rule was registered with no match conditions
    #[error("rule {rule} has no match conditions")]
    MissingMatchCondition {
        /// Name of the offending rule
        rule: String,
    },

    /// Two rules in one set share a priority
    #[error("priority {priority} is assigned to both {first} and {second}")]
    ConflictingPriority {
        /// Duplicated priority
        priority: u32,
        /// First rule holding the priority
        first: String,
        /// Second rule holding the priority
        second: String,
    },

    /// A named entity was not found
    #[error("{kind} not found: {name}")]
    NotFound {
        /// Entity kind
        kind: String,
        /// Name that was looked up
        name: String,
    },

    /// A named entity already exists
    #[error("{kind} already exists: {name}")]
    AlreadyExists {
        /// Entity kind
        kind: String,
        /// Name that collided
        name: String,
    },

    /// CIDR derivation failed
    #[error("invalid CIDR: {0}")]
    InvalidCidr(#[from] CidrError),
}
