//! Resolution error types.
//!
//! Every failure here is a deterministic consequence of the configuration
//! content; callers fix the configuration instead of retrying.

use policy_model::PolicyError;
use thiserror::Error;

/// Errors raised while resolving an effective branch-protection policy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    /// A policy fragment in the cascade failed to merge.
    #[error(transparent)]
    Policy(#[from] PolicyError),

    /// A branch-level fragment is defined but `protect` is still unset
    /// after merging through every ancestor level.
    #[error("branch policy for {org}/{repo}@{branch} must resolve a protect value")]
    MissingProtectField {
        org: String,
        repo: String,
        branch: String,
    },

    /// CI jobs require status contexts on the branch but an ancestor
    /// explicitly disabled protection.
    #[error("required CI jobs for {org}/{repo}@{branch} need branch protection, but protect is false")]
    ProtectionRequiredByJobs {
        org: String,
        repo: String,
        branch: String,
    },

    /// The resolved policy disables protection yet still carries
    /// protection settings, and the configuration does not allow that
    /// combination.
    #[error("{org}/{repo}@{branch} defines a policy, which requires protect: true")]
    DisabledPolicyConflict {
        org: String,
        repo: String,
        branch: String,
    },
}

/// Result type alias for resolution operations.
pub type ResolutionResult<T> = Result<T, ResolutionError>;
