//! Policy merge error types.
//!
//! Domain-specific errors raised while merging policy fragments. All of
//! these are deterministic functions of the configuration content and are
//! expected to be fixed by editing the configuration, never by retrying.

use thiserror::Error;

/// Errors raised by the policy merge engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    /// A single policy fragment sets both the deprecated flat fields
    /// (`protect-by-default`, `require-contexts`, `allow-push`) and the
    /// structured policy fields. The two formats cannot be reconciled
    /// within one fragment.
    #[error("cannot mix legacy and structured branch protection fields in one policy")]
    MixedLegacyFields,
}

/// Result type alias for policy merge operations.
pub type PolicyResult<T> = Result<T, PolicyError>;
