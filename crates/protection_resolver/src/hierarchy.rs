//! Hierarchy containers for the policy cascade.
//!
//! Four nesting levels, each holding its own partial policy plus the
//! mapping to the next level down: global → organization → repository →
//! branch. Each level names its policy field explicitly rather than
//! inheriting fields from an embedded type, so the cascade in the
//! resolver reads as a plain chain of lookups and merges.

use std::collections::HashMap;

use policy_model::{DeprecationTracker, Policy};
use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "hierarchy_tests.rs"]
mod tests;

/// The global branch-protection configuration.
///
/// Holds the base policy every organization inherits, the per-org
/// containers, and the two flags that modify resolution behavior. The
/// deprecation tracker is process-lifetime state owned by this container
/// and shared across all `resolve` calls against it.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct BranchProtection {
    /// Base policy inherited by every organization.
    #[serde(flatten)]
    pub policy: Policy,

    /// Auto-enable protection on branches whose CI jobs require
    /// contexts, even when no level sets `protect` explicitly.
    #[serde(rename = "protect-tested-repos", default)]
    pub protect_tested: bool,

    /// Permit a resolved policy body to coexist with `protect: false`,
    /// downgrading the conflict to a warning that drops the body.
    #[serde(default)]
    pub allow_disabled_policies: bool,

    /// Per-organization configuration.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub orgs: HashMap<String, Org>,

    /// One-time deprecation warning state, never serialized.
    #[serde(skip)]
    pub deprecation: DeprecationTracker,
}

impl BranchProtection {
    /// Creates an empty configuration with no orgs and both flags off.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Organization-level container: a policy plus its repositories.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Org {
    #[serde(flatten)]
    pub policy: Policy,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub repos: HashMap<String, Repo>,
}

/// Repository-level container: a policy plus its branches.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Repo {
    #[serde(flatten)]
    pub policy: Policy,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub branches: HashMap<String, Branch>,
}

/// Branch-level container: the innermost policy fragment.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Branch {
    #[serde(flatten)]
    pub policy: Policy,
}
