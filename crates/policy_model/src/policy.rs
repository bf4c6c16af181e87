//! Branch-protection policy types and the structural merge engine.
//!
//! A [`Policy`] is a partial specification: every field is optional so an
//! unset field means "inherit from the parent hierarchy level", never
//! "disabled". Merging is field-by-field: optional scalars override,
//! list fields union, and the three nested sub-policies merge recursively
//! with a short-circuit when either side is wholly unset.

use serde::{Deserialize, Serialize};

use crate::errors::PolicyResult;
use crate::legacy::{DeprecationTracker, LegacyPolicy};
use crate::merge::{select_override, union_lists};
use crate::PolicyError;

#[cfg(test)]
#[path = "policy_tests.rs"]
mod tests;

/// A partial, inheritable branch-protection policy.
///
/// Policies cascade from the global level down to a single branch; at
/// each level an unset field inherits the ancestor's value and a set
/// field overrides it. A policy also carries the deprecated flat fields
/// as a flattened shadow for backward compatibility; a fragment must not
/// use both shapes at once.
///
/// # Examples
///
/// ```rust
/// use policy_model::{DeprecationTracker, Policy};
///
/// let parent = Policy {
///     protect: Some(true),
///     ..Policy::default()
/// };
/// let child = Policy {
///     enforce_admins: Some(true),
///     ..Policy::default()
/// };
///
/// let tracker = DeprecationTracker::new();
/// let merged = parent.apply(&child, &tracker)?;
/// assert_eq!(merged.protect, Some(true));
/// assert_eq!(merged.enforce_admins, Some(true));
/// # Ok::<(), policy_model::PolicyError>(())
/// ```
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Policy {
    /// Whether branch protection is enabled, if set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protect: Option<bool>,

    /// Required CI status contexts, if set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_status_checks: Option<ContextPolicy>,

    /// Whether protection rules also apply to administrators, if set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enforce_admins: Option<bool>,

    /// Who may merge to the branch, if set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restrictions: Option<Restrictions>,

    /// Pull-request review requirements, if set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_pull_request_reviews: Option<ReviewPolicy>,

    /// Deprecated flat fields, retained for backward compatibility only.
    #[serde(flatten)]
    pub legacy: LegacyPolicy,
}

impl Policy {
    /// Creates an empty policy with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if at least one structured field is set.
    ///
    /// An all-unset policy is semantically absent: it neither enables nor
    /// disables anything and merging it is the identity.
    pub fn is_defined(&self) -> bool {
        self.protect.is_some()
            || self.required_status_checks.is_some()
            || self.enforce_admins.is_some()
            || self.restrictions.is_some()
            || self.required_pull_request_reviews.is_some()
    }

    /// Returns `true` if the protect flag is set in either the structured
    /// or the deprecated form.
    pub fn has_protect(&self) -> bool {
        self.protect.is_some() || self.legacy.protect.is_some()
    }

    /// Merges `child` onto `self`, producing the combined policy.
    ///
    /// Scalar fields take the child's value when set, otherwise the
    /// parent's. Nested sub-policies merge recursively with contexts,
    /// users and teams accumulated by set union. A child in the
    /// deprecated flat format is translated to the structured shape first
    /// (emitting the one-time deprecation warning through `deprecation`).
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::MixedLegacyFields`] when `child` sets both
    /// deprecated and structured fields.
    pub fn apply(&self, child: &Policy, deprecation: &DeprecationTracker) -> PolicyResult<Policy> {
        let translated;
        let child = if child.legacy.is_defined() {
            if child.is_defined() {
                return Err(PolicyError::MixedLegacyFields);
            }
            deprecation.warn_once();
            translated = child.legacy.to_policy();
            &translated
        } else {
            child
        };

        Ok(Policy {
            protect: select_override(self.protect, child.protect),
            required_status_checks: merge_context_policy(
                self.required_status_checks.as_ref(),
                child.required_status_checks.as_ref(),
            ),
            enforce_admins: select_override(self.enforce_admins, child.enforce_admins),
            restrictions: merge_restrictions(
                self.restrictions.as_ref(),
                child.restrictions.as_ref(),
            ),
            required_pull_request_reviews: merge_review_policy(
                self.required_pull_request_reviews.as_ref(),
                child.required_pull_request_reviews.as_ref(),
            ),
            legacy: LegacyPolicy::default(),
        })
    }
}

/// Required CI status contexts for a protected branch.
///
/// Contexts accumulate across hierarchy levels by set union; `strict`
/// overrides like any scalar.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ContextPolicy {
    /// Status-check contexts that must be green before merging.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contexts: Option<Vec<String>>,

    /// Whether new commits on the base branch invalidate existing
    /// approvals, if set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
}

/// Pull-request review requirements.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ReviewPolicy {
    /// Who may dismiss reviews; merged recursively like any restrictions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dismissal_restrictions: Option<Restrictions>,

    /// Whether new commits automatically dismiss stale reviews, if set.
    #[serde(
        rename = "dismiss_stale_reviews",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub dismiss_stale: Option<bool>,

    /// Whether code owners must approve, if set.
    #[serde(
        rename = "require_code_owner_reviews",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub require_owners: Option<bool>,

    /// Number of required approvals, if set. An explicit 0 disables the
    /// requirement and still overrides an ancestor's value.
    #[serde(
        rename = "required_approving_review_count",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub approvals: Option<u32>,
}

/// Users and teams allowed to merge to a branch.
///
/// Both lists accumulate by set union when merging, so no level can
/// remove access granted by an ancestor.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Restrictions {
    /// Allowed user identifiers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<String>>,

    /// Allowed team identifiers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teams: Option<Vec<String>>,
}

/// Merges two optional context policies, short-circuiting when either
/// side is wholly unset.
pub fn merge_context_policy(
    parent: Option<&ContextPolicy>,
    child: Option<&ContextPolicy>,
) -> Option<ContextPolicy> {
    match (parent, child) {
        (parent, None) => parent.cloned(),
        (None, child) => child.cloned(),
        (Some(parent), Some(child)) => Some(ContextPolicy {
            contexts: union_lists(parent.contexts.clone(), child.contexts.clone()),
            strict: select_override(parent.strict, child.strict),
        }),
    }
}

/// Merges two optional merge restrictions, short-circuiting when either
/// side is wholly unset.
pub fn merge_restrictions(
    parent: Option<&Restrictions>,
    child: Option<&Restrictions>,
) -> Option<Restrictions> {
    match (parent, child) {
        (parent, None) => parent.cloned(),
        (None, child) => child.cloned(),
        (Some(parent), Some(child)) => Some(Restrictions {
            users: union_lists(parent.users.clone(), child.users.clone()),
            teams: union_lists(parent.teams.clone(), child.teams.clone()),
        }),
    }
}

/// Merges two optional review policies, short-circuiting when either
/// side is wholly unset.
pub fn merge_review_policy(
    parent: Option<&ReviewPolicy>,
    child: Option<&ReviewPolicy>,
) -> Option<ReviewPolicy> {
    match (parent, child) {
        (parent, None) => parent.cloned(),
        (None, child) => child.cloned(),
        (Some(parent), Some(child)) => Some(ReviewPolicy {
            dismissal_restrictions: merge_restrictions(
                parent.dismissal_restrictions.as_ref(),
                child.dismissal_restrictions.as_ref(),
            ),
            dismiss_stale: select_override(parent.dismiss_stale, child.dismiss_stale),
            require_owners: select_override(parent.require_owners, child.require_owners),
            approvals: select_override(parent.approvals, child.approvals),
        }),
    }
}
