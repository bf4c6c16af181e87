//! Optional-field merge primitives.
//!
//! Two combinators cover every field of a policy: last-writer-wins
//! override for optional scalars, and set union for optional lists. Both
//! preserve the tri-state nature of configuration fields: "never
//! specified" (`None`) is distinct from "explicitly specified", including
//! explicitly specified as `false`, `0`, or an empty list.

use std::collections::BTreeSet;

#[cfg(test)]
#[path = "merge_tests.rs"]
mod tests;

/// Returns the child value if it is explicitly set, otherwise the parent.
///
/// This is the merge rule for every optional scalar field (`protect`,
/// `strict`, `enforce_admins`, `dismiss_stale_reviews`,
/// `require_code_owner_reviews`, `required_approving_review_count`).
/// Because "set" is modeled as `Option::Some`, an explicit zero or
/// `false` from the child still overrides the parent.
///
/// # Examples
///
/// ```rust
/// use policy_model::select_override;
///
/// assert_eq!(select_override(Some(true), None), Some(true));
/// assert_eq!(select_override(Some(true), Some(false)), Some(false));
/// assert_eq!(select_override(None, Some(0)), Some(0));
/// ```
pub fn select_override<T>(parent: Option<T>, child: Option<T>) -> Option<T> {
    child.or(parent)
}

/// Merges two optional string lists by deduplicated set union.
///
/// An unset child leaves the parent untouched and an unset parent adopts
/// the child as-is, so a level that never mentions a list field cannot
/// disturb it. When both sides are set the result is the union of both,
/// sorted lexicographically for reproducible output. Note that
/// `Some(vec![])` is a set-but-empty value and participates in the union,
/// which is not the same as `None`.
///
/// # Examples
///
/// ```rust
/// use policy_model::union_lists;
///
/// let parent = Some(vec!["ci/build".to_string()]);
/// let child = Some(vec!["ci/test".to_string(), "ci/build".to_string()]);
/// assert_eq!(
///     union_lists(parent, child),
///     Some(vec!["ci/build".to_string(), "ci/test".to_string()])
/// );
/// assert_eq!(union_lists(Some(vec!["a".to_string()]), None), Some(vec!["a".to_string()]));
/// ```
pub fn union_lists(
    parent: Option<Vec<String>>,
    child: Option<Vec<String>>,
) -> Option<Vec<String>> {
    match (parent, child) {
        (parent, None) => parent,
        (None, child) => child,
        (Some(parent), Some(child)) => {
            let merged: BTreeSet<String> = parent.into_iter().chain(child).collect();
            Some(merged.into_iter().collect())
        }
    }
}
