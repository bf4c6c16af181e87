//! Deprecated flat-format policy adapter.
//!
//! Older configurations expressed branch protection through three flat
//! fields (`protect-by-default`, `require-contexts`, `allow-push`)
//! directly on the policy. This module detects that shape, translates it
//! into the structured [`Policy`](crate::policy::Policy) form, and tracks
//! whether the deprecation warning has already been emitted for a given
//! configuration so it fires at most once per process lifetime of that
//! configuration.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::policy::{ContextPolicy, Policy, Restrictions};

#[cfg(test)]
#[path = "legacy_tests.rs"]
mod tests;

/// The deprecated flat branch-protection fields.
///
/// These fields are carried as a flattened shadow on [`Policy`] purely for
/// backward compatibility. A fragment may use either this shape or the
/// structured fields, never both.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct LegacyPolicy {
    /// Deprecated form of `protect`.
    #[serde(
        rename = "protect-by-default",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub protect: Option<bool>,

    /// Deprecated form of `required_status_checks.contexts`.
    #[serde(
        rename = "require-contexts",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub contexts: Option<Vec<String>>,

    /// Deprecated form of `restrictions.teams`.
    #[serde(
        rename = "allow-push",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub pushers: Option<Vec<String>>,
}

impl LegacyPolicy {
    /// Returns `true` if any of the deprecated fields is set.
    pub fn is_defined(&self) -> bool {
        self.protect.is_some() || self.contexts.is_some() || self.pushers.is_some()
    }

    /// Translates the deprecated fields into an equivalent structured policy.
    ///
    /// The legacy protect flag maps to `protect`, the legacy context list
    /// to `required_status_checks.contexts`, and the legacy pusher list to
    /// `restrictions.teams`. Unset legacy fields stay unset in the result.
    pub fn to_policy(&self) -> Policy {
        let mut policy = Policy {
            protect: self.protect,
            ..Policy::default()
        };
        if self.contexts.is_some() {
            policy.required_status_checks = Some(ContextPolicy {
                contexts: self.contexts.clone(),
                strict: None,
            });
        }
        if self.pushers.is_some() {
            policy.restrictions = Some(Restrictions {
                users: None,
                teams: self.pushers.clone(),
            });
        }
        policy
    }
}

/// Once-per-configuration deprecation warning state.
///
/// The hierarchy container owns one tracker for its whole lifetime. The
/// flag is an atomic because `resolve` may be called concurrently for
/// different branches against the same container; the swap guarantees the
/// warning is emitted by exactly one caller.
#[derive(Debug, Default)]
pub struct DeprecationTracker {
    warned: AtomicBool,
}

impl DeprecationTracker {
    /// Creates a tracker that has not warned yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits the deprecation warning if no caller has emitted it before.
    pub fn warn_once(&self) {
        if !self.warned.swap(true, Ordering::Relaxed) {
            warn!(
                "protect-by-default, require-contexts and allow-push are deprecated; \
                 replace them with the structured branch protection fields"
            );
        }
    }

    /// Returns `true` if the warning has already been emitted.
    pub fn has_warned(&self) -> bool {
        self.warned.load(Ordering::Relaxed)
    }
}

impl Clone for DeprecationTracker {
    fn clone(&self) -> Self {
        Self {
            warned: AtomicBool::new(self.warned.load(Ordering::Relaxed)),
        }
    }
}
