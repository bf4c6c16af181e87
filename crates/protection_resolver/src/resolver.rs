//! The cascade resolver.
//!
//! Merges the policy fragments along the global → org → repo → branch
//! path, folds in CI-derived required contexts, and enforces the
//! resolution-time invariants before reporting a branch as protected.

use job_catalog::{branch_requirements, JobCatalog};
use policy_model::{ContextPolicy, Policy};
use tracing::{debug, warn};

use crate::errors::{ResolutionError, ResolutionResult};
use crate::hierarchy::BranchProtection;

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;

/// Resolves effective branch-protection policies against one
/// configuration and one job catalog.
///
/// The resolver borrows both inputs read-only; the only state it touches
/// is the configuration's deprecation tracker, which is safe under
/// concurrent `resolve` calls.
///
/// # Examples
///
/// ```rust
/// use job_catalog::JobCatalog;
/// use protection_resolver::{BranchProtection, Org, ProtectionResolver};
///
/// let mut protection = BranchProtection::new();
/// protection.policy.protect = Some(true);
/// protection.orgs.insert("acme".to_string(), Org::default());
///
/// let catalog = JobCatalog::new();
/// let resolver = ProtectionResolver::new(&protection, &catalog);
///
/// let policy = resolver.resolve("acme", "widgets", "main")?.unwrap();
/// assert_eq!(policy.protect, Some(true));
/// # Ok::<(), protection_resolver::ResolutionError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ProtectionResolver<'a> {
    protection: &'a BranchProtection,
    catalog: &'a JobCatalog,
}

impl<'a> ProtectionResolver<'a> {
    /// Creates a resolver over a configuration and a job catalog.
    pub fn new(protection: &'a BranchProtection, catalog: &'a JobCatalog) -> Self {
        Self {
            protection,
            catalog,
        }
    }

    /// Resolves the effective protection policy for one branch.
    ///
    /// Returns `Ok(None)` when no protection is configured or applicable
    /// for the branch: the organization is unknown, or every level along
    /// the path left the policy undefined. Returns `Ok(Some(policy))`
    /// with the fully merged policy otherwise.
    ///
    /// # Errors
    ///
    /// * [`ResolutionError::Policy`] when a fragment mixes legacy and
    ///   structured fields.
    /// * [`ResolutionError::MissingProtectField`] when a branch fragment
    ///   is defined but `protect` never resolves.
    /// * [`ResolutionError::ProtectionRequiredByJobs`] when CI requires
    ///   contexts but an ancestor set `protect: false`.
    /// * [`ResolutionError::DisabledPolicyConflict`] when the resolved
    ///   policy pairs `protect: false` with a protection body and
    ///   `allow_disabled_policies` is off.
    pub fn resolve(
        &self,
        org: &str,
        repo: &str,
        branch: &str,
    ) -> ResolutionResult<Option<Policy>> {
        let bp = self.protection;
        let mut policy = Policy::new().apply(&bp.policy, &bp.deprecation)?;

        let Some(org_config) = bp.orgs.get(org) else {
            // An unknown org means protection is simply not configured,
            // not that the configuration is wrong.
            return Ok(None);
        };
        policy = policy.apply(&org_config.policy, &bp.deprecation)?;

        if let Some(repo_config) = org_config.repos.get(repo) {
            policy = policy.apply(&repo_config.policy, &bp.deprecation)?;

            if let Some(branch_config) = repo_config.branches.get(branch) {
                policy = policy.apply(&branch_config.policy, &bp.deprecation)?;
                if policy.protect.is_none() {
                    return Err(ResolutionError::MissingProtectField {
                        org: org.to_string(),
                        repo: repo.to_string(),
                        branch: branch.to_string(),
                    });
                }
            }
        }

        policy = self.apply_job_requirements(policy, org, repo, branch)?;
        policy = self.check_disabled_policy(policy, org, repo, branch)?;

        if !policy.is_defined() {
            return Ok(None);
        }
        Ok(Some(policy))
    }

    /// Merges CI-derived required contexts into the resolved policy.
    ///
    /// Applied strictly after the hierarchy cascade, so a derived
    /// `protect: true` (under `protect-tested-repos`) only fills the gap
    /// when no ancestor set the flag; an ancestor's explicit value has
    /// already won by override.
    fn apply_job_requirements(
        &self,
        policy: Policy,
        org: &str,
        repo: &str,
        branch: &str,
    ) -> ResolutionResult<Policy> {
        let contexts = branch_requirements(self.catalog, org, repo, branch);
        if contexts.is_empty() {
            return Ok(policy);
        }
        if policy.protect == Some(false) {
            return Err(ResolutionError::ProtectionRequiredByJobs {
                org: org.to_string(),
                repo: repo.to_string(),
                branch: branch.to_string(),
            });
        }

        debug!(org, repo, branch, ?contexts, "requiring CI-derived contexts");
        let derived = Policy {
            protect: self.protection.protect_tested.then_some(true),
            required_status_checks: Some(ContextPolicy {
                contexts: Some(contexts),
                strict: None,
            }),
            ..Policy::default()
        };
        Ok(policy.apply(&derived, &self.protection.deprecation)?)
    }

    /// Rejects or collapses a policy that disables protection while
    /// still carrying a protection body.
    fn check_disabled_policy(
        &self,
        mut policy: Policy,
        org: &str,
        repo: &str,
        branch: &str,
    ) -> ResolutionResult<Policy> {
        if policy.protect != Some(false) {
            return Ok(policy);
        }

        policy.protect = None;
        if policy.is_defined() {
            if !self.protection.allow_disabled_policies {
                return Err(ResolutionError::DisabledPolicyConflict {
                    org: org.to_string(),
                    repo: repo.to_string(),
                    branch: branch.to_string(),
                });
            }
            warn!(org, repo, branch, "policy defines settings but has protect: false; dropping them");
            policy = Policy::default();
        }
        policy.protect = Some(false);
        Ok(policy)
    }
}
