//! Required-context derivation from the job dependency forest.
//!
//! A branch must require the context of every job that can run
//! unconditionally against it and reports a non-optional status. The walk
//! is a pure recursion over the `run_after_success` forest, accumulating
//! into a set so duplicate context names across branches of the forest
//! collapse to one entry.

use std::collections::BTreeSet;

use tracing::debug;

use crate::job::{Job, JobCatalog};

#[cfg(test)]
#[path = "requirements_tests.rs"]
mod tests;

/// Collects the required contexts contributed by `jobs` for `branch`.
///
/// A top-level job that neither always runs nor carries a run-if-changed
/// condition never runs unconditionally, so neither it nor its dependents
/// can be required. Dependent jobs (`as_dependent = true`) are exempt
/// from that check: they run whenever their parent succeeds, so only
/// their reporting flags matter. A job contributes its context unless it
/// is skip-report or optional; its dependents are walked either way.
pub fn job_requirements(jobs: &[Job], branch: &str, as_dependent: bool) -> BTreeSet<String> {
    let mut required = BTreeSet::new();
    for job in jobs {
        if !job.brancher.runs_against(branch) {
            continue;
        }
        if !as_dependent && !job.always_run && !job.has_run_if_changed() {
            continue;
        }
        if !job.skip_report && !job.optional {
            required.insert(job.context.clone());
        }
        required.extend(job_requirements(&job.run_after_success, branch, true));
    }
    required
}

/// Derives the required contexts for a branch of `org/repo`.
///
/// A repository absent from the catalog contributes no requirements. The
/// result is sorted lexicographically.
pub fn branch_requirements(
    catalog: &JobCatalog,
    org: &str,
    repo: &str,
    branch: &str,
) -> Vec<String> {
    let Some(jobs) = catalog.jobs_for(org, repo) else {
        return Vec::new();
    };
    let required: Vec<String> = job_requirements(jobs, branch, false).into_iter().collect();
    debug!(org, repo, branch, contexts = required.len(), "derived required contexts");
    required
}
