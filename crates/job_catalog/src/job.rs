//! Job descriptors and the branch matcher.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;

/// Branch matcher for a CI job.
///
/// A job runs against a branch when the branch is not on the skip list
/// and either the include list is empty (match everything) or contains
/// the branch.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Brancher {
    /// Branches the job runs against. Empty means all branches.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub branches: Vec<String>,

    /// Branches the job never runs against. Takes precedence over
    /// `branches`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skip_branches: Vec<String>,
}

impl Brancher {
    /// Returns `true` if the job runs against `branch`.
    pub fn runs_against(&self, branch: &str) -> bool {
        if self.skip_branches.iter().any(|b| b == branch) {
            return false;
        }
        self.branches.is_empty() || self.branches.iter().any(|b| b == branch)
    }
}

/// A CI job as seen by the protection resolver.
///
/// Only the fields that decide whether the job's context must be required
/// on a branch are modeled here; everything else about job definitions is
/// owned by the CI configuration loader.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// Job name, for diagnostics only.
    pub name: String,

    /// The status-check context the job reports under.
    pub context: String,

    /// Whether the job runs on every change.
    #[serde(default)]
    pub always_run: bool,

    /// Change predicate indicator. The predicate itself is evaluated by
    /// the CI system; the resolver only treats a non-empty indicator as
    /// "this job may run", a deliberately conservative reading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_if_changed: Option<String>,

    /// Whether the job reports no status context at all.
    #[serde(default)]
    pub skip_report: bool,

    /// Whether the job's context is informational and never required.
    #[serde(default)]
    pub optional: bool,

    /// Which branches the job applies to.
    #[serde(flatten)]
    pub brancher: Brancher,

    /// Jobs triggered after this one succeeds. Must form an acyclic
    /// forest; the requirements walk does not defend against cycles.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub run_after_success: Vec<Job>,
}

impl Job {
    /// Returns `true` if the job has a run-if-changed condition.
    ///
    /// Only non-emptiness of the indicator is checked; evaluating the
    /// predicate against an actual change set is out of scope.
    pub fn has_run_if_changed(&self) -> bool {
        self.run_if_changed.as_deref().is_some_and(|p| !p.is_empty())
    }
}

/// Catalog of CI jobs keyed by `"org/repo"`.
///
/// # Examples
///
/// ```rust
/// use job_catalog::{Job, JobCatalog};
///
/// let mut catalog = JobCatalog::new();
/// catalog.insert(
///     "acme",
///     "widgets",
///     vec![Job {
///         name: "unit".to_string(),
///         context: "ci/unit".to_string(),
///         always_run: true,
///         run_if_changed: None,
///         skip_report: false,
///         optional: false,
///         brancher: Default::default(),
///         run_after_success: vec![],
///     }],
/// );
/// assert!(catalog.jobs_for("acme", "widgets").is_some());
/// assert!(catalog.jobs_for("acme", "gadgets").is_none());
/// ```
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct JobCatalog {
    #[serde(flatten)]
    jobs: HashMap<String, Vec<Job>>,
}

impl JobCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the jobs for a repository, replacing any existing entry.
    pub fn insert(&mut self, org: &str, repo: &str, jobs: Vec<Job>) {
        self.jobs.insert(format!("{org}/{repo}"), jobs);
    }

    /// Returns the jobs configured for a repository, if any.
    pub fn jobs_for(&self, org: &str, repo: &str) -> Option<&[Job]> {
        self.jobs.get(&format!("{org}/{repo}")).map(Vec::as_slice)
    }
}
