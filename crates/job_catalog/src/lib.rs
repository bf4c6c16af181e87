//! CI job catalog and required-context derivation.
//!
//! A [`JobCatalog`] maps `"org/repo"` keys to the ordered list of CI jobs
//! configured for that repository. The catalog is populated by an
//! external CI configuration loader; this crate only reads the minimal
//! job fields needed to decide which status-check contexts must be
//! required on a protected branch: the branch matcher, the run
//! conditions, the reporting flags, and the dependent-job forest.

pub mod job;
pub mod requirements;

pub use job::{Brancher, Job, JobCatalog};
pub use requirements::{branch_requirements, job_requirements};
