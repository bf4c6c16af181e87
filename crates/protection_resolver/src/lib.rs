//! Effective branch-protection policy resolution.
//!
//! This crate orchestrates the policy cascade: starting from the global
//! policy, it merges the organization, repository, and branch fragments
//! in order, folds in the status-check contexts derived from the CI job
//! catalog, and enforces the invariants that only make sense once a
//! policy is fully resolved (a defined branch policy must know its
//! `protect` value; a disabled policy must not carry a protection body).
//!
//! [`ProtectionResolver::resolve`] is the single entry point consumed by
//! the CI/VCS integration layer.

pub mod errors;
pub mod hierarchy;
pub mod resolver;

pub use errors::{ResolutionError, ResolutionResult};
pub use hierarchy::{Branch, BranchProtection, Org, Repo};
pub use resolver::ProtectionResolver;
