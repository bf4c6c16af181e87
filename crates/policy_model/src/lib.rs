//! Branch-protection policy value types and merge engine.
//!
//! This crate defines the partial, inheritable `Policy` type and the merge
//! semantics used to cascade policies across hierarchy levels (global →
//! organization → repository → branch). Every field of a policy is
//! optional: an unset field inherits whatever the parent level resolved,
//! a set field overrides it. List-valued fields accumulate by set union
//! instead of overriding, so no hierarchy level can silently drop a
//! required context or an allowed team added by an ancestor.
//!
//! Loading and parsing raw configuration documents is owned by an external
//! loader; this crate only defines the serde shape those documents must
//! honor (fields present-if-set, absent-if-unset).

pub mod errors;
pub mod legacy;
pub mod merge;
pub mod policy;

pub use errors::{PolicyError, PolicyResult};
pub use legacy::{DeprecationTracker, LegacyPolicy};
pub use merge::{select_override, union_lists};
pub use policy::{ContextPolicy, Policy, Restrictions, ReviewPolicy};
