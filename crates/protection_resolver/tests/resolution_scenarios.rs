//! End-to-end resolution scenarios from serialized configuration.
//!
//! These tests feed the resolver with configurations and job catalogs
//! deserialized from documents, the way an external loader would supply
//! them, and check the resolved policies (or failures) seen by the
//! integration layer.

use job_catalog::JobCatalog;
use policy_model::PolicyError;
use protection_resolver::{BranchProtection, ProtectionResolver, ResolutionError};

fn resolve_from(
    config: &str,
    catalog: &str,
    org: &str,
    repo: &str,
    branch: &str,
) -> Result<Option<policy_model::Policy>, ResolutionError> {
    let protection: BranchProtection = toml::from_str(config).expect("config parses");
    let catalog: JobCatalog = serde_json::from_str(catalog).expect("catalog parses");
    ProtectionResolver::new(&protection, &catalog).resolve(org, repo, branch)
}

const EMPTY_CATALOG: &str = "{}";

#[test]
fn org_wide_protection_with_branch_overrides() {
    let config = r#"
        protect = true

        [required_status_checks]
        contexts = ["ci/build"]

        [orgs.acme]
        enforce_admins = true

        [orgs.acme.repos.widgets.branches.main]
        protect = true

        [orgs.acme.repos.widgets.branches.main.required_status_checks]
        contexts = ["ci/release"]
        strict = true
    "#;

    let policy = resolve_from(config, EMPTY_CATALOG, "acme", "widgets", "main")
        .unwrap()
        .unwrap();
    assert_eq!(policy.protect, Some(true));
    assert_eq!(policy.enforce_admins, Some(true));
    let checks = policy.required_status_checks.unwrap();
    assert_eq!(
        checks.contexts,
        Some(vec!["ci/build".to_string(), "ci/release".to_string()])
    );
    assert_eq!(checks.strict, Some(true));
}

#[test]
fn sibling_branches_resolve_independently() {
    let config = r#"
        [orgs.acme]
        protect = true

        [orgs.acme.repos.widgets.branches.main]
        protect = true
        enforce_admins = true

        [orgs.acme.repos.widgets.branches.dev]
        protect = false
    "#;

    let main = resolve_from(config, EMPTY_CATALOG, "acme", "widgets", "main")
        .unwrap()
        .unwrap();
    assert_eq!(main.enforce_admins, Some(true));

    let dev = resolve_from(config, EMPTY_CATALOG, "acme", "widgets", "dev")
        .unwrap()
        .unwrap();
    assert_eq!(dev.protect, Some(false));
    assert!(dev.enforce_admins.is_none());
}

#[test]
fn review_policy_cascades_with_explicit_zero_approvals() {
    let config = r#"
        [orgs.acme]
        protect = true

        [orgs.acme.required_pull_request_reviews]
        required_approving_review_count = 2
        dismiss_stale_reviews = true

        [orgs.acme.repos.widgets.required_pull_request_reviews]
        required_approving_review_count = 0
    "#;

    let policy = resolve_from(config, EMPTY_CATALOG, "acme", "widgets", "main")
        .unwrap()
        .unwrap();
    let reviews = policy.required_pull_request_reviews.unwrap();
    assert_eq!(reviews.approvals, Some(0));
    assert_eq!(reviews.dismiss_stale, Some(true));
}

#[test]
fn tested_branch_gets_protection_and_derived_contexts() {
    let config = r#"
        protect-tested-repos = true

        [orgs.acme]
    "#;
    let catalog = r#"{
        "acme/widgets": [
            {
                "name": "unit",
                "context": "ci/unit",
                "always_run": true,
                "run_after_success": [
                    {"name": "e2e", "context": "ci/e2e"}
                ]
            },
            {
                "name": "lint",
                "context": "ci/lint",
                "always_run": true,
                "optional": true
            }
        ]
    }"#;

    let policy = resolve_from(config, catalog, "acme", "widgets", "main")
        .unwrap()
        .unwrap();
    assert_eq!(policy.protect, Some(true));
    assert_eq!(
        policy.required_status_checks.unwrap().contexts,
        Some(vec!["ci/e2e".to_string(), "ci/unit".to_string()])
    );
}

#[test]
fn disabled_protection_with_required_jobs_fails() {
    let config = r#"
        [orgs.acme]
        protect = false
    "#;
    let catalog = r#"{
        "acme/widgets": [
            {"name": "unit", "context": "ci/unit", "always_run": true}
        ]
    }"#;

    let result = resolve_from(config, catalog, "acme", "widgets", "main");
    assert!(matches!(
        result,
        Err(ResolutionError::ProtectionRequiredByJobs { .. })
    ));
}

#[test]
fn legacy_document_resolves_like_its_structured_equivalent() {
    let legacy_config = r#"
        [orgs.acme.repos.widgets]
        protect-by-default = true
        require-contexts = ["ci/build"]
        allow-push = ["release-team"]
    "#;
    let structured_config = r#"
        [orgs.acme.repos.widgets]
        protect = true

        [orgs.acme.repos.widgets.required_status_checks]
        contexts = ["ci/build"]

        [orgs.acme.repos.widgets.restrictions]
        teams = ["release-team"]
    "#;

    let from_legacy = resolve_from(legacy_config, EMPTY_CATALOG, "acme", "widgets", "main")
        .unwrap()
        .unwrap();
    let from_structured =
        resolve_from(structured_config, EMPTY_CATALOG, "acme", "widgets", "main")
            .unwrap()
            .unwrap();
    assert_eq!(from_legacy, from_structured);
}

#[test]
fn mixed_format_document_is_rejected() {
    let config = r#"
        [orgs.acme]
        protect = true
        require-contexts = ["ci/build"]
    "#;

    let result = resolve_from(config, EMPTY_CATALOG, "acme", "widgets", "main");
    assert_eq!(
        result,
        Err(ResolutionError::Policy(PolicyError::MixedLegacyFields))
    );
}

#[test]
fn unconfigured_org_yields_nothing_even_with_global_policy() {
    let config = r#"
        protect = true

        [orgs.acme]
    "#;

    let result = resolve_from(config, EMPTY_CATALOG, "emca", "widgets", "main").unwrap();
    assert!(result.is_none());
}
