mod common;

use common::{FPT, GHES_LATEST, test_deriver};

#[test]
fn test_admin_root_aliases() {
    let paths = test_deriver().derive_old_paths(
        "/en/enterprise-server@3.11/admin",
        "en",
        GHES_LATEST,
    );

    assert!(paths.contains("/en/admin"));
    assert!(paths.contains("/en/enterprise/admin"));
    assert!(paths.contains("/admin"));
    assert!(!paths.iter().any(|p| p.contains("/guides")));
}

#[test]
fn test_admin_deep_link_gets_guides_alias() {
    let paths = test_deriver().derive_old_paths(
        "/en/enterprise-server@3.11/admin/overview",
        "en",
        GHES_LATEST,
    );

    assert!(paths.contains("/en/enterprise-server@3.11/admin/guides/overview"));
    assert!(paths.contains("/en/enterprise/3.11/admin/overview"));
    assert!(paths.contains("/en/admin/overview"));
    assert!(!paths.contains("/en/enterprise/3.11/user/admin/overview"));
}

#[test]
fn test_github_suffix_maps_to_user() {
    let paths = test_deriver().derive_old_paths(
        "/en/enterprise-server@3.11/github",
        "en",
        GHES_LATEST,
    );

    assert!(paths.contains("/en/enterprise/3.11/user"));
    assert!(paths.contains("/enterprise/3.11/user"));
}

#[test]
fn test_non_english_never_strips_language() {
    let paths = test_deriver().derive_old_paths("/ja/free-pro-team@latest/github", "ja", FPT);

    assert!(!paths.is_empty());
    assert!(paths.iter().all(|p| p.starts_with("/ja")));
}

#[test]
fn test_never_contains_empty_or_root() {
    let deriver = test_deriver();
    let cases = [
        ("/en", "en", FPT),
        ("/en", "en", "homepage"),
        ("/ja", "ja", FPT),
        ("/en/enterprise-server@3.11", "en", GHES_LATEST),
        ("/en/enterprise", "en", GHES_LATEST),
        ("/en/insights", "en", GHES_LATEST),
    ];

    for (path, language, version) in cases {
        let paths = deriver.derive_old_paths(path, language, version);
        assert!(!paths.contains(""), "{path} yielded an empty alias");
        assert!(!paths.contains("/"), "{path} yielded the root");
    }
}

#[test]
fn test_unknown_version_contributes_nothing_extra() {
    let paths = test_deriver().derive_old_paths("/en/github/foo", "en", "not-a-version");

    assert!(paths.contains("/en/free-pro-team@latest/github/foo"));
    assert!(paths.contains("/github/foo"));
    assert!(!paths.iter().any(|p| p.contains("/enterprise")));
}

// Stage 2 matches "admin" as a substring while stage 3 uses the product
// pattern; both behaviors are kept as-is.
#[test]
fn test_admin_substring_divergence() {
    let paths = test_deriver().derive_old_paths(
        "/en/enterprise-server@3.11/github/administering-repos",
        "en",
        GHES_LATEST,
    );

    assert!(paths.contains("/en/enterprise-server@3.11/github/admin/guidesistering-repos"));
    assert!(paths.contains("/en/enterprise/3.11/user/github/administering-repos"));
}
