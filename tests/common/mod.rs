#![allow(dead_code)]

use std::sync::Arc;

use docs_redirects::application::services::RedirectService;
use docs_redirects::domain::entities::{Page, Permalink};
use docs_redirects::domain::external_redirects::ExternalRedirects;
use docs_redirects::domain::languages::Languages;
use docs_redirects::domain::link_rewriter::LinkRewriter;
use docs_redirects::domain::old_paths::OldPathDeriver;
use docs_redirects::domain::versions::{VersionRegistry, VersionRegistryData};
use docs_redirects::state::AppState;
use docs_redirects::utils::path_utils::PathGrammar;

pub const FPT: &str = "free-pro-team@latest";
pub const GHES_LATEST: &str = "enterprise-server@3.11";
pub const GHES_PREVIOUS: &str = "enterprise-server@3.10";

pub fn registry_data(remove_fpt: bool) -> VersionRegistryData {
    VersionRegistryData {
        latest: "3.11".to_string(),
        deprecated: vec!["2.1".to_string()],
        last_release_with_legacy_format: "2.12".to_string(),
        first_restored_admin_guides: "2.21".to_string(),
        supported_versions: vec![FPT.to_string(), GHES_LATEST.to_string(), GHES_PREVIOUS.to_string()],
        non_enterprise_default_version: FPT.to_string(),
        remove_fpt,
    }
}

pub fn test_grammar(remove_fpt: bool) -> PathGrammar {
    let registry = VersionRegistry::new(registry_data(remove_fpt)).unwrap();
    PathGrammar::new(Arc::new(registry), Arc::new(Languages::default()))
}

pub fn test_deriver() -> OldPathDeriver {
    OldPathDeriver::new(test_grammar(false))
}

pub fn test_rewriter(remove_fpt: bool) -> LinkRewriter {
    let external: ExternalRedirects = [("/desktop/releases", "https://desktop.example.com")]
        .into_iter()
        .collect();

    LinkRewriter::new(test_grammar(remove_fpt), Arc::new(external))
}

pub fn sample_pages() -> Vec<Page> {
    vec![
        Page::new("admin/overview.md", "About administration")
            .with_permalink(Permalink::new(
                "/en/enterprise-server@3.11/admin/overview",
                "en",
                GHES_LATEST,
            ))
            .with_permalink(Permalink::new(
                "/ja/enterprise-server@3.11/admin/overview",
                "ja",
                GHES_LATEST,
            ))
            .with_redirect_from("/admin/about"),
        Page::new("github/index.md", "GitHub").with_permalink(Permalink::new(
            "/en/enterprise-server@3.11/github",
            "en",
            GHES_LATEST,
        )),
    ]
}

pub fn create_test_state_with_pages(pages: Vec<Page>) -> AppState {
    let redirect_service = RedirectService::from_pages(pages, test_deriver());
    AppState::new(Arc::new(redirect_service), Arc::new(test_rewriter(false)))
}

pub fn create_test_state() -> AppState {
    create_test_state_with_pages(sample_pages())
}
