//! Rewrites author-written local links for the page being rendered.
//!
//! Authors write links like `/github/getting-started`. At render time each
//! root-relative href is rewritten to carry the current language and version,
//! unless it is pinned to a version on purpose, points at a static asset, or
//! leaves the site.

use std::sync::Arc;
use tracing::trace;

use crate::domain::external_redirects::ExternalRedirects;
use crate::utils::path_utils::{
    PathGrammar, enterprise_server_release, replace_first, strip_trailing_slash,
};
use crate::utils::patterns::{ADMIN_PRODUCT, DESKTOP, INSIGHTS_PRODUCT, enterprise_version_number};

/// Class marking a link that must always point at the default plan.
pub const DOTCOM_ONLY_CLASS: &str = "dotcom-only";

const EXCLUDED_PREFIXES: &[&str] = &["/assets", "/public"];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RewriteError {
    #[error("languageCode is required")]
    MissingLanguageCode,
}

/// Rendering context of one link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRewriteContext {
    language_code: String,
    version: String,
    dotcom_only: bool,
}

impl LinkRewriteContext {
    /// # Errors
    ///
    /// Returns [`RewriteError::MissingLanguageCode`] when `language_code` is empty.
    pub fn new(
        language_code: impl Into<String>,
        version: impl Into<String>,
    ) -> Result<Self, RewriteError> {
        let language_code = language_code.into();
        if language_code.trim().is_empty() {
            return Err(RewriteError::MissingLanguageCode);
        }

        Ok(Self {
            language_code,
            version: version.into(),
            dotcom_only: false,
        })
    }

    /// Marks the link as dotcom-only.
    pub fn with_dotcom_only(mut self, dotcom_only: bool) -> Self {
        self.dotcom_only = dotcom_only;
        self
    }

    pub fn language_code(&self) -> &str {
        &self.language_code
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn is_dotcom_only(&self) -> bool {
        self.dotcom_only
    }
}

/// An anchor element as seen by the content renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub href: String,
    pub classes: Vec<String>,
}

impl Anchor {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            classes: Vec::new(),
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

#[derive(Debug, Clone)]
pub struct LinkRewriter {
    grammar: PathGrammar,
    external_redirects: Arc<ExternalRedirects>,
}

impl LinkRewriter {
    pub fn new(grammar: PathGrammar, external_redirects: Arc<ExternalRedirects>) -> Self {
        Self {
            grammar,
            external_redirects,
        }
    }

    /// Returns the canonical form of a root-relative `href`.
    ///
    /// The result equals `href` when no rule applies; callers only write
    /// back hrefs that changed.
    pub fn rewrite_link(&self, href: &str, context: &LinkRewriteContext) -> String {
        if EXCLUDED_PREFIXES.iter().any(|p| href.starts_with(p))
            || self.external_redirects.contains(href)
        {
            return href.to_string();
        }

        let language = context.language_code();
        let href_without_language = self.grammar.path_without_language(href);

        let new_href = if self.grammar.is_pinned(&href_without_language)
            || self.links_deprecated_release(&href_without_language)
        {
            self.grammar.path_with_language(&href_without_language, language)
        } else {
            let normalized = self.grammar.path_with_language(
                &self.grammar.new_versioned_path(&href_without_language),
                language,
            );
            let version_from_href = self.grammar.version_string_from_path(&normalized);
            let version = self.effective_version(&href_without_language, context);

            self.grammar
                .remove_fpt_from_path(&replace_first(&normalized, &version_from_href, &version))
        };

        let new_href = strip_trailing_slash(&new_href);
        if new_href != href {
            trace!(from = href, to = %new_href, "Rewrote local link");
        }

        new_href
    }

    /// Rewrites every root-relative anchor in place and returns how many changed.
    ///
    /// Anchors carrying [`DOTCOM_ONLY_CLASS`] are pinned to the default plan.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::MissingLanguageCode`] before touching any anchor
    /// when `language_code` is empty.
    pub fn rewrite_local_links(
        &self,
        anchors: &mut [Anchor],
        version: &str,
        language_code: &str,
    ) -> Result<usize, RewriteError> {
        let context = LinkRewriteContext::new(language_code, version)?;
        let mut changed = 0;

        for anchor in anchors.iter_mut().filter(|a| a.href.starts_with('/')) {
            let context = context
                .clone()
                .with_dotcom_only(anchor.has_class(DOTCOM_ONLY_CLASS));
            let new_href = self.rewrite_link(&anchor.href, &context);
            if new_href != anchor.href {
                anchor.href = new_href;
                changed += 1;
            }
        }

        Ok(changed)
    }

    /// Links into deprecated releases are archived and left alone, in either
    /// the legacy `/enterprise/<release>` or the `enterprise-server@<release>` shape.
    fn links_deprecated_release(&self, href_without_language: &str) -> bool {
        enterprise_version_number(href_without_language)
            .or_else(|| enterprise_server_release(href_without_language))
            .is_some_and(|release| self.grammar.registry().is_deprecated(release))
    }

    /// Applies content-type overrides to the context version.
    fn effective_version(&self, href_without_language: &str, context: &LinkRewriteContext) -> String {
        let registry = self.grammar.registry();
        let default = registry.non_enterprise_default_version();
        let mut version = context.version().to_string();

        // dotcom-only links and desktop docs resolve on the default plan
        if context.is_dotcom_only() || DESKTOP.is_match(href_without_language) {
            version = default.to_string();
        }

        // admin and insights docs only exist on Enterprise Server
        if (ADMIN_PRODUCT.is_match(href_without_language)
            || INSIGHTS_PRODUCT.is_match(href_without_language))
            && version == default
        {
            version = registry.enterprise_latest();
        }

        version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::languages::Languages;
    use crate::domain::versions::{VersionRegistry, VersionRegistryData};

    fn rewriter(remove_fpt: bool) -> LinkRewriter {
        let registry = VersionRegistry::new(VersionRegistryData {
            latest: "3.11".to_string(),
            deprecated: vec!["2.1".to_string(), "11.10.340".to_string()],
            last_release_with_legacy_format: "2.18".to_string(),
            first_restored_admin_guides: "2.21".to_string(),
            supported_versions: vec![
                "free-pro-team@latest".to_string(),
                "enterprise-server@3.11".to_string(),
                "enterprise-server@3.10".to_string(),
            ],
            non_enterprise_default_version: "free-pro-team@latest".to_string(),
            remove_fpt,
        })
        .unwrap();

        let external: ExternalRedirects = [("/desktop/releases", "https://desktop.example.com")]
            .into_iter()
            .collect();

        LinkRewriter::new(
            PathGrammar::new(Arc::new(registry), Arc::new(Languages::default())),
            Arc::new(external),
        )
    }

    fn ctx(language: &str, version: &str) -> LinkRewriteContext {
        LinkRewriteContext::new(language, version).unwrap()
    }

    #[test]
    fn test_context_requires_language() {
        assert_eq!(
            LinkRewriteContext::new("", "free-pro-team@latest"),
            Err(RewriteError::MissingLanguageCode)
        );
    }

    #[test]
    fn test_exclusions() {
        let r = rewriter(false);
        let c = ctx("en", "enterprise-server@3.10");
        assert_eq!(r.rewrite_link("/assets/images/a.png", &c), "/assets/images/a.png");
        assert_eq!(r.rewrite_link("/public/schema.json", &c), "/public/schema.json");
        assert_eq!(r.rewrite_link("/desktop/releases", &c), "/desktop/releases");
    }

    #[test]
    fn test_plain_link_gets_language_and_version() {
        let r = rewriter(false);
        assert_eq!(
            r.rewrite_link("/github/getting-started", &ctx("ja", "enterprise-server@3.10")),
            "/ja/enterprise-server@3.10/github/getting-started"
        );
        assert_eq!(
            r.rewrite_link("/github/getting-started/", &ctx("en", "free-pro-team@latest")),
            "/en/free-pro-team@latest/github/getting-started"
        );
    }

    #[test]
    fn test_existing_language_is_replaced() {
        let r = rewriter(false);
        assert_eq!(
            r.rewrite_link("/en/github/foo", &ctx("ja", "free-pro-team@latest")),
            "/ja/free-pro-team@latest/github/foo"
        );
    }

    #[test]
    fn test_link_into_deprecated_enterprise_server_release_only_gets_language() {
        let r = rewriter(false);
        assert_eq!(
            r.rewrite_link("/enterprise-server@2.1/foo", &ctx("en", "enterprise-server@3.10")),
            "/en/enterprise-server@2.1/foo"
        );
        assert_eq!(
            r.rewrite_link("/en/enterprise-server@2.1/admin/", &ctx("ja", "free-pro-team@latest")),
            "/ja/enterprise-server@2.1/admin"
        );
    }

    #[test]
    fn test_legacy_enterprise_link_is_modernized() {
        let r = rewriter(false);
        assert_eq!(
            r.rewrite_link("/enterprise/3.10/user/github/foo", &ctx("en", "enterprise-server@3.11")),
            "/en/enterprise-server@3.11/github/foo"
        );
    }

    #[test]
    fn test_pinned_links_only_get_language() {
        let r = rewriter(false);
        let c = ctx("en", "free-pro-team@latest");
        assert_eq!(
            r.rewrite_link("/enterprise-server@3.10/rest/reference", &c),
            "/en/enterprise-server@3.10/rest/reference"
        );
        assert_eq!(
            r.rewrite_link("/enterprise-server/rest/reference", &c),
            "/en/enterprise-server/rest/reference"
        );
    }

    #[test]
    fn test_deprecated_release_only_gets_language() {
        let r = rewriter(false);
        assert_eq!(
            r.rewrite_link(
                "/enterprise/11.10.340/admin/articles/upgrading",
                &ctx("en", "enterprise-server@3.11")
            ),
            "/en/enterprise/11.10.340/admin/articles/upgrading"
        );
    }

    #[test]
    fn test_desktop_and_dotcom_only_force_default() {
        let r = rewriter(false);
        assert_eq!(
            r.rewrite_link("/desktop/installing", &ctx("en", "enterprise-server@3.10")),
            "/en/free-pro-team@latest/desktop/installing"
        );
        assert_eq!(
            r.rewrite_link(
                "/github/foo",
                &ctx("en", "enterprise-server@3.10").with_dotcom_only(true)
            ),
            "/en/free-pro-team@latest/github/foo"
        );
    }

    #[test]
    fn test_admin_and_insights_force_enterprise_on_default() {
        let r = rewriter(false);
        assert_eq!(
            r.rewrite_link("/insights/installing", &ctx("en", "free-pro-team@latest")),
            "/en/enterprise-server@3.11/insights/installing"
        );
        assert_eq!(
            r.rewrite_link("/admin/foo", &ctx("en", "enterprise-server@3.10")),
            "/en/enterprise-server@3.10/admin/foo"
        );
    }

    #[test]
    fn test_remove_fpt_collapses_default() {
        let r = rewriter(true);
        assert_eq!(
            r.rewrite_link("/github/foo", &ctx("en", "free-pro-team@latest")),
            "/en/github/foo"
        );
        assert_eq!(
            r.rewrite_link("/github/foo", &ctx("en", "enterprise-server@3.10")),
            "/en/enterprise-server@3.10/github/foo"
        );
    }

    #[test]
    fn test_rewrite_local_links() {
        let r = rewriter(false);
        let mut anchors = vec![
            Anchor::new("/github/foo"),
            Anchor::new("/github/bar").with_class(DOTCOM_ONLY_CLASS),
            Anchor::new("https://example.com/github"),
            Anchor::new("/assets/a.png"),
        ];

        let changed = r
            .rewrite_local_links(&mut anchors, "enterprise-server@3.10", "en")
            .unwrap();

        assert_eq!(changed, 2);
        assert_eq!(anchors[0].href, "/en/enterprise-server@3.10/github/foo");
        assert_eq!(anchors[1].href, "/en/free-pro-team@latest/github/bar");
        assert_eq!(anchors[2].href, "https://example.com/github");
        assert_eq!(anchors[3].href, "/assets/a.png");
    }

    #[test]
    fn test_rewrite_local_links_requires_language() {
        let r = rewriter(false);
        let mut anchors = vec![Anchor::new("/github/foo")];

        assert_eq!(
            r.rewrite_local_links(&mut anchors, "free-pro-team@latest", ""),
            Err(RewriteError::MissingLanguageCode)
        );
        assert_eq!(anchors[0].href, "/github/foo");
    }
}
