//! Old-path derivation for the redirect table.
//!
//! Given one canonical path, [`OldPathDeriver::derive_old_paths`] returns every
//! historical URL that must keep resolving to it. Each rule is one fact about
//! a past URL scheme. Rules add to a shared working set instead of replacing
//! the path, because several old schemes can alias the same page at once.
//!
//! # Stages
//!
//! 1. Default-version aliasing for pages whose canonical path carries no version
//! 2. Legacy `/enterprise/<release>` replacements, applied to the current path
//! 3. Modern `enterprise-server@<release>` aliasing, one pass over a snapshot
//! 4. One-off literal aliases
//! 5. Language variants of everything collected so far
//! 6. Cleanup of empty and root entries
//!
//! Stage 3 and stage 5 read a snapshot taken right before they start. Aliases
//! they produce are not fed back through their own rules.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::trace;

use crate::domain::languages::DEFAULT_LANGUAGE;
use crate::domain::versions::{HOMEPAGE, version_satisfies_range};
use crate::utils::path_utils::{PathGrammar, replace_first};
use crate::utils::patterns::ADMIN_PRODUCT;

/// Set of old paths. Never contains `""` or `/`.
pub type RedirectSet = HashSet<String>;

/// Oldest release whose `/user/github` pages were reachable as `/user`.
const USER_GITHUB_CUTOFF: &str = "2.15";

/// Canonical suffix of the release list page.
const ALL_RELEASES_SUFFIX: &str = "/admin/all-releases";

/// Legacy top-level page that listed every Enterprise Server release.
const ENTERPRISE_SERVER_RELEASES: &str = "/enterprise-server-releases";

static SERVER_RELEASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/enterprise-server@(\d)").unwrap());

static SERVER_RELEASE_GITHUB: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/enterprise-server@(\d.+?)/github").unwrap());

static SERVER_RELEASE_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/enterprise-server@(\d.+?)/").unwrap());

/// Derives historical aliases for canonical paths.
#[derive(Debug, Clone)]
pub struct OldPathDeriver {
    grammar: PathGrammar,
}

impl OldPathDeriver {
    pub fn new(grammar: PathGrammar) -> Self {
        Self { grammar }
    }

    pub fn grammar(&self) -> &PathGrammar {
        &self.grammar
    }

    /// Returns every old path that must resolve to `current_path`.
    ///
    /// `current_version` may be unsupported or deprecated; rules that do not
    /// apply to it simply contribute nothing.
    pub fn derive_old_paths(
        &self,
        current_path: &str,
        language_code: &str,
        current_version: &str,
    ) -> RedirectSet {
        let mut old_paths = RedirectSet::new();

        self.add_default_version_alias(&mut old_paths, current_path, language_code);
        self.add_legacy_format_aliases(&mut old_paths, current_path, language_code, current_version);
        self.add_modern_format_aliases(&mut old_paths, current_path, current_version);
        self.add_one_off_aliases(&mut old_paths, current_path, current_version);
        self.add_language_variants(&mut old_paths, language_code);

        old_paths.remove("");
        old_paths.remove("/");

        trace!(
            path = current_path,
            language = language_code,
            version = current_version,
            count = old_paths.len(),
            "Derived old paths"
        );

        old_paths
    }

    /// `/en/github` was once `/en/<default>/github`.
    fn add_default_version_alias(
        &self,
        old_paths: &mut RedirectSet,
        current_path: &str,
        language_code: &str,
    ) {
        let registry = self.grammar.registry();
        let default = registry.non_enterprise_default_version();
        let version_from_path = self.grammar.version_string_from_path(current_path);

        let unversioned = version_from_path == HOMEPAGE
            || !(registry.is_supported(&version_from_path)
                || registry.is_deprecated(&version_from_path))
            || (version_from_path == default && !current_path.contains(default));

        if unversioned {
            old_paths.insert(insert_after_language(current_path, language_code, default));
        }
    }

    fn add_legacy_format_aliases(
        &self,
        old_paths: &mut RedirectSet,
        current_path: &str,
        language_code: &str,
        current_version: &str,
    ) {
        let registry = self.grammar.registry();
        let latest = registry.latest();

        // /insights from /enterprise/<latest>/user/insights
        old_paths.insert(replace_first(
            current_path,
            &format!("/{language_code}/enterprise/{latest}/user/insights"),
            "/insights",
        ));

        // /desktop/guides from /desktop
        if current_path.contains("/desktop") && !current_path.contains("/guides") {
            old_paths.insert(replace_first(current_path, "/desktop", "/desktop/guides"));
        }

        // /admin/guides from /admin, before the guides were restored and for deep links
        if current_path.contains("admin") && !current_path.contains("/guides") {
            let predates_restore = version_satisfies_range(
                current_version,
                &format!("<{}", registry.first_restored_admin_guides()),
            );
            if predates_restore || !current_path.ends_with("/admin") {
                old_paths.insert(replace_first(current_path, "/admin", "/admin/guides"));
            }
        }

        // /user from /user/github
        if registry.is_supported(current_version)
            || version_satisfies_range(current_version, &format!(">{USER_GITHUB_CUTOFF}"))
        {
            old_paths.insert(replace_first(current_path, "/user/github", "/user"));
        }

        // /enterprise from /enterprise/<latest>
        old_paths.insert(replace_first(
            current_path,
            &format!("/enterprise/{latest}"),
            "/enterprise",
        ));

        // old developer paths like /enterprise/webhooks had no /user segment
        if current_path.contains("/enterprise/") {
            old_paths.insert(replace_first(current_path, "/user/", "/"));
        }
    }

    fn add_modern_format_aliases(
        &self,
        old_paths: &mut RedirectSet,
        current_path: &str,
        current_version: &str,
    ) {
        let registry = self.grammar.registry();
        let applies = registry.is_supported(current_version)
            || version_satisfies_range(
                current_version,
                &format!(">{}", registry.last_release_with_legacy_format()),
            );
        if !applies {
            return;
        }

        let latest_server = registry.enterprise_latest();
        let latest_server = format!("/{latest_server}");
        let snapshot: Vec<String> = old_paths.iter().cloned().collect();

        for old_path in &snapshot {
            // /enterprise/<release> from /enterprise-server@<release>
            old_paths.insert(
                SERVER_RELEASE
                    .replace(old_path, "/enterprise/${1}")
                    .into_owned(),
            );

            // /enterprise/<release>/user from /enterprise-server@<release>/github
            old_paths.insert(
                SERVER_RELEASE_GITHUB
                    .replace(old_path, "/enterprise/${1}/user")
                    .into_owned(),
            );

            old_paths.insert(replace_first(
                old_path,
                &format!("{latest_server}/insights"),
                "/insights",
            ));
            old_paths.insert(replace_first(
                old_path,
                &format!("{latest_server}/admin"),
                "/admin",
            ));
            old_paths.insert(replace_first(old_path, &latest_server, "/enterprise"));
            old_paths.insert(replace_first(old_path, &latest_server, "/enterprise-server"));
            old_paths.insert(replace_first(
                old_path,
                &latest_server,
                "/enterprise-server@latest",
            ));

            if !ADMIN_PRODUCT.is_match(old_path) {
                // /enterprise/<release>/user/foo from /enterprise-server@<release>/foo
                old_paths.insert(
                    SERVER_RELEASE_SEGMENT
                        .replace(current_path, "/enterprise/${1}/user/")
                        .into_owned(),
                );

                // /enterprise/user/foo from /enterprise-server@<latest>/foo
                old_paths.insert(replace_first(
                    current_path,
                    &format!("{latest_server}/"),
                    "/enterprise/user/",
                ));
            }
        }
    }

    fn add_one_off_aliases(
        &self,
        old_paths: &mut RedirectSet,
        current_path: &str,
        current_version: &str,
    ) {
        let latest = self.grammar.registry().latest();

        if version_satisfies_range(current_version, &format!("={latest}"))
            && current_path.ends_with(ALL_RELEASES_SUFFIX)
        {
            old_paths.insert(ENTERPRISE_SERVER_RELEASES.to_string());
        }
    }

    fn add_language_variants(&self, old_paths: &mut RedirectSet, language_code: &str) {
        let snapshot: Vec<String> = old_paths.iter().cloned().collect();

        for old_path in &snapshot {
            if language_code == DEFAULT_LANGUAGE {
                old_paths.insert(self.grammar.path_without_language(old_path));
            }
            old_paths.insert(self.grammar.path_with_language(old_path, language_code));
        }
    }
}

/// Inserts `/<version>` right after a leading `/<language>` segment.
///
/// Paths that do not start with that language are returned unchanged.
fn insert_after_language(path: &str, language_code: &str, version: &str) -> String {
    let prefix = format!("/{language_code}");
    match path.strip_prefix(&prefix) {
        Some(rest) if rest.is_empty() || rest.starts_with(['/', '?', '#']) => {
            format!("{prefix}/{version}{rest}")
        }
        _ => path.to_string(),
    }
}
