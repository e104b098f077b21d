//! Path grammar: split a documentation path into language, version and remainder.
//!
//! A path looks like `/<language>/<version>/<rest>` where both the language and
//! the version segment are optional. [`PathGrammar`] answers questions about
//! that shape using the [`VersionRegistry`] and the set of known [`Languages`].

use std::sync::Arc;

use crate::domain::languages::Languages;
use crate::domain::versions::{
    ENTERPRISE_SERVER_LATEST, ENTERPRISE_SERVER_PLAN, HOMEPAGE, VersionRegistry,
};
use crate::utils::patterns::enterprise_version_number;

/// Returns the first segment of a root-relative path, without query or fragment.
///
/// `/en/github?x=1` yields `en`; `/` yields an empty string.
pub fn first_segment(path: &str) -> &str {
    let rest = path.strip_prefix('/').unwrap_or(path);
    rest.split(['/', '?', '#']).next().unwrap_or("")
}

/// Release named by a leading `enterprise-server@<release>` segment, if any.
///
/// `/enterprise-server@2.1/admin` yields `2.1`; legacy `/enterprise/2.1/admin`
/// and `/enterprise-server-releases` yield `None`.
pub fn enterprise_server_release(path: &str) -> Option<&str> {
    first_segment(path)
        .strip_prefix(ENTERPRISE_SERVER_PLAN)?
        .strip_prefix('@')
        .filter(|release| !release.is_empty())
}

/// Replaces the first occurrence of `from` in `input`.
///
/// An empty pattern never matches.
pub fn replace_first(input: &str, from: &str, to: &str) -> String {
    if from.is_empty() {
        return input.to_string();
    }
    input.replacen(from, to, 1)
}

/// Collapses trailing slashes, keeping the root path intact.
pub fn strip_trailing_slash(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Strips a leading `/<segment>` when it is a whole segment.
fn strip_segment_prefix<'a>(path: &'a str, segment: &str) -> Option<&'a str> {
    let rest = path.strip_prefix('/')?.strip_prefix(segment)?;
    (rest.is_empty() || rest.starts_with(['/', '?', '#'])).then_some(rest)
}

/// Stateless path helpers bound to one registry and language set.
#[derive(Debug, Clone)]
pub struct PathGrammar {
    registry: Arc<VersionRegistry>,
    languages: Arc<Languages>,
}

impl PathGrammar {
    pub fn new(registry: Arc<VersionRegistry>, languages: Arc<Languages>) -> Self {
        Self {
            registry,
            languages,
        }
    }

    pub fn registry(&self) -> &VersionRegistry {
        &self.registry
    }

    pub fn languages(&self) -> &Languages {
        &self.languages
    }

    /// The language code leading `href`, if it is a known language.
    pub fn language_of<'a>(&self, href: &'a str) -> Option<&'a str> {
        let segment = first_segment(href);
        self.languages.contains(segment).then_some(segment)
    }

    /// Drops a known language segment: `/en/github` becomes `/github`, `/en` becomes `/`.
    pub fn path_without_language(&self, href: &str) -> String {
        let Some(language) = self.language_of(href) else {
            return href.to_string();
        };

        match strip_segment_prefix(href, language) {
            Some("") | None => "/".to_string(),
            Some(rest) if rest.starts_with('/') => rest.to_string(),
            Some(rest) => format!("/{rest}"),
        }
    }

    /// Puts `language` in front of `href`, replacing any language already there.
    pub fn path_with_language(&self, href: &str, language: &str) -> String {
        let bare = self.path_without_language(href);
        let joined = if bare == "/" || bare.is_empty() {
            format!("/{language}")
        } else if bare.starts_with('/') {
            format!("/{language}{bare}")
        } else {
            format!("/{language}/{bare}")
        };

        strip_trailing_slash(&joined)
    }

    /// Returns the version a path refers to.
    ///
    /// - the site root yields [`HOMEPAGE`]
    /// - a supported version segment is returned as-is
    /// - `enterprise-server@latest` and bare plan segments resolve to the newest version
    /// - anything else is returned verbatim, even when it is not a version
    pub fn version_string_from_path(&self, href: &str) -> String {
        let bare = self.path_without_language(href);
        if bare == "/" {
            return HOMEPAGE.to_string();
        }

        let segment = first_segment(&bare);
        if self.registry.is_supported(segment) {
            return segment.to_string();
        }
        if segment == ENTERPRISE_SERVER_LATEST {
            return self.registry.enterprise_latest();
        }
        if let Some(version) = self.registry.latest_version_for_plan(segment) {
            return version;
        }

        segment.to_string()
    }

    /// True when the first segment names a plan, a supported version or
    /// `enterprise-server@latest`.
    pub fn is_pinned(&self, href_without_language: &str) -> bool {
        let segment = first_segment(href_without_language);
        segment == ENTERPRISE_SERVER_LATEST
            || self.registry.is_plan(segment)
            || self.registry.is_supported(segment)
    }

    /// Converts a legacy-shaped path (no language) into the versioned shape.
    ///
    /// - `/github/foo` becomes `/<default>/github/foo`
    /// - `/enterprise/2.20/user/foo` becomes `/enterprise-server@2.20/foo`
    /// - `/enterprise/admin` becomes `/enterprise-server@<latest>/admin`
    ///
    /// Paths that already start with a version or plan are returned unchanged,
    /// including `enterprise-server@<release>` for releases no longer supported.
    pub fn new_versioned_path(&self, old_path: &str) -> String {
        if self.is_pinned(old_path) || enterprise_server_release(old_path).is_some() {
            return old_path.to_string();
        }

        let (new_version, rest) = match strip_segment_prefix(old_path, "enterprise") {
            Some(after_enterprise) => {
                let release = enterprise_version_number(old_path)
                    .filter(|release| strip_segment_prefix(after_enterprise, release).is_some());
                match release {
                    Some(release) => (
                        format!("{ENTERPRISE_SERVER_PLAN}@{release}"),
                        strip_segment_prefix(after_enterprise, release).unwrap_or(""),
                    ),
                    None => (self.registry.enterprise_latest(), after_enterprise),
                }
            }
            None => (
                self.registry.non_enterprise_default_version().to_string(),
                old_path,
            ),
        };

        let rest = strip_segment_prefix(rest, "user").unwrap_or(rest);
        if rest == "/" {
            format!("/{new_version}")
        } else {
            format!("/{new_version}{rest}")
        }
    }

    /// Drops the default version segment when the registry collapses it.
    pub fn remove_fpt_from_path(&self, path: &str) -> String {
        if !self.registry.remove_fpt() {
            return path.to_string();
        }

        let default = format!("/{}", self.registry.non_enterprise_default_version());
        let collapsed = replace_first(path, &default, "");
        if collapsed.is_empty() {
            "/".to_string()
        } else {
            collapsed
        }
    }
}
