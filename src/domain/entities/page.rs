//! Page entity as published by the content build.

use serde::{Deserialize, Serialize};

/// One rendered URL of a page: a (language, version) pair and its canonical href.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permalink {
    pub href: String,
    pub language_code: String,
    pub version: String,
}

impl Permalink {
    pub fn new(
        href: impl Into<String>,
        language_code: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            href: href.into(),
            language_code: language_code.into(),
            version: version.into(),
        }
    }
}

/// A published documentation page.
///
/// `redirect_from` holds the frontmatter paths authors listed as former
/// locations of the page, without language prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub relative_path: String,
    pub title: String,
    pub permalinks: Vec<Permalink>,
    #[serde(default)]
    pub redirect_from: Vec<String>,
}

impl Page {
    pub fn new(relative_path: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            relative_path: relative_path.into(),
            title: title.into(),
            permalinks: Vec::new(),
            redirect_from: Vec::new(),
        }
    }

    pub fn with_permalink(mut self, permalink: Permalink) -> Self {
        self.permalinks.push(permalink);
        self
    }

    pub fn with_redirect_from(mut self, path: impl Into<String>) -> Self {
        self.redirect_from.push(path.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_builder() {
        let page = Page::new("github/index.md", "GitHub")
            .with_permalink(Permalink::new("/en/github", "en", "free-pro-team@latest"))
            .with_redirect_from("/articles/github");

        assert_eq!(page.permalinks.len(), 1);
        assert_eq!(page.permalinks[0].language_code, "en");
        assert_eq!(page.redirect_from, vec!["/articles/github".to_string()]);
    }

    #[test]
    fn test_page_deserialize_without_redirects() {
        let json = r#"{
            "relative_path": "index.md",
            "title": "Home",
            "permalinks": [{"href": "/en", "language_code": "en", "version": "homepage"}]
        }"#;

        let page: Page = serde_json::from_str(json).unwrap();
        assert!(page.redirect_from.is_empty());
        assert_eq!(page.permalinks[0].href, "/en");
    }
}
