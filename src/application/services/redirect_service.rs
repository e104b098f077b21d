//! Redirect table construction and request path resolution.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::entities::{Page, Permalink};
use crate::domain::languages::DEFAULT_LANGUAGE;
use crate::domain::old_paths::{OldPathDeriver, RedirectSet};
use crate::domain::repositories::PageRepository;
use crate::error::AppError;
use crate::utils::path_utils::strip_trailing_slash;

/// Outcome of resolving a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// `href` is served by `page`, possibly as an English fallback.
    Page { href: String, page: Arc<Page> },
    /// `href` is an old path; send a permanent redirect to the target.
    Redirect(String),
    NotFound,
}

/// Owns the canonical page index and the old-path redirect table.
///
/// The table is built once from the page catalog and is read-only afterwards.
#[derive(Debug)]
pub struct RedirectService {
    deriver: OldPathDeriver,
    pages: HashMap<String, Arc<Page>>,
    redirects: HashMap<String, String>,
}

impl RedirectService {
    /// Loads every page from `repository` and builds the redirect table.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the page catalog cannot be loaded.
    pub async fn build<R>(repository: &R, deriver: OldPathDeriver) -> Result<Self, AppError>
    where
        R: PageRepository + ?Sized,
    {
        let pages = repository.list().await?;
        Ok(Self::from_pages(pages, deriver))
    }

    /// Builds the redirect table from an in-memory page list.
    ///
    /// # Rules
    ///
    /// - Every permalink maps its derived old paths to itself
    /// - Frontmatter `redirect_from` paths are localized to the permalink's
    ///   language and expanded the same way
    /// - A canonical permalink is never shadowed by an alias
    /// - On conflicting aliases the first page in catalog order wins
    pub fn from_pages(pages: Vec<Page>, deriver: OldPathDeriver) -> Self {
        let pages: Vec<Arc<Page>> = pages.into_iter().map(Arc::new).collect();

        let mut by_href: HashMap<String, Arc<Page>> = HashMap::new();
        for page in &pages {
            for permalink in &page.permalinks {
                by_href
                    .entry(permalink.href.clone())
                    .or_insert_with(|| Arc::clone(page));
            }
        }

        let mut redirects: HashMap<String, String> = HashMap::new();
        let mut conflicts = 0usize;

        for page in &pages {
            for permalink in &page.permalinks {
                for old_path in aliases_for(&deriver, page, permalink) {
                    if old_path == permalink.href || by_href.contains_key(&old_path) {
                        continue;
                    }

                    match redirects.entry(old_path) {
                        Entry::Vacant(entry) => {
                            entry.insert(permalink.href.clone());
                        }
                        Entry::Occupied(entry) if entry.get() != &permalink.href => {
                            conflicts += 1;
                            debug!(
                                old_path = %entry.key(),
                                kept = %entry.get(),
                                dropped = %permalink.href,
                                "Conflicting old path"
                            );
                        }
                        Entry::Occupied(_) => {}
                    }
                }
            }
        }

        info!(
            pages = by_href.len(),
            redirects = redirects.len(),
            conflicts,
            "Redirect table built"
        );

        Self {
            deriver,
            pages: by_href,
            redirects,
        }
    }

    /// Resolves a request path to a page, a redirect, or nothing.
    ///
    /// # Lookup Order
    ///
    /// 1. Canonical permalink
    /// 2. Redirect table
    /// 3. For non-English paths, the English equivalent: its page is served
    ///    under the requested URL, its redirect keeps the requested language
    pub fn find_page(&self, href: &str) -> Resolution {
        let href = strip_trailing_slash(href);
        if let Some(resolution) = self.lookup(&href) {
            return resolution;
        }

        let grammar = self.deriver.grammar();
        if let Some(language) = grammar.language_of(&href)
            && language != DEFAULT_LANGUAGE
        {
            let english = grammar.path_with_language(&href, DEFAULT_LANGUAGE);
            match self.lookup(&english) {
                Some(Resolution::Page { page, .. }) => {
                    debug!(href = %href, "Falling back to English page");
                    return Resolution::Page { href, page };
                }
                Some(Resolution::Redirect(target)) => {
                    return Resolution::Redirect(grammar.path_with_language(&target, language));
                }
                _ => {}
            }
        }

        Resolution::NotFound
    }

    fn lookup(&self, href: &str) -> Option<Resolution> {
        if let Some(page) = self.pages.get(href) {
            return Some(Resolution::Page {
                href: href.to_string(),
                page: Arc::clone(page),
            });
        }

        self.redirects
            .get(href)
            .map(|target| Resolution::Redirect(target.clone()))
    }

    pub fn deriver(&self) -> &OldPathDeriver {
        &self.deriver
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn redirect_count(&self) -> usize {
        self.redirects.len()
    }

    /// Redirect table entries sorted by old path.
    pub fn sorted_redirects(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .redirects
            .iter()
            .map(|(from, to)| (from.as_str(), to.as_str()))
            .collect();
        entries.sort_unstable();
        entries
    }
}

fn aliases_for(deriver: &OldPathDeriver, page: &Page, permalink: &Permalink) -> RedirectSet {
    let grammar = deriver.grammar();
    let mut aliases = deriver.derive_old_paths(
        &permalink.href,
        &permalink.language_code,
        &permalink.version,
    );

    for redirect_from in &page.redirect_from {
        let localized = grammar.path_with_language(redirect_from, &permalink.language_code);
        aliases.extend(deriver.derive_old_paths(
            &localized,
            &permalink.language_code,
            &permalink.version,
        ));
        aliases.insert(localized);
    }

    aliases
}
