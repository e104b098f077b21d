//! DTO describing a resolved page.

use serde::Serialize;

use crate::domain::entities::{Page, Permalink};

/// Body of a `200` answer from the path resolver.
#[derive(Debug, Serialize)]
pub struct PageResponse {
    /// The requested path, which differs from every permalink on an
    /// English fallback.
    pub href: String,
    pub relative_path: String,
    pub title: String,
    pub permalinks: Vec<Permalink>,
}

impl PageResponse {
    pub fn new(href: String, page: &Page) -> Self {
        Self {
            href,
            relative_path: page.relative_path.clone(),
            title: page.title.clone(),
            permalinks: page.permalinks.clone(),
        }
    }
}
