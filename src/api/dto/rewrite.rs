//! DTOs for batch link rewriting.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Batch of anchors from one rendered page.
///
/// `language` is not validated here; an empty value reaches the
/// rewriter and is rejected as a precondition failure.
#[derive(Debug, Deserialize, Validate)]
pub struct RewriteRequest {
    #[serde(default)]
    pub language: String,

    #[validate(length(min = 1, max = 64))]
    pub version: String,

    #[validate(length(min = 1, max = 1000), nested)]
    pub anchors: Vec<AnchorItem>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct AnchorItem {
    #[validate(length(min = 1, max = 2048))]
    pub href: String,

    #[serde(default)]
    pub classes: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RewriteResponse {
    pub summary: RewriteSummary,
    pub items: Vec<RewriteResultItem>,
}

#[derive(Debug, Serialize)]
pub struct RewriteResultItem {
    pub href: String,
    pub rewritten: String,
    pub changed: bool,
}

/// `skipped` counts anchors that are not root-relative.
#[derive(Debug, Serialize)]
pub struct RewriteSummary {
    pub total: usize,
    pub changed: usize,
    pub skipped: usize,
}
