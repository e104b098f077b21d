//! DTOs for the old-path derivation endpoint.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use crate::domain::languages::DEFAULT_LANGUAGE;

/// Root-relative path, no scheme or host.
pub(crate) static ROOT_RELATIVE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/[^/]").unwrap());

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

/// `GET /api/old-paths?path=&language=&version=`
#[derive(Debug, Deserialize, Validate)]
pub struct OldPathsQuery {
    /// Canonical path of the page, language prefix included.
    #[validate(regex(path = *ROOT_RELATIVE_REGEX, message = "Path must be root-relative"))]
    pub path: String,

    #[serde(default = "default_language")]
    #[validate(length(min = 1, max = 16))]
    pub language: String,

    #[validate(length(min = 1, max = 64))]
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct OldPathsResponse {
    pub path: String,
    pub count: usize,
    pub old_paths: Vec<String>,
}
