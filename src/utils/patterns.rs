//! Compiled path patterns shared by the redirect engine and the link rewriter.

use regex::Regex;
use std::sync::LazyLock;

/// Admin guides (`/admin`, `/admin/...`), which only exist on Enterprise Server.
pub static ADMIN_PRODUCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/admin(?:/|$|\?|#)").unwrap());

/// Insights docs, which only exist on Enterprise Server.
pub static INSIGHTS_PRODUCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/insights(?:/|$|\?|#)").unwrap());

/// Desktop docs, which only exist on the default plan.
pub static DESKTOP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/desktop(?:/|$|\?|#)").unwrap());

/// Legacy `/enterprise/<release>` segment; captures the release number.
pub static ENTERPRISE_VERSION_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/enterprise/(\d+\.\d+(?:\.\d+)?)(?:/|$|\?|#)").unwrap()
});

/// Returns the legacy enterprise release number embedded in `href`, if any.
///
/// `/enterprise/11.10.340/admin/articles/upgrading` yields `11.10.340`.
pub fn enterprise_version_number(href: &str) -> Option<&str> {
    ENTERPRISE_VERSION_NUMBER
        .captures(href)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
