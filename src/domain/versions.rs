//! Version registry: immutable facts about the documentation versions the site knows.
//!
//! The registry is loaded once at startup (see
//! [`crate::infrastructure::persistence::load_version_registry`]) and shared by
//! handle between the old-path deriver and the link rewriter.

use regex::Regex;
use serde::Deserialize;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

/// Plan name of Enterprise Server versions.
pub const ENTERPRISE_SERVER_PLAN: &str = "enterprise-server";

/// Literal version segment that always resolves to the latest Enterprise Server release.
pub const ENTERPRISE_SERVER_LATEST: &str = "enterprise-server@latest";

/// Version marker returned for the site root.
pub const HOMEPAGE: &str = "homepage";

/// The one legacy release that predates numeric ordering and sorts below everything.
const PRE_NUMERIC_RELEASE: &str = "11.10.340";

static RELEASE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)(?:\.(\d+))?(?:\.(\d+))?").unwrap());

/// Errors raised while assembling a [`VersionRegistry`].
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("{field} is not a release number: '{value}'")]
    InvalidRelease { field: &'static str, value: String },

    #[error("non-enterprise default version must not be empty")]
    MissingDefaultVersion,

    #[error("non-enterprise default version '{0}' is not listed in supported versions")]
    DefaultVersionNotSupported(String),
}

/// A numeric release, coerced from any string containing `major[.minor[.patch]]`.
///
/// Missing components are zero, so `3.11` and `3.11.0` compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Release {
    major: u64,
    minor: u64,
    patch: u64,
}

impl Release {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Extracts the first release number found anywhere in `input`.
    ///
    /// `enterprise-server@3.11` coerces to `3.11.0`; `free-pro-team@latest`
    /// has no digits and yields `None`.
    pub fn coerce(input: &str) -> Option<Self> {
        let caps = RELEASE_REGEX.captures(input)?;
        let part = |i: usize| -> Option<u64> {
            caps.get(i)
                .map_or(Some(0), |m| m.as_str().parse::<u64>().ok())
        };

        Some(Self::new(part(1)?, part(2)?, part(3)?))
    }

    /// Like [`Release::coerce`], also returning how many components were written.
    fn coerce_with_precision(input: &str) -> Option<(Self, usize)> {
        let release = Self::coerce(input)?;
        let precision = RELEASE_REGEX
            .captures(input)
            .map_or(0, |caps| (1..=3).filter(|&i| caps.get(i).is_some()).count());

        Some((release, precision))
    }

    /// Zeroes every component past the first `precision` ones.
    fn truncated(self, precision: usize) -> Self {
        match precision {
            1 => Self::new(self.major, 0, 0),
            2 => Self::new(self.major, self.minor, 0),
            _ => self,
        }
    }
}

impl fmt::Display for Release {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Evaluates a range expression such as `<2.21`, `>2.15` or `=3.11` against a version.
///
/// Supported operators are `<`, `<=`, `>`, `>=` and `=`. The version is
/// compared only on the components the bound spells out, so `=3.11` matches
/// every `3.11.x` and `>3.11` starts at `3.12`. A version or bound without a
/// release number never satisfies anything; an unknown operator never matches.
pub fn version_satisfies_range(version: &str, range: &str) -> bool {
    let Some(op_len) = ["<=", ">=", "<", ">", "="]
        .iter()
        .find(|op| range.starts_with(*op))
        .map(|op| op.len())
    else {
        return false;
    };
    let (op, bound) = range.split_at(op_len);

    if version.ends_with(PRE_NUMERIC_RELEASE) {
        return op.starts_with('<');
    }

    let (Some(v), Some((b, precision))) =
        (Release::coerce(version), Release::coerce_with_precision(bound))
    else {
        return false;
    };

    let ordering = v.truncated(precision).cmp(&b);
    match op {
        "<" => ordering == Ordering::Less,
        "<=" => ordering != Ordering::Greater,
        ">" => ordering == Ordering::Greater,
        ">=" => ordering != Ordering::Less,
        _ => ordering == Ordering::Equal,
    }
}

/// Serialized form of the registry, as found in the versions file.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionRegistryData {
    pub latest: String,
    #[serde(default)]
    pub deprecated: Vec<String>,
    pub last_release_with_legacy_format: String,
    pub first_restored_admin_guides: String,
    pub supported_versions: Vec<String>,
    pub non_enterprise_default_version: String,
    /// Collapse the default version out of rewritten links (`FEATURE_REMOVE_FPT`).
    #[serde(default)]
    pub remove_fpt: bool,
}

/// Immutable version facts shared by every path computation.
#[derive(Debug, Clone)]
pub struct VersionRegistry {
    latest: String,
    deprecated: HashSet<String>,
    last_release_with_legacy_format: String,
    first_restored_admin_guides: String,
    supported_versions: Vec<String>,
    supported_plans: Vec<String>,
    non_enterprise_default_version: String,
    remove_fpt: bool,
}

impl VersionRegistry {
    /// Validates the raw data and builds the registry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if a boundary release is not numeric or the
    /// default version is empty or unsupported.
    pub fn new(data: VersionRegistryData) -> Result<Self, RegistryError> {
        check_release("latest", &data.latest)?;
        check_release(
            "last_release_with_legacy_format",
            &data.last_release_with_legacy_format,
        )?;
        check_release(
            "first_restored_admin_guides",
            &data.first_restored_admin_guides,
        )?;

        if data.non_enterprise_default_version.is_empty() {
            return Err(RegistryError::MissingDefaultVersion);
        }
        if !data
            .supported_versions
            .contains(&data.non_enterprise_default_version)
        {
            return Err(RegistryError::DefaultVersionNotSupported(
                data.non_enterprise_default_version,
            ));
        }

        let mut supported_plans: Vec<String> = Vec::new();
        for version in &data.supported_versions {
            let plan = plan_of(version).to_string();
            if !supported_plans.contains(&plan) {
                supported_plans.push(plan);
            }
        }

        Ok(Self {
            latest: data.latest,
            deprecated: data.deprecated.into_iter().collect(),
            last_release_with_legacy_format: data.last_release_with_legacy_format,
            first_restored_admin_guides: data.first_restored_admin_guides,
            supported_versions: data.supported_versions,
            supported_plans,
            non_enterprise_default_version: data.non_enterprise_default_version,
            remove_fpt: data.remove_fpt,
        })
    }

    /// The latest Enterprise Server release, e.g. `3.11`.
    pub fn latest(&self) -> &str {
        &self.latest
    }

    /// `enterprise-server@<latest>`.
    pub fn enterprise_latest(&self) -> String {
        format!("{ENTERPRISE_SERVER_PLAN}@{}", self.latest)
    }

    pub fn last_release_with_legacy_format(&self) -> &str {
        &self.last_release_with_legacy_format
    }

    pub fn first_restored_admin_guides(&self) -> &str {
        &self.first_restored_admin_guides
    }

    pub fn non_enterprise_default_version(&self) -> &str {
        &self.non_enterprise_default_version
    }

    pub fn remove_fpt(&self) -> bool {
        self.remove_fpt
    }

    pub fn supported_versions(&self) -> &[String] {
        &self.supported_versions
    }

    pub fn supported_plans(&self) -> &[String] {
        &self.supported_plans
    }

    pub fn deprecated_count(&self) -> usize {
        self.deprecated.len()
    }

    pub fn is_supported(&self, version: &str) -> bool {
        self.supported_versions.iter().any(|v| v == version)
    }

    pub fn is_deprecated(&self, version: &str) -> bool {
        self.deprecated.contains(version)
    }

    pub fn is_plan(&self, segment: &str) -> bool {
        self.supported_plans.iter().any(|p| p == segment)
    }

    /// Resolves a bare plan segment (e.g. `enterprise-server`) to its newest version.
    ///
    /// Enterprise Server resolves to `enterprise-server@<latest>`; every other
    /// plan resolves to the first supported version carrying that plan.
    pub fn latest_version_for_plan(&self, plan: &str) -> Option<String> {
        if plan == ENTERPRISE_SERVER_PLAN {
            return Some(self.enterprise_latest());
        }

        self.supported_versions
            .iter()
            .find(|v| plan_of(v) == plan)
            .cloned()
    }
}

/// Returns the plan part of a `plan@release` version identifier.
pub fn plan_of(version: &str) -> &str {
    version.split_once('@').map_or(version, |(plan, _)| plan)
}

fn check_release(field: &'static str, value: &str) -> Result<(), RegistryError> {
    match Release::coerce(value) {
        Some(_) => Ok(()),
        None => Err(RegistryError::InvalidRelease {
            field,
            value: value.to_string(),
        }),
    }
}
