//! Startup loaders for the version registry and external redirect files.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::domain::external_redirects::ExternalRedirects;
use crate::domain::versions::{VersionRegistry, VersionRegistryData};

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Loads and validates the version registry file.
///
/// `force_remove_fpt` enables default-version removal even when the file
/// leaves `remove_fpt` unset.
///
/// # Errors
///
/// Returns an error if the file is missing, is not valid JSON, or fails
/// [`VersionRegistry::new`] validation.
pub async fn load_version_registry(path: &Path, force_remove_fpt: bool) -> Result<VersionRegistry> {
    let mut data: VersionRegistryData = read_json(path).await?;
    data.remove_fpt |= force_remove_fpt;

    let registry = VersionRegistry::new(data)
        .with_context(|| format!("Invalid version registry in {}", path.display()))?;

    tracing::debug!(
        latest = registry.latest(),
        supported = registry.supported_versions().len(),
        deprecated = registry.deprecated_count(),
        "Version registry loaded"
    );

    Ok(registry)
}

/// Loads the external redirect map, or an empty one when no file is configured.
///
/// # Errors
///
/// Returns an error if a configured file cannot be read or parsed.
pub async fn load_external_redirects(path: Option<&Path>) -> Result<ExternalRedirects> {
    let Some(path) = path else {
        return Ok(ExternalRedirects::default());
    };

    let redirects: ExternalRedirects = read_json(path).await?;
    tracing::debug!(count = redirects.len(), "External redirects loaded");

    Ok(redirects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_load_version_registry() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "latest": "3.11",
                "deprecated": ["2.1"],
                "last_release_with_legacy_format": "2.18",
                "first_restored_admin_guides": "2.21",
                "supported_versions": ["free-pro-team@latest", "enterprise-server@3.11"],
                "non_enterprise_default_version": "free-pro-team@latest"
            }}"#
        )
        .unwrap();

        let registry = load_version_registry(file.path(), false).await.unwrap();
        assert_eq!(registry.latest(), "3.11");
        assert!(!registry.remove_fpt());

        let forced = load_version_registry(file.path(), true).await.unwrap();
        assert!(forced.remove_fpt());
    }

    #[tokio::test]
    async fn test_load_version_registry_rejects_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "latest": "next",
                "last_release_with_legacy_format": "2.18",
                "first_restored_admin_guides": "2.21",
                "supported_versions": ["free-pro-team@latest"],
                "non_enterprise_default_version": "free-pro-team@latest"
            }}"#
        )
        .unwrap();

        assert!(load_version_registry(file.path(), false).await.is_err());
    }

    #[tokio::test]
    async fn test_load_external_redirects_optional() {
        let redirects = load_external_redirects(None).await.unwrap();
        assert!(redirects.is_empty());

        let missing = load_external_redirects(Some(Path::new("/nonexistent/redirects.json"))).await;
        assert!(missing.is_err());
    }
}
