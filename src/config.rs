//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ```bash
//! export VERSIONS_FILE="data/versions.json"
//! export PAGES_FILE="data/pages.json"
//! export EXTERNAL_REDIRECTS_FILE="data/external-sites.json"  # Optional
//! ```
//!
//! ## Required Variables
//!
//! - `VERSIONS_FILE` - Version registry JSON
//! - `PAGES_FILE` - Page catalog JSON
//!
//! ## Optional Variables
//!
//! - `EXTERNAL_REDIRECTS_FILE` - External redirect map JSON
//! - `LANGUAGES` - Comma-separated language codes (default: `en,ja,cn,es,pt,de`)
//! - `FEATURE_REMOVE_FPT` - Drop the default version from rewritten links (`true` / `1`)
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

use crate::domain::languages::Languages;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    pub versions_file: PathBuf,
    pub pages_file: PathBuf,
    pub external_redirects_file: Option<PathBuf>,
    pub languages: Languages,
    /// Forces `remove_fpt` on regardless of the versions file.
    pub remove_fpt: bool,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `VERSIONS_FILE` or `PAGES_FILE` is missing.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let versions_file = env::var("VERSIONS_FILE")
            .map(PathBuf::from)
            .context("VERSIONS_FILE must be set")?;
        let pages_file = env::var("PAGES_FILE")
            .map(PathBuf::from)
            .context("PAGES_FILE must be set")?;
        let external_redirects_file = env::var("EXTERNAL_REDIRECTS_FILE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let languages = env::var("LANGUAGES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();

        let remove_fpt = env::var("FEATURE_REMOVE_FPT")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            versions_file,
            pages_file,
            external_redirects_file,
            languages,
            remove_fpt,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - a data file path is empty
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.versions_file.as_os_str().is_empty() {
            anyhow::bail!("VERSIONS_FILE must not be empty");
        }

        if self.pages_file.as_os_str().is_empty() {
            anyhow::bail!("PAGES_FILE must not be empty");
        }

        Ok(())
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Versions file: {}", self.versions_file.display());
        tracing::info!("  Pages file: {}", self.pages_file.display());

        if let Some(ref path) = self.external_redirects_file {
            tracing::info!("  External redirects: {}", path.display());
        } else {
            tracing::info!("  External redirects: none");
        }

        tracing::info!("  Languages: {}", self.languages.codes().join(","));
        tracing::info!("  Remove default version: {}", self.remove_fpt);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "LISTEN",
        "LOG_FORMAT",
        "VERSIONS_FILE",
        "PAGES_FILE",
        "EXTERNAL_REDIRECTS_FILE",
        "LANGUAGES",
        "FEATURE_REMOVE_FPT",
    ];

    fn clear_env() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            for var in VARS {
                env::remove_var(var);
            }
        }
    }

    fn config() -> Config {
        Config {
            listen_addr: "0.0.0.0:3000".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            versions_file: PathBuf::from("data/versions.json"),
            pages_file: PathBuf::from("data/pages.json"),
            external_redirects_file: None,
            languages: Languages::default(),
            remove_fpt: false,
        }
    }

    #[test]
    fn test_config_validation() {
        let mut config = config();
        assert!(config.validate().is_ok());

        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());

        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.listen_addr = "3000".to_string();
        assert!(config.validate().is_err());

        config.listen_addr = "0.0.0.0:3000".to_string();
        config.pages_file = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_requires_data_files() {
        clear_env();
        assert!(Config::from_env().is_err());

        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("VERSIONS_FILE", "versions.json");
        }
        assert!(Config::from_env().is_err());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("VERSIONS_FILE", "versions.json");
            env::set_var("PAGES_FILE", "pages.json");
        }

        let config = Config::from_env().unwrap();
        assert_eq!(config.listen_addr, "0.0.0.0:3000");
        assert_eq!(config.log_format, "text");
        assert_eq!(config.external_redirects_file, None);
        assert_eq!(config.languages, Languages::default());
        assert!(!config.remove_fpt);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("VERSIONS_FILE", "versions.json");
            env::set_var("PAGES_FILE", "pages.json");
            env::set_var("EXTERNAL_REDIRECTS_FILE", "external.json");
            env::set_var("LANGUAGES", "ja, ES");
            env::set_var("FEATURE_REMOVE_FPT", "TRUE");
        }

        let config = Config::from_env().unwrap();
        assert_eq!(
            config.external_redirects_file,
            Some(PathBuf::from("external.json"))
        );
        assert_eq!(config.languages.codes(), ["en", "ja", "es"]);
        assert!(config.remove_fpt);

        clear_env();
    }
}
