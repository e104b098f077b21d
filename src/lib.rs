//! # Docs Redirects
//!
//! Historical-path redirects and local link rewriting for a versioned,
//! multilingual documentation site.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Version registry, old-path derivation, link rewriting
//! - **Application Layer** ([`application`]) - Redirect table and path resolution
//! - **Infrastructure Layer** ([`infrastructure`]) - JSON data files
//! - **API Layer** ([`api`]) - HTTP handlers, DTOs, and middleware
//!
//! ## Quick Start
//!
//! ```bash
//! export VERSIONS_FILE="data/versions.json"
//! export PAGES_FILE="data/pages.json"
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
pub mod prelude {
    pub use crate::application::services::{RedirectService, Resolution};
    pub use crate::domain::entities::{Page, Permalink};
    pub use crate::domain::link_rewriter::{Anchor, LinkRewriteContext, LinkRewriter};
    pub use crate::domain::old_paths::OldPathDeriver;
    pub use crate::domain::versions::VersionRegistry;
    pub use crate::error::AppError;
    pub use crate::state::AppState;
    pub use crate::utils::path_utils::PathGrammar;
}
