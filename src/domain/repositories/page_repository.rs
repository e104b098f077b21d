//! Repository trait for the published page catalog.

use crate::domain::entities::Page;
use crate::error::AppError;
use async_trait::async_trait;

/// Source of every published page and its permalinks.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::JsonPageRepository`] - JSON file written by the content build
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageRepository: Send + Sync {
    /// Lists all pages in catalog order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the catalog cannot be read or parsed.
    async fn list(&self) -> Result<Vec<Page>, AppError>;
}
