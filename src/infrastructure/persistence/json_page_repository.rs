use async_trait::async_trait;
use serde_json::json;
use std::path::PathBuf;

use crate::domain::entities::Page;
use crate::domain::repositories::PageRepository;
use crate::error::AppError;

/// Page catalog read from the JSON file emitted by the content build.
///
/// The file holds an array of [`Page`] objects and is re-read on every
/// [`PageRepository::list`] call.
#[derive(Debug, Clone)]
pub struct JsonPageRepository {
    path: PathBuf,
}

impl JsonPageRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PageRepository for JsonPageRepository {
    async fn list(&self) -> Result<Vec<Page>, AppError> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            AppError::internal(
                "Failed to read page catalog",
                json!({ "path": self.path.display().to_string(), "reason": e.to_string() }),
            )
        })?;

        serde_json::from_str(&raw).map_err(|e| {
            AppError::internal(
                "Failed to parse page catalog",
                json!({ "path": self.path.display().to_string(), "reason": e.to_string() }),
            )
        })
    }
}
