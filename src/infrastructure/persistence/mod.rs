//! File-backed implementations of domain data sources.

pub mod json_loader;
pub mod json_page_repository;

pub use json_loader::{load_external_redirects, load_version_registry};
pub use json_page_repository::JsonPageRepository;
