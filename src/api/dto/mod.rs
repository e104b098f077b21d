//! Data Transfer Objects for API requests and responses.
//!
//! Request bodies are validated with `validator` before reaching the engine.

pub mod health;
pub mod old_paths;
pub mod page;
pub mod rewrite;
