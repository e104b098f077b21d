//! HTTP request handlers.

pub mod health;
pub mod old_paths;
pub mod redirect;
pub mod rewrite;

pub use health::health_handler;
pub use old_paths::old_paths_handler;
pub use redirect::resolve_handler;
pub use rewrite::rewrite_handler;
