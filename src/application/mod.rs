//! Application layer services.
//!
//! Services orchestrate domain rules over data supplied by repositories and
//! give HTTP handlers and the CLI a single entry point.
//!
//! # Available Services
//!
//! - [`services::redirect_service::RedirectService`] - Redirect table and page lookup

pub mod services;
