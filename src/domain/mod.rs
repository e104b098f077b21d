//! Domain layer: version facts, path rules and the page model.
//!
//! Nothing in here performs I/O. Every type is either immutable configuration
//! or a pure transformation over strings, so all of it is safe to share across
//! threads behind an `Arc`.
//!
//! # Architecture
//!
//! - [`versions`] - Version registry and release range checks
//! - [`languages`] - Known language codes
//! - [`external_redirects`] - Off-site hrefs excluded from link rewriting
//! - [`old_paths`] - Historical aliases of a canonical path
//! - [`link_rewriter`] - Canonical form of author-written local links
//! - [`entities`] - Pages and permalinks
//! - [`repositories`] - Page catalog trait
//!
//! # Request Flow
//!
//! 1. At startup the redirect table is built by running
//!    [`old_paths::OldPathDeriver::derive_old_paths`] on every permalink
//! 2. While rendering, [`link_rewriter::LinkRewriter::rewrite_link`] runs once per anchor

pub mod entities;
pub mod external_redirects;
pub mod languages;
pub mod link_rewriter;
pub mod old_paths;
pub mod repositories;
pub mod versions;
