//! Core domain entities.
//!
//! - [`Page`] - A published page with its permalinks
//! - [`Permalink`] - One (language, version) rendering of a page

pub mod page;

pub use page::{Page, Permalink};
