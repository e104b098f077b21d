//! Path helpers shared by the old-path deriver and the link rewriter.
//!
//! - [`patterns`] - Compiled product and legacy-version regexes
//! - [`path_utils`] - Language/version path grammar

pub mod path_utils;
pub mod patterns;
