//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, reading the
//! data files produced by the content build.
//!
//! # Modules
//!
//! - [`persistence`] - JSON file loaders and the page repository

pub mod persistence;
