//! Repository trait definitions for the domain layer.
//!
//! Implementations live in `crate::infrastructure::persistence`; mocks are
//! generated with `mockall` for unit tests.

pub mod page_repository;

pub use page_repository::PageRepository;

#[cfg(test)]
pub use page_repository::MockPageRepository;
