//! Repository trait definitions for the domain layer.
//!
//! These traits abstract the shared mutable state of the service. They are
//! implemented by the in-process store in `crate::infrastructure::memory`.
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - URL registry with expiry lifecycle
//! - [`ClickRepository`] - Per-shortcode click ledger
//!
//! # Testing
//!
//! Mock implementations are generated with `mockall` under `cfg(test)`.

pub mod click_repository;
pub mod link_repository;

pub use click_repository::ClickRepository;
pub use link_repository::LinkRepository;

#[cfg(test)]
pub use click_repository::MockClickRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
