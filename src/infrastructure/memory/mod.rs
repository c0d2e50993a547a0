//! In-process implementations of the domain repositories.
//!
//! Nothing here survives a restart; the store is constructed once per
//! process and shared through [`crate::state::AppState`].

mod link_store;

pub use link_store::MemoryLinkStore;
