//! Best-effort visit enrichment providers.
//!
//! # Modules
//!
//! - `user_agent` - [`WootheeParser`], structured user-agent parsing
//! - `geoip` - [`MaxMindLocator`] over a local City database and the
//!   [`NullLocator`] fallback

mod geoip;
mod user_agent;

pub use geoip::{MaxMindLocator, NullLocator};
pub use user_agent::WootheeParser;
