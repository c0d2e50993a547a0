//! Utility functions for code generation, URL validation, and request handling.
//!
//! - [`code_generator`] - Shortcode generation and format validation
//! - [`url_validator`] - Destination URL validation
//! - [`client_ip`] - Client IP extraction from HTTP headers

pub mod client_ip;
pub mod code_generator;
pub mod url_validator;
