//! Shared primitives for the admin console core.
//!
//! This crate contains pure data types with no business logic - they're
//! just values that can be passed between layers.
//!
//! ## Architecture
//!
//! - **common** (this crate): Pure shared types
//! - **admin-core**: The resilient API client operating on them
//! - Admin console pages embed admin-core and render whatever it returns
//!
//! This layered architecture keeps concerns separated and makes testing easier.

pub mod error;
pub mod http_status;
pub mod redacted_token;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_token::RedactedToken;

#[cfg(test)]
mod tests;
