//! Shared HTTP API building blocks
//!
//! Pure functions and types only; the axum wiring lives in glue-site.

pub mod auth;
pub mod types;

pub use auth::{extract_cookie, verify_admin_token, AdminAuthError, ADMIN_COOKIE};
pub use types::{ErrorBody, ErrorResponse};
