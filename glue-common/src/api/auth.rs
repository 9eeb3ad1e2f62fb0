//! Admin cookie authentication
//!
//! The admin dashboard is gated by a `glue_admin` cookie carrying the
//! configured admin token. Cookie issuance happens elsewhere; this module
//! only checks what arrives.
//!
//! Tokens are compared through their SHA-256 digests so the comparison
//! time does not depend on where the first mismatching byte is.

use sha2::{Digest, Sha256};
use thiserror::Error;

/// Name of the admin session cookie
pub const ADMIN_COOKIE: &str = "glue_admin";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AdminAuthError {
    #[error("Admin cookie missing")]
    MissingCookie,

    #[error("Admin token rejected")]
    InvalidToken,

    /// No admin token configured: admin endpoints are closed
    #[error("Admin access is not configured")]
    NotConfigured,
}

/// SHA-256 digest of a token
pub fn token_digest(token: &str) -> [u8; 32] {
    Sha256::digest(token.as_bytes()).into()
}

/// Check a provided token against the configured one
///
/// # Examples
///
/// ```
/// use glue_common::api::auth::{verify_admin_token, AdminAuthError};
///
/// assert!(verify_admin_token(Some("s3cret"), Some("s3cret")).is_ok());
/// assert_eq!(
///     verify_admin_token(Some("guess"), Some("s3cret")),
///     Err(AdminAuthError::InvalidToken)
/// );
/// assert_eq!(verify_admin_token(None, Some("s3cret")), Err(AdminAuthError::MissingCookie));
/// assert_eq!(verify_admin_token(Some("x"), None), Err(AdminAuthError::NotConfigured));
/// ```
pub fn verify_admin_token(
    provided: Option<&str>,
    expected: Option<&str>,
) -> Result<(), AdminAuthError> {
    let expected = match expected {
        Some(token) if !token.is_empty() => token,
        _ => return Err(AdminAuthError::NotConfigured),
    };
    let provided = provided.ok_or(AdminAuthError::MissingCookie)?;

    let a = token_digest(provided);
    let b = token_digest(expected);
    let diff = a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y));

    if diff == 0 {
        Ok(())
    } else {
        Err(AdminAuthError::InvalidToken)
    }
}

/// Value of cookie `name` in a `Cookie` header
pub fn extract_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key.trim() == name).then(|| value.trim().trim_matches('"'))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_cookie() {
        let header = "theme=dark; glue_admin=abc123; lang=fr";
        assert_eq!(extract_cookie(header, ADMIN_COOKIE), Some("abc123"));
        assert_eq!(extract_cookie(header, "lang"), Some("fr"));
        assert_eq!(extract_cookie(header, "missing"), None);
        assert_eq!(extract_cookie("glue_admin=\"quoted\"", ADMIN_COOKIE), Some("quoted"));
    }

    #[test]
    fn test_extract_cookie_prefix_not_matched() {
        assert_eq!(extract_cookie("glue_admin_old=1", ADMIN_COOKIE), None);
    }

    #[test]
    fn test_empty_configured_token_closes_admin() {
        assert_eq!(
            verify_admin_token(Some(""), Some("")),
            Err(AdminAuthError::NotConfigured)
        );
    }

    #[test]
    fn test_digest_is_stable() {
        assert_eq!(token_digest("a"), token_digest("a"));
        assert_ne!(token_digest("a"), token_digest("b"));
    }
}
