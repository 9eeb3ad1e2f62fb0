//! Fallback-safe content loading
//!
//! Each page section is fetched from the backend-of-record, checked against
//! its declared shape and, on any failure, replaced by a static fallback.
//!
//! - [`schema`]: shape descriptors and the validator
//! - [`fallback`]: the section registry holding one fallback per section
//! - [`cache`]: the response cache capability used by the fetcher
//! - [`fetcher`]: outbound reads
//! - [`loader`]: the orchestrator tying them together

pub mod cache;
pub mod fallback;
pub mod fetcher;
pub mod loader;
pub mod schema;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

pub use cache::{CacheDirective, MemoryCache, ResponseCache};
pub use fallback::{SectionRegistry, SectionSpec};
pub use fetcher::{FetchError, HttpFetcher, RawResponse, RemoteFetcher};
pub use loader::{ContentLoader, FetchResult, LoaderMode, Provenance};
pub use schema::{validate, validate_typed, Field, Rule, Shape, Violation};

/// Section wiring errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContentError {
    /// A section name was used without being registered
    #[error("Unknown content section: {0}")]
    UnknownSection(String),

    #[error("Content section registered twice: {0}")]
    DuplicateSection(String),

    /// A fallback that fails its own shape
    #[error("Invalid fallback for section {section}: {reason}")]
    InvalidFallback { section: String, reason: String },
}

/// A typed content section
///
/// `shape()` and the serde representation of `Self` must agree, and
/// `fallback()` must satisfy `shape()`.
pub trait Section: Serialize + DeserializeOwned + Send + 'static {
    const NAME: &'static str;

    fn shape() -> Shape;

    fn fallback() -> Self;

    fn cache_directive() -> CacheDirective;
}
