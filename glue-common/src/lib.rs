//! # GLUE Common Library
//!
//! Shared code for the GLUE site service:
//! - Fallback-safe content loading (schema, fallback registry, fetcher, loader)
//! - The catalog of content sections
//! - Bootstrap configuration
//! - Admin authentication helpers and API error types
//! - Participant slugs and plans

pub mod api;
pub mod config;
pub mod content;
pub mod error;
pub mod plan;
pub mod sections;
pub mod slug;

pub use error::{Error, Result};
pub use plan::Plan;
