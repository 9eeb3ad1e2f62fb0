//! HTTP API handlers for glue-site

pub mod admin;
pub mod auth;
pub mod health;
pub mod pages;
pub mod participants;
pub mod sections;

pub use admin::{create_participant, patch_section, put_section, update_participant};
pub use auth::admin_auth;
pub use health::health_routes;
pub use pages::page_routes;
pub use participants::{get_participant, list_participants};
pub use sections::{get_section, list_sections};
