//! glue-site library: the GLUE site service
//!
//! Serves section payloads as the backend-of-record, the admin mutation
//! endpoints behind the `glue_admin` cookie, and page compositions built
//! through the fallback-safe [`ContentLoader`].

use std::sync::Arc;

use axum::{middleware, Router};
use glue_common::config::Environment;
use glue_common::content::{ContentLoader, ResponseCache, SectionRegistry};
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;
pub mod error;

pub use error::{ApiError, ApiResult};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    /// Loader used by the page composition endpoints
    pub loader: ContentLoader,
    /// Cache the loader's fetcher reads through; mutations invalidate it
    pub cache: Arc<dyn ResponseCache>,
    /// `None` closes every admin endpoint
    pub admin_token: Option<String>,
    pub environment: Environment,
}

impl AppState {
    pub fn new(
        db: SqlitePool,
        loader: ContentLoader,
        cache: Arc<dyn ResponseCache>,
        admin_token: Option<String>,
        environment: Environment,
    ) -> Self {
        Self {
            db,
            loader,
            cache,
            admin_token,
            environment,
        }
    }

    pub fn registry(&self) -> &SectionRegistry {
        self.loader.registry()
    }
}

/// Build application router
///
/// Admin routes pass through [`api::admin_auth`]; everything else is public.
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post, put};

    let admin = Router::new()
        .route(
            "/api/admin/sections/:name",
            put(api::put_section).patch(api::patch_section),
        )
        .route("/api/admin/participants", post(api::create_participant))
        .route("/api/admin/participants/:slug", put(api::update_participant))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::admin_auth,
        ));

    let public = Router::new()
        .route("/api/sections", get(api::list_sections))
        .route("/api/sections/:name", get(api::get_section))
        .route("/api/participants", get(api::list_participants))
        .route("/api/participants/:slug", get(api::get_participant))
        .merge(api::page_routes())
        .merge(api::health_routes());

    Router::new()
        .merge(admin)
        .merge(public)
        .layer(middleware::map_response_with_state(
            state.clone(),
            error::redact_server_errors,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
