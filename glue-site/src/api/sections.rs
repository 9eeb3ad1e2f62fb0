//! Section endpoints: the backend-of-record the loader fetches from

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::{db, ApiError, ApiResult, AppState};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionInfo {
    pub name: &'static str,
    pub revalidate_secs: u64,
    pub tags: Vec<String>,
}

/// GET /api/sections
pub async fn list_sections(State(state): State<AppState>) -> Json<Vec<SectionInfo>> {
    let sections = state
        .registry()
        .iter()
        .map(|spec| SectionInfo {
            name: spec.name,
            revalidate_secs: spec.cache.revalidate.as_secs(),
            tags: spec.cache.tags.clone(),
        })
        .collect();
    Json(sections)
}

/// GET /api/sections/:name
///
/// Serves the stored payload as-is. Nothing stored is a 404, which the
/// loader on the other side turns into the fallback.
pub async fn get_section(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<Value>> {
    state.registry().get(&name)?;

    match db::sections::get_section(&state.db, &name).await? {
        Some(stored) => Ok(Json(stored.payload)),
        None => Err(ApiError::NotFound(format!(
            "No content stored for section {}",
            name
        ))),
    }
}
