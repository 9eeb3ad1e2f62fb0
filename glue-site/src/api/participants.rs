//! Public participant directory
//!
//! Only participants whose plan allows a public profile and who opted in
//! are listed; anyone else is indistinguishable from a missing slug.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::db::{self, Participant};
use crate::{ApiError, ApiResult, AppState};

/// GET /api/participants
pub async fn list_participants(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<Participant>>> {
    let participants = db::participants::list_public(&state.db).await?;
    Ok(Json(participants))
}

/// GET /api/participants/:slug
pub async fn get_participant(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<Participant>> {
    db::participants::get_by_slug(&state.db, &slug)
        .await?
        .filter(Participant::is_publicly_visible)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Participant not found: {}", slug)))
}
