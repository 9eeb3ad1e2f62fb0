//! Admin mutation endpoints
//!
//! Every body is checked against a shape before anything is written. A
//! section write invalidates the cache tags of that section so the next
//! page render reads the new value.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use glue_common::content::{validate, Field, SectionSpec, Shape};
use glue_common::plan::Plan;
use glue_common::slug::{candidates, slugify, MAX_SLUG_ATTEMPTS};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::db::{self, NewParticipant, Participant, ParticipantUpdate};
use crate::{ApiError, ApiResult, AppState};

/// Response to a section write
#[derive(Debug, Serialize)]
pub struct SectionWrite {
    pub section: String,
    /// Stored value, with defaults filled in
    pub value: Value,
    /// Number of cache entries dropped
    pub invalidated: usize,
}

/// PUT /api/admin/sections/:name
pub async fn put_section(
    State(state): State<AppState>,
    Path(name): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<SectionWrite>> {
    let Json(body) = payload?;
    let spec = state.registry().get(&name)?;
    store_section(&state, spec, &body).await
}

/// PATCH /api/admin/sections/:name
///
/// Top-level keys of the body replace those of the stored value, or of the
/// fallback when nothing is stored yet.
pub async fn patch_section(
    State(state): State<AppState>,
    Path(name): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<SectionWrite>> {
    let Json(body) = payload?;
    let spec = state.registry().get(&name)?;

    let Value::Object(changes) = body else {
        return Err(ApiError::BadRequest(
            "PATCH body must be a JSON object".to_string(),
        ));
    };

    let mut merged = match db::sections::get_section(&state.db, &name).await? {
        Some(stored) => stored.payload,
        None => spec.fallback.clone(),
    };
    let Some(target) = merged.as_object_mut() else {
        return Err(ApiError::Internal(format!(
            "Section {} is not stored as an object",
            name
        )));
    };
    target.extend(changes);

    store_section(&state, spec, &merged).await
}

async fn store_section(
    state: &AppState,
    spec: &SectionSpec,
    body: &Value,
) -> ApiResult<Json<SectionWrite>> {
    let value = validate(body, &spec.shape).map_err(ApiError::Validation)?;
    db::sections::upsert_section(&state.db, spec.name, &value).await?;

    let invalidated: usize = spec
        .cache
        .tags
        .iter()
        .map(|tag| state.cache.invalidate(tag))
        .sum();
    info!(section = spec.name, invalidated, "Section updated");

    Ok(Json(SectionWrite {
        section: spec.name.to_string(),
        value,
        invalidated,
    }))
}

fn new_participant_shape() -> Shape {
    Shape::object(vec![
        Field::required("name", Shape::text(1)),
        Field::optional("description", Shape::string()).or_default(json!("")),
        Field::optional("plan", Shape::one_of(Plan::NAMES)).or_default(json!("free")),
        Field::optional("isPublic", Shape::boolean()).or_default(json!(false)),
        Field::optional("website", Shape::url()),
    ])
}

fn participant_update_shape() -> Shape {
    Shape::object(vec![
        Field::optional("name", Shape::text(1)),
        Field::optional("description", Shape::string()),
        Field::optional("plan", Shape::one_of(Plan::NAMES)),
        Field::optional("isPublic", Shape::boolean()),
        Field::optional("website", Shape::url()),
    ])
}

fn parse_body<T: DeserializeOwned>(body: &Value, shape: &Shape) -> ApiResult<T> {
    let value = validate(body, shape).map_err(ApiError::Validation)?;
    serde_json::from_value(value).map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// POST /api/admin/participants
///
/// The slug derives from the name; taken slugs get a numeric suffix.
pub async fn create_participant(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Participant>)> {
    let Json(body) = payload?;
    let new: NewParticipant = parse_body(&body, &new_participant_shape())?;

    let base = slugify(&new.name);
    for slug in candidates(&base, MAX_SLUG_ATTEMPTS) {
        match db::participants::insert(&state.db, &slug, &new).await {
            Ok(participant) => {
                info!(slug = %participant.slug, plan = %participant.plan, "Participant created");
                return Ok((StatusCode::CREATED, Json(participant)));
            }
            Err(e) if db::participants::is_unique_violation(&e) => {
                debug!(slug = %slug, "Slug taken");
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(ApiError::Conflict(format!(
        "No free slug for {} after {} attempts",
        base, MAX_SLUG_ATTEMPTS
    )))
}

/// PUT /api/admin/participants/:slug
///
/// Absent fields keep their value, `"website": null` clears the website;
/// the slug never changes.
pub async fn update_participant(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Participant>> {
    let Json(body) = payload?;
    let change: ParticipantUpdate = parse_body(&body, &participant_update_shape())?;

    let participant = db::participants::update(&state.db, &slug, &change)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Participant not found: {}", slug)))?;

    info!(slug = %participant.slug, "Participant updated");
    Ok(Json(participant))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_participant_defaults() {
        let new: NewParticipant =
            parse_body(&json!({"name": "Atelier"}), &new_participant_shape()).unwrap();
        assert_eq!(new.plan, Plan::Free);
        assert!(!new.is_public);
        assert_eq!(new.description, "");
        assert!(new.website.is_none());
    }

    #[test]
    fn test_new_participant_rejects_bad_fields() {
        let err = parse_body::<NewParticipant>(
            &json!({"name": "", "plan": "gold", "website": "ftp://x"}),
            &new_participant_shape(),
        )
        .unwrap_err();
        let ApiError::Validation(violations) = err else {
            panic!("expected validation error");
        };
        let codes: Vec<&str> = violations.iter().map(|v| v.rule.code()).collect();
        assert_eq!(codes, vec!["min_length", "enum", "url"]);
    }

    #[test]
    fn test_update_null_website_means_clear() {
        let change: ParticipantUpdate =
            parse_body(&json!({"website": null}), &participant_update_shape()).unwrap();
        assert_eq!(change.website, Some(None));

        let change: ParticipantUpdate =
            parse_body(&json!({"name": "Studio"}), &participant_update_shape()).unwrap();
        assert_eq!(change.website, None);
    }

    #[test]
    fn test_update_allows_empty_body() {
        let change: ParticipantUpdate =
            parse_body(&json!({}), &participant_update_shape()).unwrap();
        assert!(change.name.is_none());
        assert!(change.plan.is_none());
    }
}
