//! Participant profiles

use chrono::{DateTime, Utc};
use glue_common::plan::{is_publicly_visible, Plan};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

const COLUMNS: &str =
    "id, slug, name, description, plan, is_public, website, created_at, updated_at";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub plan: Plan,
    pub is_public: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Participant {
    pub fn is_publicly_visible(&self) -> bool {
        is_publicly_visible(self.plan, self.is_public)
    }
}

/// Fields accepted when creating a participant
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewParticipant {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub plan: Plan,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub website: Option<String>,
}

/// Partial update; absent fields stay as they are
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub plan: Option<Plan>,
    pub is_public: Option<bool>,
    /// `None` keeps the website, `Some(None)` clears it
    #[serde(default, deserialize_with = "present")]
    pub website: Option<Option<String>>,
}

/// Distinguish an explicit `null` from an absent key
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn decode_err<E>(e: E) -> sqlx::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    sqlx::Error::Decode(Box::new(e))
}

fn from_row(row: &SqliteRow) -> Result<Participant, sqlx::Error> {
    let id: String = row.try_get("id")?;
    let plan: String = row.try_get("plan")?;
    Ok(Participant {
        id: Uuid::parse_str(&id).map_err(decode_err)?,
        slug: row.try_get("slug")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        plan: plan.parse::<Plan>().map_err(decode_err)?,
        is_public: row.try_get("is_public")?,
        website: row.try_get("website")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// Whether a database error is a UNIQUE constraint failure
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .map_or(false, |db| db.is_unique_violation())
}

/// Insert a participant under `slug`
///
/// Fails with a unique violation when the slug is taken.
pub async fn insert(
    pool: &SqlitePool,
    slug: &str,
    new: &NewParticipant,
) -> Result<Participant, sqlx::Error> {
    let now = Utc::now();
    let participant = Participant {
        id: Uuid::new_v4(),
        slug: slug.to_string(),
        name: new.name.clone(),
        description: new.description.clone(),
        plan: new.plan,
        is_public: new.is_public,
        website: new.website.clone(),
        created_at: now,
        updated_at: now,
    };

    sqlx::query(&format!(
        "INSERT INTO participants ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        COLUMNS
    ))
    .bind(participant.id.to_string())
    .bind(&participant.slug)
    .bind(&participant.name)
    .bind(&participant.description)
    .bind(participant.plan.as_str())
    .bind(participant.is_public)
    .bind(&participant.website)
    .bind(participant.created_at)
    .bind(participant.updated_at)
    .execute(pool)
    .await?;

    Ok(participant)
}

pub async fn get_by_slug(
    pool: &SqlitePool,
    slug: &str,
) -> Result<Option<Participant>, sqlx::Error> {
    let row = sqlx::query(&format!(
        "SELECT {} FROM participants WHERE slug = ?",
        COLUMNS
    ))
    .bind(slug)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(from_row).transpose()
}

/// All participants ordered by name
pub async fn list(pool: &SqlitePool) -> Result<Vec<Participant>, sqlx::Error> {
    let rows = sqlx::query(&format!(
        "SELECT {} FROM participants ORDER BY name COLLATE NOCASE, slug",
        COLUMNS
    ))
    .fetch_all(pool)
    .await?;

    rows.iter().map(from_row).collect()
}

/// Participants the public directory may show
pub async fn list_public(pool: &SqlitePool) -> Result<Vec<Participant>, sqlx::Error> {
    let mut participants = list(pool).await?;
    participants.retain(Participant::is_publicly_visible);
    Ok(participants)
}

/// Apply `update` to the participant at `slug`; `None` when absent
///
/// One statement, so concurrent updates of different fields never undo
/// each other.
pub async fn update(
    pool: &SqlitePool,
    slug: &str,
    update: &ParticipantUpdate,
) -> Result<Option<Participant>, sqlx::Error> {
    let row = sqlx::query(&format!(
        r#"
        UPDATE participants
        SET name = COALESCE(?, name),
            description = COALESCE(?, description),
            plan = COALESCE(?, plan),
            is_public = COALESCE(?, is_public),
            website = CASE WHEN ? THEN ? ELSE website END,
            updated_at = ?
        WHERE slug = ?
        RETURNING {}
        "#,
        COLUMNS
    ))
    .bind(&update.name)
    .bind(&update.description)
    .bind(update.plan.map(|plan| plan.as_str()))
    .bind(update.is_public)
    .bind(update.website.is_some())
    .bind(update.website.clone().flatten())
    .bind(Utc::now())
    .bind(slug)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(from_row).transpose()
}
