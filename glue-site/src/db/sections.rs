//! Stored section payloads

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{Row, SqlitePool};

#[derive(Debug, Clone, PartialEq)]
pub struct StoredSection {
    pub name: String,
    pub payload: Value,
    pub updated_at: DateTime<Utc>,
}

/// Stored payload of section `name`, if any
pub async fn get_section(
    pool: &SqlitePool,
    name: &str,
) -> Result<Option<StoredSection>, sqlx::Error> {
    let row = sqlx::query("SELECT name, payload, updated_at FROM sections WHERE name = ?")
        .bind(name)
        .fetch_optional(pool)
        .await?;

    row.map(|row| -> Result<StoredSection, sqlx::Error> {
        let payload: String = row.try_get("payload")?;
        let payload = serde_json::from_str(&payload)
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        Ok(StoredSection {
            name: row.try_get("name")?,
            payload,
            updated_at: row.try_get("updated_at")?,
        })
    })
    .transpose()
}

/// Insert or replace the payload of section `name`
pub async fn upsert_section(
    pool: &SqlitePool,
    name: &str,
    payload: &Value,
) -> Result<StoredSection, sqlx::Error> {
    let updated_at = Utc::now();
    sqlx::query(
        r#"
        INSERT INTO sections (name, payload, updated_at) VALUES (?, ?, ?)
        ON CONFLICT(name) DO UPDATE SET payload = excluded.payload, updated_at = excluded.updated_at
        "#,
    )
    .bind(name)
    .bind(payload.to_string())
    .bind(updated_at)
    .execute(pool)
    .await?;

    Ok(StoredSection {
        name: name.to_string(),
        payload: payload.clone(),
        updated_at,
    })
}
